//! Instruction stream builder.

use rustc_hash::FxHashMap;

use super::metadata::{MemberInfo, Metadata};
use super::opcode::OpCode;
use super::token::{Token, TokenTable};
use super::CompiledClosure;

/// Builds a [`CompiledClosure`] one instruction at a time.
///
/// Tokens are interned: asking twice for the same member in the same table
/// yields the same token, and rows are handed out from 1 per table.
#[derive(Default)]
pub struct Assembler {
    il: Vec<u8>,
    metadata: Metadata,
    interned: FxHashMap<(TokenTable, MemberInfo), Token>,
    next_row: FxHashMap<TokenTable, u32>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current byte offset (where the next instruction starts).
    pub fn offset(&self) -> usize {
        self.il.len()
    }

    /// Emit an operand-less instruction.
    pub fn op(&mut self, op: OpCode) -> &mut Self {
        debug_assert_eq!(op.operand_size(), 0, "{} takes an operand", op.mnemonic());
        self.il.push(op.byte());
        self
    }

    /// Emit an instruction with a token operand.
    pub fn op_token(&mut self, op: OpCode, token: Token) -> &mut Self {
        debug_assert!(op.takes_token(), "{} does not take a token", op.mnemonic());
        self.il.push(op.byte());
        self.il.extend_from_slice(&token.raw().to_le_bytes());
        self
    }

    pub fn ldc_i4(&mut self, value: i32) -> &mut Self {
        self.il.push(OpCode::LdcI4.byte());
        self.il.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn ldc_i8(&mut self, value: i64) -> &mut Self {
        self.il.push(OpCode::LdcI8.byte());
        self.il.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn br_s(&mut self, delta: i8) -> &mut Self {
        self.il.push(OpCode::BrS.byte());
        self.il.extend_from_slice(&delta.to_le_bytes());
        self
    }

    /// Append raw bytes, bypassing the encoder.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.il.extend_from_slice(bytes);
        self
    }

    /// Intern `member` in `table` and return its token.
    pub fn token(&mut self, table: TokenTable, member: MemberInfo) -> Token {
        if let Some(&token) = self.interned.get(&(table, member.clone())) {
            return token;
        }
        let row = self.next_row.entry(table).or_insert(0);
        *row = (*row + 1).min(Token::MAX_ROW);
        let token = Token::new(table, *row);
        self.metadata.insert(token, member.clone());
        self.interned.insert((table, member), token);
        token
    }

    /// `ldfld` on a field definition.
    pub fn ldfld(&mut self, member: MemberInfo) -> &mut Self {
        let token = self.token(TokenTable::FieldDef, member);
        self.op_token(OpCode::Ldfld, token)
    }

    /// `call`/`callvirt` on a method in `table`.
    pub fn call(&mut self, op: OpCode, table: TokenTable, member: MemberInfo) -> &mut Self {
        let token = self.token(table, member);
        self.op_token(op, token)
    }

    pub fn finish(self) -> CompiledClosure {
        CompiledClosure::new(self.il, self.metadata)
    }
}
