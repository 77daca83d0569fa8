//! Compiled closure bodies.
//!
//! A [`CompiledClosure`] is a byte-encoded instruction stream plus the token
//! metadata needed to make sense of its operands. Every token-bearing
//! instruction is one opcode byte followed by a 4-byte little-endian
//! [`Token`], so a member-access chain is a run of fixed 5-byte strides:
//!
//! ```text
//! IL_0000: ldarg.0
//! IL_0001: ldfld    0x04000001   // captured `thing`
//! IL_0006: callvirt 0x06000001   // get_nested
//! IL_000B: ldfld    0x04000002   // field
//! IL_0010: ret
//! ```

mod assembler;
mod metadata;
mod opcode;
mod token;

use std::fmt::{self, Write as _};

pub use assembler::Assembler;
pub use metadata::{
    GenericContext, MemberInfo, MemberKind, Metadata, MetadataError, MethodRole, TypeInfo,
};
pub use opcode::OpCode;
pub use token::{Token, TokenTable};

/// An instruction stream and its token table.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompiledClosure {
    il: Box<[u8]>,
    metadata: Metadata,
}

impl CompiledClosure {
    pub fn new(il: impl Into<Box<[u8]>>, metadata: Metadata) -> Self {
        CompiledClosure {
            il: il.into(),
            metadata,
        }
    }

    #[inline]
    pub fn il(&self) -> &[u8] {
        &self.il
    }

    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Render the body one instruction per line.
    ///
    /// Unknown bytes print as `.byte`; a truncated operand ends the listing.
    pub fn disassemble(&self) -> String {
        let mut out = String::new();
        let mut offset = 0;
        while let Some(&byte) = self.il.get(offset) {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = write!(out, "IL_{offset:04X}: ");
            let Some(op) = OpCode::from_byte(byte) else {
                let _ = write!(out, ".byte 0x{byte:02X}");
                offset += 1;
                continue;
            };
            out.push_str(op.mnemonic());
            let start = offset + 1;
            let end = start + op.operand_size();
            let Some(operand) = self.il.get(start..end) else {
                out.push_str(" <truncated>");
                break;
            };
            self.write_operand(&mut out, op, operand);
            offset = end;
        }
        out
    }

    fn write_operand(&self, out: &mut String, op: OpCode, operand: &[u8]) {
        if op.takes_token() {
            if let Some(token) = Token::read(operand, 0) {
                let _ = write!(out, " {token}");
                if let Some(member) = self.metadata.get(token) {
                    let _ = write!(out, " // {}::{}", member.declaring_type().name(), member.name());
                }
            }
            return;
        }
        let _ = match *operand {
            [b] => write!(out, " {}", i8::from_le_bytes([b])),
            [b0, b1, b2, b3] => write!(out, " {}", i32::from_le_bytes([b0, b1, b2, b3])),
            [b0, b1, b2, b3, b4, b5, b6, b7] => write!(
                out,
                " {}",
                i64::from_le_bytes([b0, b1, b2, b3, b4, b5, b6, b7])
            ),
            _ => Ok(()),
        };
    }
}

impl fmt::Display for CompiledClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disassemble())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
