//! Compiled-closure backend.
//!
//! The walker reads a closure body in fixed strides. A supported body is
//! `ldarg.0` followed by a run of 5-byte member accesses and a terminator:
//!
//! ```text
//! offset 0   ldarg.0
//! offset 1   ldfld <capture>        root local
//! offset 6   ldfld | call | callvirt
//! ...
//! offset n   stloc.0 | ret
//! ```
//!
//! Fields contribute their names. Methods recorded as getters contribute the
//! name after their `get_` prefix, which is matched case-sensitively the same
//! way `expr!` matches it. Getters declared on the nullable wrapper are
//! skipped. Everything else, static calls included, is unsupported.

use guardian_ir::{
    CompiledClosure, MemberInfo, MemberPath, MetadataError, MethodRole, OpCode, Token, TokenTable,
};

use crate::lower::{self, LowerOptions};
use crate::{NameResolver, Resolution, Shape};

/// Width of a token-bearing instruction.
const STRIDE: usize = 5;

const GETTER_PREFIX: &str = "get_";

/// Resolves names from compiled closure bodies.
///
/// Expression trees are lowered with [`lower::compile`] and then walked like
/// any other body.
#[derive(Copy, Clone, Debug, Default)]
pub struct BytecodeResolver {
    options: LowerOptions,
}

impl BytecodeResolver {
    pub fn new(options: LowerOptions) -> Self {
        BytecodeResolver { options }
    }
}

impl NameResolver for BytecodeResolver {
    #[tracing::instrument(level = "trace", skip_all)]
    fn resolve(&self, shape: &Shape) -> Resolution {
        let result = match shape {
            Shape::Tree(tree) => {
                let closure = lower::compile(tree, self.options);
                tracing::trace!(body = %closure, "lowered");
                walk(&closure)
            }
            Shape::Compiled(closure) => walk(closure),
        };
        match result {
            Ok(path) => {
                tracing::trace!(%path, "resolved");
                Resolution::Resolved(path)
            }
            Err(reason) => {
                tracing::debug!(%reason, "expression not supported");
                Resolution::Unsupported
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum Reject {
    #[error("body does not start with `ldarg.0; ldfld`")]
    Prologue,

    #[error("unknown opcode 0x{byte:02X} at offset {offset}")]
    UnknownOpcode { offset: usize, byte: u8 },

    #[error("`{op}` at offset {offset} is not a member access")]
    Unexpected { offset: usize, op: &'static str },

    #[error("operand at offset {0} is truncated")]
    Truncated(usize),

    #[error("`{0}` is not a property getter")]
    NotAGetter(Box<str>),

    #[error("`{0}` is a static call and has no receiver")]
    StaticCall(Box<str>),

    #[error("generic instantiation {0} is not a property getter")]
    GenericInvocation(Token),

    #[error("member chain contains an empty name")]
    EmptyName,

    #[error("body ends without `stloc.0` or `ret`")]
    Unterminated,

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

fn walk(closure: &CompiledClosure) -> Result<MemberPath, Reject> {
    let il = closure.il();
    let metadata = closure.metadata();

    if il.first() != Some(&OpCode::Ldarg0.byte()) || il.get(1) != Some(&OpCode::Ldfld.byte()) {
        return Err(Reject::Prologue);
    }

    let mut path: Option<MemberPath> = None;
    let mut offset = 1;
    while let Some(&byte) = il.get(offset) {
        let op = OpCode::from_byte(byte).ok_or(Reject::UnknownOpcode { offset, byte })?;
        tracing::trace!(offset, op = op.mnemonic(), "bytecode step");

        match op {
            OpCode::Stloc0 | OpCode::Ret => return path.ok_or(Reject::EmptyName),
            OpCode::Ldfld => {
                let token = operand(il, offset)?;
                let field = metadata.resolve_field(token)?;
                push(&mut path, field.name())?;
            }
            OpCode::Call | OpCode::Callvirt => {
                let token = operand(il, offset)?;
                if token.table() == Some(TokenTable::MethodSpec) {
                    return Err(Reject::GenericInvocation(token));
                }
                let method = metadata.resolve_method(token)?;
                let name = getter_name(method)?;
                if method.declaring_type().is_nullable_wrapper() {
                    tracing::trace!(getter = name, "nullable unwrap elided");
                } else {
                    push(&mut path, name)?;
                }
            }
            other => {
                return Err(Reject::Unexpected {
                    offset,
                    op: other.mnemonic(),
                })
            }
        }
        offset += STRIDE;
    }
    Err(Reject::Unterminated)
}

fn operand(il: &[u8], offset: usize) -> Result<Token, Reject> {
    Token::read(il, offset + 1).ok_or(Reject::Truncated(offset))
}

fn push(path: &mut Option<MemberPath>, name: &str) -> Result<(), Reject> {
    match path {
        Some(path) => {
            if path.push(name) {
                Ok(())
            } else {
                Err(Reject::EmptyName)
            }
        }
        None => {
            *path = Some(MemberPath::root(name).ok_or(Reject::EmptyName)?);
            Ok(())
        }
    }
}

/// The property a getter reads.
fn getter_name(method: &MemberInfo) -> Result<&str, Reject> {
    match method.role() {
        MethodRole::Getter => strip_getter(method.name())
            .ok_or_else(|| Reject::NotAGetter(method.name().into())),
        MethodRole::Static => Err(Reject::StaticCall(method.name().into())),
        MethodRole::Instance => Err(Reject::NotAGetter(method.name().into())),
    }
}

fn strip_getter(name: &str) -> Option<&str> {
    name.strip_prefix(GETTER_PREFIX)
}
