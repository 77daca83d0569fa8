//! Lowering expression trees to compiled closure bodies.
//!
//! [`compile`] emits the instruction stream a compiler produces for a
//! capturing closure: the closure object is argument 0 and every captured
//! local is a field on it. A chain such as `thing.nested.get_value()` becomes
//!
//! ```text
//! ldarg.0
//! ldfld    thing          // capture
//! ldfld    nested
//! callvirt get_value
//! ret
//! ```
//!
//! Nodes with no instruction equivalent lower to `nop`. The result is only
//! ever inspected, never executed, so the stream need not be type-correct;
//! it must only be shaped the way a real body of that expression would be.

use guardian_ir::{
    Assembler, CompiledClosure, ExprId, ExprKind, ExprTree, GenericContext, Literal, MemberInfo,
    OpCode, TokenTable, TypeInfo,
};

use crate::stack::ensure_sufficient_stack;

/// Name of the compiler-generated type holding captured locals.
const CLOSURE_TYPE: &str = "<>c__DisplayClass0_0";

/// Declaring type used for members whose receiver type is not recorded.
const RECEIVER_TYPE: &str = "<receiver>";

/// Nullable wrapper whose `get_Value` an unwrap lowers to.
const NULLABLE_TYPE: &str = "Option`1";

/// Code generation options.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct LowerOptions {
    /// Emit the debug-build epilogue (`stloc.0; br.s 0; ldloc.0; ret`)
    /// instead of a bare `ret`.
    pub debug: bool,
}

/// Compile `tree` into a closure body.
#[tracing::instrument(level = "trace", skip_all, fields(nodes = tree.len(), debug = options.debug))]
pub fn compile(tree: &ExprTree, options: LowerOptions) -> CompiledClosure {
    let mut lowerer = Lowerer {
        tree,
        asm: Assembler::new(),
        budget: tree.len(),
    };
    lowerer.emit(tree.root());

    let asm = &mut lowerer.asm;
    if options.debug {
        asm.op(OpCode::Stloc0)
            .br_s(0)
            .op(OpCode::Ldloc0)
            .op(OpCode::Ret);
    } else {
        asm.op(OpCode::Ret);
    }
    lowerer.asm.finish()
}

struct Lowerer<'a> {
    tree: &'a ExprTree,
    asm: Assembler,
    /// Remaining node visits; bounds work on malformed (cyclic) trees.
    budget: usize,
}

impl Lowerer<'_> {
    fn emit(&mut self, id: ExprId) {
        if self.budget == 0 {
            self.asm.op(OpCode::Nop);
            return;
        }
        self.budget -= 1;
        ensure_sufficient_stack(|| self.emit_node(id));
    }

    fn emit_all(&mut self, ids: &[ExprId]) {
        for &id in ids {
            self.emit(id);
        }
    }

    fn emit_node(&mut self, id: ExprId) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            self.asm.op(OpCode::Nop);
            return;
        };
        tracing::trace!(?id, kind = node.describe(), "lower");

        match node {
            ExprKind::Local(name) => {
                self.asm
                    .op(OpCode::Ldarg0)
                    .ldfld(MemberInfo::field(name, TypeInfo::named(CLOSURE_TYPE)));
            }
            ExprKind::Field { receiver, name } => {
                self.emit(*receiver);
                self.asm
                    .ldfld(MemberInfo::field(name, TypeInfo::named(RECEIVER_TYPE)));
            }
            ExprKind::Property { receiver, name } => {
                self.emit(*receiver);
                let getter = format!("get_{name}");
                self.asm.call(
                    OpCode::Callvirt,
                    TokenTable::MethodDef,
                    MemberInfo::getter(&getter, TypeInfo::named(RECEIVER_TYPE)),
                );
            }
            ExprKind::Unwrap(operand) => {
                self.emit(*operand);
                let wrapper = TypeInfo::nullable_wrapper(NULLABLE_TYPE)
                    .with_generic(GenericContext::Closed);
                self.asm.call(
                    OpCode::Call,
                    TokenTable::MemberRef,
                    MemberInfo::getter("get_Value", wrapper),
                );
            }
            ExprKind::Borrow(operand) | ExprKind::Deref(operand) | ExprKind::Group(operand) => {
                self.emit(*operand);
            }
            ExprKind::MethodCall {
                receiver,
                method,
                generic_args,
                args,
            } => {
                self.emit(*receiver);
                self.emit_all(args);
                let member = MemberInfo::method(method, TypeInfo::named(RECEIVER_TYPE));
                if generic_args.is_empty() {
                    self.asm
                        .call(OpCode::Callvirt, TokenTable::MethodDef, member);
                } else {
                    self.asm.call(
                        OpCode::Callvirt,
                        TokenTable::MethodSpec,
                        member.with_generic(GenericContext::Closed),
                    );
                }
            }
            ExprKind::Call { callee, args } => {
                self.emit_all(args);
                self.asm.call(
                    OpCode::Call,
                    TokenTable::MethodDef,
                    MemberInfo::static_method(callee, TypeInfo::named(RECEIVER_TYPE)),
                );
            }
            ExprKind::Index { receiver, index } => {
                self.emit(*receiver);
                self.emit(*index);
                self.asm.op(OpCode::LdelemRef);
            }
            ExprKind::Literal(literal) => self.emit_literal(literal),
            ExprKind::Default => {
                self.asm.op(OpCode::Ldnull);
            }
            ExprKind::Cast(operand) => {
                self.emit(*operand);
                self.asm.op(OpCode::ConvI8);
            }
            ExprKind::Conditional | ExprKind::Block | ExprKind::Other(_) => {
                self.asm.op(OpCode::Nop);
            }
        }
    }

    fn emit_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Int(value) => match i32::try_from(*value) {
                Ok(small) => self.asm.ldc_i4(small),
                Err(_) => self.asm.ldc_i8(*value),
            },
            Literal::Bool(value) => self.asm.ldc_i4(i32::from(*value)),
            Literal::Str(_) | Literal::Constant(_) | Literal::Other(_) => {
                self.asm.op(OpCode::Ldnull)
            }
        };
    }
}

#[cfg(test)]
mod tests;
