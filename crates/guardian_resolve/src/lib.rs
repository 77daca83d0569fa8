//! Name resolution for guard expressions.
//!
//! Given the [`Shape`] of a zero-argument expression, a [`NameResolver`]
//! recovers the dotted member path the expression reads (`thing.nested.field`)
//! or reports it as [`Resolution::Unsupported`]. Resolution never evaluates
//! the expression.
//!
//! # Backends
//!
//! - [`TreeResolver`]: walks the expression tree recorded by `expr!`
//! - [`BytecodeResolver`]: walks a compiled closure body, lowering trees
//!   through [`lower::compile`] first
//! - [`OpaqueResolver`]: resolves nothing
//!
//! All backends fail closed. A shape that is not a plain member-access chain
//! rooted at a local produces `Unsupported`, never a partial path.

mod bytecode;
pub mod lower;
mod opaque;
mod shape;
mod stack;
mod tree;

pub use bytecode::BytecodeResolver;
pub use lower::LowerOptions;
pub use opaque::OpaqueResolver;
pub use shape::{Resolution, Shape};
pub use tree::TreeResolver;

/// Recovers the member path of an expression shape.
///
/// Implementations must be deterministic: resolving the same shape twice
/// yields the same result.
pub trait NameResolver {
    fn resolve(&self, shape: &Shape) -> Resolution;
}

impl<R: NameResolver + ?Sized> NameResolver for &R {
    fn resolve(&self, shape: &Shape) -> Resolution {
        (**self).resolve(shape)
    }
}
