//! Guard clauses for argument validation.
//!
//! Each check takes an expression captured with [`expr!`], evaluates it, and
//! on failure returns a [`GuardError`] naming the expression. Nested member
//! reads are named by their full path:
//!
//! ```text
//! fn ship(order: &Order) -> Result<(), GuardError> {
//!     Against::null(&expr!(&order.customer.get_address()))?;
//!     // Err: Value cannot be null. (Parameter 'order.customer.address')
//!     Against::positive_or_zero(&expr!(order.total_cents))?;
//!     Ok(())
//! }
//! ```
//!
//! Names are only resolved when a check fails. Expressions that are not a
//! member-access chain rooted at a local (method calls, indexing, literals)
//! report the name `unknown`, or fail outright with
//! [`GuardError::UnsupportedExpression`] in strict mode.
//!
//! # Features
//!
//! - `strict`: strict mode on by default (see [`GuardConfig`])
//! - `bytecode`: resolve through compiled closure bodies ([`BytecodeResolver`])
//! - `opaque`: never resolve names ([`OpaqueResolver`])

#[allow(
    unused_extern_crates,
    reason = "Lets `expr!` expand to `::guardian` paths inside this crate"
)]
extern crate self as guardian;

mod config;
mod error;
mod expression;
mod guard;
mod inspected;
mod uri;
mod value;

pub use guardian_ir as ir;
pub use guardian_macros::expr;
pub use guardian_resolve::{
    BytecodeResolver, LowerOptions, NameResolver, OpaqueResolver, Resolution, Shape, TreeResolver,
};

pub use config::{config, install_config, GuardConfig};
pub use error::{FailureKind, GuardError, Parameter};
pub use expression::Expression;
pub use guard::{Against, Guard};
pub use inspected::Inspected;
pub use uri::{Uri, UriError, UriKind};
pub use uuid::Uuid;
pub use value::{Integer, NullElements, Nullable, RangeConstraint, Sequence};

/// The resolver selected by cargo features.
#[cfg(feature = "opaque")]
pub type DefaultResolver = OpaqueResolver;

/// The resolver selected by cargo features.
#[cfg(all(feature = "bytecode", not(feature = "opaque")))]
pub type DefaultResolver = BytecodeResolver;

/// The resolver selected by cargo features.
#[cfg(not(any(feature = "bytecode", feature = "opaque")))]
pub type DefaultResolver = TreeResolver;
