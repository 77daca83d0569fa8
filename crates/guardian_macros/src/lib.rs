//! Procedural macros for Guardian.
//!
//! # `expr!`
//!
//! Captures an expression twice: once as a closure that evaluates it, and
//! once as the expression tree the name resolver inspects.
//!
//! ```text
//! Against::null(&expr!(&thing.nested.get_value()))
//!
//! // expands to
//! {
//!     fn __guardian_shape() -> ::guardian::Shape {
//!         let mut builder = ::guardian::ir::TreeBuilder::new();
//!         let __node0 = builder.local("thing");
//!         let __node1 = builder.field(__node0, "nested");
//!         let __node2 = builder.property(__node1, "value");
//!         let __node3 = builder.borrow(__node2);
//!         ::guardian::Shape::Tree(builder.finish(__node3))
//!     }
//!     ::guardian::Inspected::new(|| (&thing.nested.get_value()), __guardian_shape)
//! }
//! ```
//!
//! The tree is built by a plain function, so it costs nothing unless a
//! check fails and the name is actually needed.

mod shape;

use proc_macro::TokenStream;

/// Capture an expression for a guard clause.
///
/// # Recognised shapes
///
/// - `name` (lower-case, `_` or `self`) - a local
/// - `receiver.field`, `receiver.0` - a field read
/// - `receiver.get_name()` - a property getter, recorded as `name`
/// - `receiver.unwrap()` - a nullable unwrap, recorded as a pass-through
/// - `&receiver`, `*receiver`, `(receiver)` - pass-throughs
///
/// The `get_` prefix is matched case-sensitively: `receiver.Get_name()` is an
/// ordinary method call.
///
/// Everything else (method calls, indexing, literals, constants,
/// `Default::default()`, `if`, blocks, casts) is recorded by kind so the
/// resolver can report it as unsupported.
///
/// Non-`Copy` values must be borrowed (`expr!(&thing.name)`): the closure is
/// `Fn` and cannot move out of its captures.
#[proc_macro]
pub fn expr(input: TokenStream) -> TokenStream {
    shape::expand(input)
}
