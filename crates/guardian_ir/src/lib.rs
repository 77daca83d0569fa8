//! Guardian IR - the shapes a guard expression can take.
//!
//! This crate contains the data the name resolver inspects:
//! - [`MemberPath`]: the dotted name of a checked value (`thing.nested.field`)
//! - [`tree`]: a flat expression-tree arena built by the `expr!` macro
//! - [`bytecode`]: a fixed-encoding instruction stream with a token metadata
//!   table, the shape a compiled closure body takes
//!
//! # Design Philosophy
//!
//! - **Flatten the tree**: no `Box<ExprKind>`, nodes reference each other
//!   through `ExprId(u32)` indices into one arena
//! - **Fail closed**: every lookup that can go out of bounds returns
//!   `Option`/`Result` so malformed shapes are reported, never panicked on
//! - **No evaluation**: nothing here runs user code; shapes are pure data

pub mod bytecode;
mod path;
pub mod tree;

pub use bytecode::{
    Assembler, CompiledClosure, GenericContext, MemberInfo, MemberKind, Metadata, MetadataError,
    MethodRole, OpCode, Token, TokenTable, TypeInfo,
};
pub use path::MemberPath;
pub use tree::{ExprId, ExprKind, ExprTree, Literal, TreeBuilder};
