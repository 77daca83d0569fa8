//! Flat expression trees.
//!
//! The `expr!` macro records the syntactic shape of a guard expression as an
//! [`ExprTree`]: an arena of [`ExprKind`] nodes plus a root. Children always
//! live at lower indices than their parents, because [`TreeBuilder`] only
//! hands out ids for nodes it has already stored.
//!
//! ```text
//! thing.nested.get_value().unwrap()
//!
//!   #0 Local("thing")
//!   #1 Field { receiver: #0, name: "nested" }
//!   #2 Property { receiver: #1, name: "value" }
//!   #3 Unwrap(#2)            <- root
//! ```

use std::fmt;

/// Index into an [`ExprTree`] arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Literal values that can appear in a guard expression.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Literal {
    /// Integer literal, sign folded in (`-8`).
    Int(i64),
    Bool(bool),
    Str(Box<str>),
    /// A path naming a constant or unit variant (`None`, `MAX_LEN`).
    Constant(Box<str>),
    /// Float, char, byte-string and other literals (by kind only).
    Other(&'static str),
}

/// A node in an expression tree.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExprKind {
    /// A captured local or parameter (`thing`, `self`).
    Local(Box<str>),
    /// Field read (`receiver.name`, `receiver.0`).
    Field { receiver: ExprId, name: Box<str> },
    /// Property getter call (`receiver.get_name()`), prefix stripped.
    Property { receiver: ExprId, name: Box<str> },
    /// Nullable unwrap (`operand.unwrap()`); contributes no name.
    Unwrap(ExprId),
    /// Borrow (`&operand`, `&mut operand`); contributes no name.
    Borrow(ExprId),
    /// Dereference (`*operand`); contributes no name.
    Deref(ExprId),
    /// Parenthesised expression; contributes no name.
    Group(ExprId),
    /// Any method call that is not a getter or unwrap.
    MethodCall {
        receiver: ExprId,
        method: Box<str>,
        generic_args: Box<[Box<str>]>,
        args: Box<[ExprId]>,
    },
    /// Free function or associated function call.
    Call { callee: Box<str>, args: Box<[ExprId]> },
    /// Indexer access (`receiver[index]`).
    Index { receiver: ExprId, index: ExprId },
    Literal(Literal),
    /// `Default::default()` and `T::default()`.
    Default,
    /// `if .. { .. } else { .. }`.
    Conditional,
    /// Block-bodied expression.
    Block,
    /// `operand as T`.
    Cast(ExprId),
    /// Anything else, described by syntax kind.
    Other(Box<str>),
}

impl ExprKind {
    /// Short description of the node kind, used in trace output.
    pub fn describe(&self) -> &'static str {
        match self {
            ExprKind::Local(_) => "local",
            ExprKind::Field { .. } => "field",
            ExprKind::Property { .. } => "property",
            ExprKind::Unwrap(_) => "unwrap",
            ExprKind::Borrow(_) => "borrow",
            ExprKind::Deref(_) => "deref",
            ExprKind::Group(_) => "group",
            ExprKind::MethodCall { .. } => "method call",
            ExprKind::Call { .. } => "call",
            ExprKind::Index { .. } => "index",
            ExprKind::Literal(_) => "literal",
            ExprKind::Default => "default",
            ExprKind::Conditional => "conditional",
            ExprKind::Block => "block",
            ExprKind::Cast(_) => "cast",
            ExprKind::Other(_) => "other",
        }
    }

    /// Member name for field and property reads.
    pub fn member_name(&self) -> Option<&str> {
        match self {
            ExprKind::Field { name, .. } | ExprKind::Property { name, .. } => Some(name),
            _ => None,
        }
    }

    /// `true` for nodes that forward their operand unchanged.
    pub fn is_pass_through(&self) -> bool {
        matches!(
            self,
            ExprKind::Unwrap(_) | ExprKind::Borrow(_) | ExprKind::Deref(_) | ExprKind::Group(_)
        )
    }
}

/// An expression tree: node arena plus root.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ExprTree {
    nodes: Box<[ExprKind]>,
    root: ExprId,
}

impl ExprTree {
    /// The root node id.
    #[inline]
    pub fn root(&self) -> ExprId {
        self.root
    }

    /// Look up a node. Out-of-range ids return `None`.
    #[inline]
    pub fn get(&self, id: ExprId) -> Option<&ExprKind> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &ExprKind)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (ExprId::new(u32::try_from(i).unwrap_or(u32::MAX)), node))
    }
}

/// Incremental builder for [`ExprTree`].
///
/// Every method stores one node and returns its id. Child ids must come from
/// the same builder.
#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<ExprKind>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(kind);
        id
    }

    pub fn local(&mut self, name: &str) -> ExprId {
        self.alloc(ExprKind::Local(name.into()))
    }

    pub fn field(&mut self, receiver: ExprId, name: &str) -> ExprId {
        self.alloc(ExprKind::Field {
            receiver,
            name: name.into(),
        })
    }

    pub fn property(&mut self, receiver: ExprId, name: &str) -> ExprId {
        self.alloc(ExprKind::Property {
            receiver,
            name: name.into(),
        })
    }

    pub fn unwrap(&mut self, operand: ExprId) -> ExprId {
        self.alloc(ExprKind::Unwrap(operand))
    }

    pub fn borrow(&mut self, operand: ExprId) -> ExprId {
        self.alloc(ExprKind::Borrow(operand))
    }

    pub fn deref(&mut self, operand: ExprId) -> ExprId {
        self.alloc(ExprKind::Deref(operand))
    }

    pub fn group(&mut self, operand: ExprId) -> ExprId {
        self.alloc(ExprKind::Group(operand))
    }

    pub fn method_call(
        &mut self,
        receiver: ExprId,
        method: &str,
        generic_args: &[&str],
        args: &[ExprId],
    ) -> ExprId {
        self.alloc(ExprKind::MethodCall {
            receiver,
            method: method.into(),
            generic_args: generic_args.iter().map(|&arg| Box::from(arg)).collect(),
            args: args.into(),
        })
    }

    pub fn call(&mut self, callee: &str, args: &[ExprId]) -> ExprId {
        self.alloc(ExprKind::Call {
            callee: callee.into(),
            args: args.into(),
        })
    }

    pub fn index(&mut self, receiver: ExprId, index: ExprId) -> ExprId {
        self.alloc(ExprKind::Index { receiver, index })
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.alloc(ExprKind::Literal(Literal::Int(value)))
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.alloc(ExprKind::Literal(Literal::Bool(value)))
    }

    pub fn str(&mut self, value: &str) -> ExprId {
        self.alloc(ExprKind::Literal(Literal::Str(value.into())))
    }

    pub fn constant(&mut self, path: &str) -> ExprId {
        self.alloc(ExprKind::Literal(Literal::Constant(path.into())))
    }

    pub fn other_literal(&mut self, kind: &'static str) -> ExprId {
        self.alloc(ExprKind::Literal(Literal::Other(kind)))
    }

    pub fn default_value(&mut self) -> ExprId {
        self.alloc(ExprKind::Default)
    }

    pub fn conditional(&mut self) -> ExprId {
        self.alloc(ExprKind::Conditional)
    }

    pub fn block(&mut self) -> ExprId {
        self.alloc(ExprKind::Block)
    }

    pub fn cast(&mut self, operand: ExprId) -> ExprId {
        self.alloc(ExprKind::Cast(operand))
    }

    pub fn other(&mut self, description: &str) -> ExprId {
        self.alloc(ExprKind::Other(description.into()))
    }

    /// Finish the tree with `root` as its root node.
    pub fn finish(self, root: ExprId) -> ExprTree {
        ExprTree {
            nodes: self.nodes.into_boxed_slice(),
            root,
        }
    }
}

#[cfg(test)]
mod tests;
