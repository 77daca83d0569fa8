use guardian_ir::{CompiledClosure, ExprTree, MemberPath};

/// The inspectable form of a guard expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Shape {
    /// Expression tree recorded at compile time.
    Tree(ExprTree),
    /// Compiled closure body with its token table.
    Compiled(CompiledClosure),
}

impl Shape {
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Tree(_) => "expression tree",
            Shape::Compiled(_) => "compiled closure",
        }
    }
}

impl From<ExprTree> for Shape {
    fn from(tree: ExprTree) -> Self {
        Shape::Tree(tree)
    }
}

impl From<CompiledClosure> for Shape {
    fn from(closure: CompiledClosure) -> Self {
        Shape::Compiled(closure)
    }
}

/// Outcome of resolving a [`Shape`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Resolution {
    Resolved(MemberPath),
    /// The shape is not a member-access chain rooted at a local.
    Unsupported,
}

impl Resolution {
    #[inline]
    pub fn is_supported(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn path(&self) -> Option<&MemberPath> {
        match self {
            Resolution::Resolved(path) => Some(path),
            Resolution::Unsupported => None,
        }
    }

    pub fn into_path(self) -> Option<MemberPath> {
        match self {
            Resolution::Resolved(path) => Some(path),
            Resolution::Unsupported => None,
        }
    }
}
