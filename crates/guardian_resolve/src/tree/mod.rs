//! Expression-tree backend.

use guardian_ir::{ExprId, ExprKind, ExprTree, MemberPath};

use crate::{NameResolver, Resolution, Shape};

/// Resolves names by walking an [`ExprTree`] from its root down to a local.
///
/// Field and property reads contribute their names. Unwraps, borrows,
/// dereferences and parentheses are walked through without contributing
/// anything. Every
/// other node ends the walk as unsupported.
#[derive(Copy, Clone, Debug, Default)]
pub struct TreeResolver;

impl NameResolver for TreeResolver {
    #[tracing::instrument(level = "trace", skip_all)]
    fn resolve(&self, shape: &Shape) -> Resolution {
        let Shape::Tree(tree) = shape else {
            tracing::debug!(shape = shape.describe(), "tree resolver needs an expression tree");
            return Resolution::Unsupported;
        };
        match walk(tree) {
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
    #[error("{kind} node {id:?} is not a member access")]
    NotMemberAccess { id: ExprId, kind: &'static str },

    #[error("node {0:?} is out of range")]
    Dangling(ExprId),

    #[error("member chain does not reach a local")]
    Unterminated,

    #[error("member chain contains an empty name")]
    EmptyName,
}

fn walk(tree: &ExprTree) -> Result<MemberPath, Reject> {
    let mut names: Vec<&str> = Vec::new();
    let mut id = tree.root();

    // Each node is visited at most once on a well-formed chain.
    for _ in 0..=tree.len() {
        let node = tree.get(id).ok_or(Reject::Dangling(id))?;
        tracing::trace!(?id, kind = node.describe(), "tree step");
        match node {
            ExprKind::Local(root) => {
                let segments = std::iter::once(&**root).chain(names.iter().rev().copied());
                return MemberPath::from_segments(segments).ok_or(Reject::EmptyName);
            }
            ExprKind::Field { receiver, name } | ExprKind::Property { receiver, name } => {
                names.push(name);
                id = *receiver;
            }
            ExprKind::Unwrap(operand)
            | ExprKind::Borrow(operand)
            | ExprKind::Deref(operand)
            | ExprKind::Group(operand) => {
                id = *operand;
            }
            other => {
                return Err(Reject::NotMemberAccess {
                    id,
                    kind: other.describe(),
                })
            }
        }
    }
    Err(Reject::Unterminated)
}
