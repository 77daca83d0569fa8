//! Dotted member paths.

use std::fmt;

use smallvec::SmallVec;

/// Ordered member names from a root local to the checked value.
///
/// Segments are stored outer-to-inner: `thing.nested.field` is
/// `["thing", "nested", "field"]`. A path is never empty and never
/// contains an empty segment; the constructors enforce both.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct MemberPath {
    segments: SmallVec<[Box<str>; 4]>,
}

impl MemberPath {
    /// Create a path consisting of only its root.
    ///
    /// Returns `None` if `root` is empty.
    pub fn root(root: &str) -> Option<Self> {
        if root.is_empty() {
            return None;
        }
        let mut segments = SmallVec::new();
        segments.push(Box::from(root));
        Some(MemberPath { segments })
    }

    /// Build a path from outer-to-inner segments.
    ///
    /// Returns `None` for an empty sequence or when any segment is empty.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        let segments: SmallVec<[Box<str>; 4]> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(MemberPath { segments })
    }

    /// Append an inner member. Empty names are rejected.
    pub fn push(&mut self, member: &str) -> bool {
        if member.is_empty() {
            return false;
        }
        self.segments.push(Box::from(member));
        true
    }

    /// The root local or parameter name.
    pub fn root_name(&self) -> &str {
        // Constructors guarantee at least one segment.
        self.segments.first().map_or("", |s| s)
    }

    /// Iterate segments outer-to-inner.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.segments.iter().map(AsRef::as_ref)
    }

    /// Number of segments, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `true` when the path reaches past its root (`thing.field`).
    #[inline]
    pub fn is_member_access(&self) -> bool {
        self.segments.len() > 1
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberPath({self})")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
