//! Guard failures.

use std::fmt;

use guardian_resolve::Resolution;

use crate::uri::UriKind;
use crate::value::RangeConstraint;

/// Failure messages, one per failure kind.
pub(crate) mod messages {
    pub const NULL: &str = "Value cannot be null.";
    pub const EMPTY: &str = "Value cannot be empty.";
    pub const NULL_ELEMENTS: &str = "Value cannot contain null elements.";
    pub const POSITIVE: &str = "Value cannot be positive.";
    pub const POSITIVE_OR_ZERO: &str = "Value cannot be positive or zero.";
    pub const NEGATIVE: &str = "Value cannot be negative.";
    pub const NEGATIVE_OR_ZERO: &str = "Value cannot be negative or zero.";
    pub const RELATIVE_URI: &str = "Value cannot be a relative URI.";
    pub const ABSOLUTE_URI: &str = "Value cannot be an absolute URI.";
    pub const UNSUPPORTED: &str = "The expression used in the Guard clause is not supported.";
}

/// The name attached to a failure.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Parameter {
    Named(String),
    /// The expression could not be named.
    Unknown,
}

impl Parameter {
    /// Display name of [`Parameter::Unknown`].
    pub const SENTINEL: &'static str = "unknown";

    pub fn named(name: impl Into<String>) -> Self {
        Parameter::Named(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Parameter::Named(name) => name,
            Parameter::Unknown => Self::SENTINEL,
        }
    }

    /// `true` for dotted member paths such as `thing.field`.
    pub fn is_member_path(&self) -> bool {
        matches!(self, Parameter::Named(name) if name.contains('.'))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Parameter::Unknown)
    }
}

impl From<Resolution> for Parameter {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Resolved(path) => Parameter::Named(path.to_string()),
            Resolution::Unsupported => Parameter::Unknown,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure kinds, for matching without destructuring.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FailureKind {
    NullArgument,
    EmptyArgument,
    ContainsNullElements,
    OutOfRange,
    InvalidUriKind,
    UnsupportedExpression,
}

/// A failed guard clause.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GuardError {
    #[error("{} (Parameter '{parameter}')", messages::NULL)]
    NullArgument { parameter: Parameter },

    #[error("{} (Parameter '{parameter}')", messages::EMPTY)]
    EmptyArgument { parameter: Parameter },

    #[error("{} (Parameter '{parameter}')", messages::NULL_ELEMENTS)]
    ContainsNullElements { parameter: Parameter },

    #[error("{} (Parameter '{parameter}')\nActual value was {actual}.", .constraint.message())]
    OutOfRange {
        parameter: Parameter,
        actual: i64,
        constraint: RangeConstraint,
    },

    #[error("{} (Parameter '{parameter}')", .found.rejection_message())]
    InvalidUriKind { parameter: Parameter, found: UriKind },

    #[error("{}", messages::UNSUPPORTED)]
    UnsupportedExpression,
}

impl GuardError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GuardError::NullArgument { .. } => FailureKind::NullArgument,
            GuardError::EmptyArgument { .. } => FailureKind::EmptyArgument,
            GuardError::ContainsNullElements { .. } => FailureKind::ContainsNullElements,
            GuardError::OutOfRange { .. } => FailureKind::OutOfRange,
            GuardError::InvalidUriKind { .. } => FailureKind::InvalidUriKind,
            GuardError::UnsupportedExpression => FailureKind::UnsupportedExpression,
        }
    }

    /// The offending parameter; `None` for unsupported expressions.
    pub fn parameter(&self) -> Option<&Parameter> {
        match self {
            GuardError::NullArgument { parameter }
            | GuardError::EmptyArgument { parameter }
            | GuardError::ContainsNullElements { parameter }
            | GuardError::OutOfRange { parameter, .. }
            | GuardError::InvalidUriKind { parameter, .. } => Some(parameter),
            GuardError::UnsupportedExpression => None,
        }
    }

    /// The rejected value of a range failure.
    pub fn actual_value(&self) -> Option<i64> {
        match self {
            GuardError::OutOfRange { actual, .. } => Some(*actual),
            _ => None,
        }
    }

    /// The message without the parameter suffix.
    pub fn message(&self) -> &'static str {
        match self {
            GuardError::NullArgument { .. } => messages::NULL,
            GuardError::EmptyArgument { .. } => messages::EMPTY,
            GuardError::ContainsNullElements { .. } => messages::NULL_ELEMENTS,
            GuardError::OutOfRange { constraint, .. } => constraint.message(),
            GuardError::InvalidUriKind { found, .. } => found.rejection_message(),
            GuardError::UnsupportedExpression => messages::UNSUPPORTED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_ir::MemberPath;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_with_parameter() {
        let err = GuardError::NullArgument {
            parameter: Parameter::named("thing.field"),
        };
        assert_eq!(
            err.to_string(),
            "Value cannot be null. (Parameter 'thing.field')"
        );
        assert!(err.parameter().is_some_and(Parameter::is_member_path));
    }

    #[test]
    fn test_display_out_of_range() {
        let err = GuardError::OutOfRange {
            parameter: Parameter::named("count"),
            actual: 8,
            constraint: RangeConstraint::Positive,
        };
        assert_eq!(
            err.to_string(),
            "Value cannot be positive. (Parameter 'count')\nActual value was 8."
        );
        assert_eq!(err.actual_value(), Some(8));
        assert_eq!(err.kind(), FailureKind::OutOfRange);
    }

    #[test]
    fn test_display_unknown_and_unsupported() {
        let err = GuardError::InvalidUriKind {
            parameter: Parameter::Unknown,
            found: UriKind::Relative,
        };
        assert_eq!(
            err.to_string(),
            "Value cannot be a relative URI. (Parameter 'unknown')"
        );
        assert_eq!(
            GuardError::UnsupportedExpression.to_string(),
            messages::UNSUPPORTED
        );
        assert_eq!(GuardError::UnsupportedExpression.parameter(), None);
    }

    #[test]
    fn test_parameter_from_resolution() {
        let path = MemberPath::from_segments(["thing", "nested"]);
        let resolved = path.map_or(Parameter::Unknown, |p| {
            Parameter::from(Resolution::Resolved(p))
        });
        assert_eq!(resolved, Parameter::named("thing.nested"));
        assert_eq!(
            Parameter::from(Resolution::Unsupported).name(),
            Parameter::SENTINEL
        );
        assert!(!Parameter::named("thing").is_member_path());
        assert!(!Parameter::Unknown.is_member_path());
    }
}
