//! URI references for the absolute/relative checks.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::messages;
use crate::value::Nullable;

/// Which kinds of reference a [`Uri`] constructor accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UriKind {
    Absolute,
    Relative,
    RelativeOrAbsolute,
}

impl UriKind {
    /// Message for a check that rejected a URI of this kind.
    pub fn rejection_message(self) -> &'static str {
        match self {
            UriKind::Relative => messages::RELATIVE_URI,
            UriKind::Absolute | UriKind::RelativeOrAbsolute => messages::ABSOLUTE_URI,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum UriError {
    #[error("invalid URI `{input}`: {source}")]
    Invalid {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("`{0}` is not an absolute URI")]
    NotAbsolute(String),

    #[error("`{0}` is not a relative URI")]
    NotRelative(String),
}

/// An absolute URL or a relative reference.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Uri {
    Absolute(Url),
    Relative(String),
}

impl Uri {
    /// Parse `input`, requiring the given kind.
    pub fn new(input: &str, kind: UriKind) -> Result<Self, UriError> {
        match Url::parse(input) {
            Ok(_) if kind == UriKind::Relative => Err(UriError::NotRelative(input.to_owned())),
            Ok(url) => Ok(Uri::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) if kind == UriKind::Absolute => {
                Err(UriError::NotAbsolute(input.to_owned()))
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Uri::Relative(input.to_owned())),
            Err(source) => Err(UriError::Invalid {
                input: input.to_owned(),
                source,
            }),
        }
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        matches!(self, Uri::Absolute(_))
    }

    /// `Absolute` or `Relative`; never `RelativeOrAbsolute`.
    pub fn kind(&self) -> UriKind {
        match self {
            Uri::Absolute(_) => UriKind::Absolute,
            Uri::Relative(_) => UriKind::Relative,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Uri::Absolute(url) => url.as_str(),
            Uri::Relative(reference) => reference,
        }
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::new(s, UriKind::RelativeOrAbsolute)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Nullable for Uri {
    type Value = Uri;

    fn value(&self) -> Option<&Uri> {
        Some(self)
    }
}
