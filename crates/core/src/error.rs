//! Typed error types for tokenizing, indexing, and binding.

use std::error::Error as StdError;
use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SwitchError> = std::result::Result<T, E>;

/// Failure conditions raised while tokenizing, indexing, or binding arguments.
///
/// Binding never recovers from an error: the first failure aborts the whole
/// bind and surfaces here with the offending member (or slot) named.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    // -- Tokenizer --
    /// An embedded command line was empty or contained only whitespace.
    #[error("cannot tokenize an empty embedded command line")]
    EmptyInput,

    // -- Literal coercion --
    /// A literal value named no variant of the target enum.
    #[error("{member}: type {type_name} mismatch for literal value `{value}`")]
    TypeMismatch {
        /// Member, switch, or slot being bound.
        member: String,
        /// Name of the target type.
        type_name: &'static str,
        /// The raw text that failed to convert.
        value: String,
    },

    /// A `FromStr`-backed literal rejected its input.
    #[error("{member}: cannot convert `{value}` to {type_name}: {source}")]
    Conversion {
        /// Member, switch, or slot being bound.
        member: String,
        /// Name of the target type.
        type_name: &'static str,
        /// The raw text that failed to convert.
        value: String,
        /// The parser's own error, kept intact.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    // -- Shapes --
    /// No binding rule applies to the target shape.
    #[error("{member}: the data type {type_name} is not supported")]
    UnsupportedType {
        /// Member, switch, or slot being bound.
        member: String,
        /// Name of the offending type.
        type_name: &'static str,
    },

    // -- Sources --
    /// A source value was malformed or a referenced resource is unavailable.
    #[error("{subject}: {reason}")]
    InvalidArgument {
        /// What the argument refers to (member name or resource name).
        subject: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A line source failed while reading a response resource.
    #[error("failed reading response `{name}`")]
    Response {
        /// Name of the response resource.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl SwitchError {
    pub(crate) fn mismatch(member: &str, type_name: &'static str, value: &str) -> Self {
        SwitchError::TypeMismatch {
            member: member.to_string(),
            type_name,
            value: value.to_string(),
        }
    }

    /// Build a [`SwitchError::Conversion`] from a parser's error.
    pub fn conversion<E>(member: &str, type_name: &'static str, value: &str, source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        SwitchError::Conversion {
            member: member.to_string(),
            type_name,
            value: value.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn unsupported(member: &str, type_name: &'static str) -> Self {
        SwitchError::UnsupportedType {
            member: member.to_string(),
            type_name,
        }
    }

    pub(crate) fn invalid(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        SwitchError::InvalidArgument {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    /// Name of the member or slot the error refers to, when there is one.
    pub fn member(&self) -> Option<&str> {
        match self {
            SwitchError::TypeMismatch { member, .. }
            | SwitchError::Conversion { member, .. }
            | SwitchError::UnsupportedType { member, .. } => Some(member),
            SwitchError::InvalidArgument { subject, .. } => Some(subject),
            SwitchError::Response { name, .. } => Some(name),
            SwitchError::EmptyInput => None,
        }
    }
}
