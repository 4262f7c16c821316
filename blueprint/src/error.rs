use crate::size::SizeError;
use strum::{Display, EnumIter};
use thiserror::Error;

/// The serialization format a customization was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum Format {
    #[strum(serialize = "JSON")]
    Json,
    #[strum(serialize = "TOML")]
    Toml,
}

/// Failure to decode a filesystem customization.
///
/// Every variant names the source format so messages can be shown verbatim to
/// whoever is editing the blueprint.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{format} unmarshal: {source}")]
    MalformedInput {
        format: Format,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{format} unmarshal: {field} must be {expected}, got {value} of type {kind}")]
    TypeMismatch {
        format: Format,
        field: &'static str,
        expected: &'static str,
        value: String,
        kind: &'static str,
    },

    #[error("{format} unmarshal: {field} is not valid filesystem size ({source})")]
    InvalidSizeFormat {
        format: Format,
        field: &'static str,
        #[source]
        source: SizeError,
    },

    #[error(
        "{format} unmarshal: {field} must be between 0 and {max} bytes, got {value}",
        max = u64::MAX
    )]
    SizeOutOfRange {
        format: Format,
        field: &'static str,
        value: String,
    },
}

impl DecodeError {
    /// The format whose decoder produced this error.
    pub fn format(&self) -> Format {
        match self {
            DecodeError::MalformedInput { format, .. }
            | DecodeError::TypeMismatch { format, .. }
            | DecodeError::InvalidSizeFormat { format, .. }
            | DecodeError::SizeOutOfRange { format, .. } => *format,
        }
    }

    /// The offending field, if the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecodeError::MalformedInput { .. } => None,
            DecodeError::TypeMismatch { field, .. }
            | DecodeError::InvalidSizeFormat { field, .. }
            | DecodeError::SizeOutOfRange { field, .. } => Some(field),
        }
    }
}
