use thiserror::Error;

use crate::property::value::ValueKind;

/// Why a property write was not applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("unknown property '{0}'")]
    UnknownKey(String),
    #[error("index {index} out of range for '{category}' (count {count})")]
    IndexOutOfRange {
        category: String,
        index: usize,
        count: usize,
    },
    #[error("property '{key}' expects {expected}")]
    TypeMismatch { key: String, expected: ValueKind },
    #[error("property '{0}' must be finite and within coordinate bounds")]
    NonFinite(String),
    #[error("count {requested} for '{key}' exceeds limit {max}")]
    LimitExceeded {
        key: String,
        requested: u64,
        max: usize,
    },
    #[error("property '{0}' is read-only in the current connection mode")]
    ReadOnly(String),
    #[error("property '{0}' cannot be solved for the current curve")]
    Unsolvable(String),
}

impl PropertyError {
    /// Stable machine-readable code for host result envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            PropertyError::UnknownKey(_) => "unknown_key",
            PropertyError::IndexOutOfRange { .. } => "index_out_of_range",
            PropertyError::TypeMismatch { .. } => "type_mismatch",
            PropertyError::NonFinite(_) => "non_finite",
            PropertyError::LimitExceeded { .. } => "limit_exceeded",
            PropertyError::ReadOnly(_) => "read_only",
            PropertyError::Unsolvable(_) => "unsolvable",
        }
    }

    /// Whether the key was recognized at all; only unknown keys fall back to static fields.
    pub fn is_handled(&self) -> bool {
        !matches!(self, PropertyError::UnknownKey(_))
    }
}

pub type Result<T> = std::result::Result<T, PropertyError>;
