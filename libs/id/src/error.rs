//! Error types for ID parsing, classification, and registry construction.

use thiserror::Error;

use crate::registry::{EntityType, PREFIX_LEN};

/// Errors that can occur when parsing a typed ID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The ID string is empty.
    #[error("ID cannot be empty")]
    Empty,

    /// The ID is shorter than the type prefix.
    #[error("ID too short: expected at least {} characters, got {actual}", PREFIX_LEN)]
    TooShort { actual: usize },

    /// The ID carries the prefix of another type.
    #[error("invalid ID prefix: expected '{expected}', got '{actual}'")]
    InvalidPrefix {
        expected: &'static str,
        actual: String,
    },

    /// The ULID portion of the ID is invalid.
    #[error("invalid ULID: {0}")]
    InvalidUlid(String),
}

impl IdError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty)
    }

    /// Returns true if this error indicates a prefix mismatch.
    pub fn is_prefix_error(&self) -> bool {
        matches!(self, IdError::TooShort { .. } | IdError::InvalidPrefix { .. })
    }
}

/// Errors returned when mapping an identifier to its entity type.
///
/// Neither is fatal: callers treat `Malformed` as bad client input and
/// `UnknownPrefix` as a failed lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// The identifier is shorter than the fixed prefix width.
    #[error("could not map id '{id}' to a type: shorter than {} characters", PREFIX_LEN)]
    Malformed { id: String },

    /// The prefix is well-formed but not present in the registry.
    #[error("could not map id prefix '{prefix}' to a type (id '{id}')")]
    UnknownPrefix { prefix: String, id: String },
}

impl ClassifyError {
    /// The identifier that failed to classify.
    pub fn id(&self) -> &str {
        match self {
            ClassifyError::Malformed { id } | ClassifyError::UnknownPrefix { id, .. } => id,
        }
    }

    /// The offending prefix, when the identifier was long enough to have one.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            ClassifyError::Malformed { .. } => None,
            ClassifyError::UnknownPrefix { prefix, .. } => Some(prefix),
        }
    }
}

/// Errors raised while building a [`crate::PrefixRegistry`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two entity types claim the same prefix.
    #[error("prefix '{prefix}' assigned to both {existing:?} and {duplicate:?}")]
    DuplicatePrefix {
        prefix: &'static str,
        existing: EntityType,
        duplicate: EntityType,
    },
}
