//! # trellis-id
//!
//! Stable identifier types and the global identifier classifier.
//!
//! ## ID Format
//!
//! Every identifier is a 4-character type prefix followed by a ULID:
//! `{prefix}{ulid}`, where the prefix already ends in an underscore.
//!
//! Examples:
//! - `usr_01F8MECHZX3TBDSZ7XRADM79XV`
//!
//! The prefix tells any component which entity table an identifier belongs
//! to without a database round trip. [`PrefixRegistry::classify`] performs
//! that lookup; typed wrappers such as [`UserId`] parse and mint identifiers
//! for a single entity.
//!
//! - Sortability: the ULID is time-ordered
//! - Uniqueness: the ULID has 80 bits of randomness
//! - One prefix per entity type, never reused or reassigned

mod error;
mod macros;
mod registry;
mod types;

pub use error::{ClassifyError, IdError, RegistryError};
pub use registry::{split_prefix, EntityType, PrefixRegistry, PREFIX_LEN};
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;
