//! Prefix registry and the global identifier classifier.
//!
//! Identifiers carry their entity type in a fixed-width prefix. The registry
//! maps each prefix to exactly one [`EntityType`]; it is built once at startup
//! and handed to whatever needs to answer "what kind of object is this ID
//! for" without touching the database.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ClassifyError, RegistryError};
use crate::types::UserId;

/// Width of the type prefix, in characters.
pub const PREFIX_LEN: usize = 4;

/// Splits an identifier into its type prefix and the remainder.
///
/// Returns `None` when the identifier is shorter than [`PREFIX_LEN`]
/// characters. The split always lands on a character boundary.
pub fn split_prefix(id: &str) -> Option<(&str, &str)> {
    let end = match id.char_indices().nth(PREFIX_LEN) {
        Some((idx, _)) => idx,
        None if id.chars().count() == PREFIX_LEN => id.len(),
        None => return None,
    };
    Some(id.split_at(end))
}

// =============================================================================
// Entity Types
// =============================================================================

/// Every entity kind that mints identifiers.
///
/// Adding an entity means adding a variant here and a `define_id!` line in
/// `types.rs`; the compiler then points at every match that needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityType {
    User,
}

impl EntityType {
    /// All compiled-in entity types.
    pub const ALL: [EntityType; 1] = [EntityType::User];

    /// The identifier prefix assigned to this entity type.
    pub const fn prefix(self) -> &'static str {
        match self {
            EntityType::User => UserId::PREFIX,
        }
    }

    /// The table that owns identifiers of this type.
    pub const fn table_name(self) -> &'static str {
        match self {
            EntityType::User => "users",
        }
    }

    /// The GraphQL object type name.
    pub const fn type_name(self) -> &'static str {
        match self {
            EntityType::User => "User",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable prefix → entity type mapping.
///
/// Construct once and share it (typically behind an `Arc`); every method takes
/// `&self`, so concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct PrefixRegistry {
    entries: HashMap<&'static str, EntityType>,
}

impl PrefixRegistry {
    /// Creates a registry holding every compiled-in entity type.
    pub fn new() -> Self {
        let entries = EntityType::ALL
            .iter()
            .map(|entity| (entity.prefix(), *entity))
            .collect();
        Self { entries }
    }

    /// Creates a registry holding only the given entity types.
    ///
    /// Passing the same entity twice is harmless; two entities sharing a
    /// prefix is an error.
    pub fn from_entities<I>(entities: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = EntityType>,
    {
        let mut entries = HashMap::new();
        for entity in entities {
            if let Some(existing) = entries.insert(entity.prefix(), entity) {
                if existing != entity {
                    return Err(RegistryError::DuplicatePrefix {
                        prefix: entity.prefix(),
                        existing,
                        duplicate: entity,
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Maps an identifier to the entity type that minted it.
    pub fn classify(&self, id: &str) -> Result<EntityType, ClassifyError> {
        let Some((prefix, _)) = split_prefix(id) else {
            return Err(ClassifyError::Malformed { id: id.to_string() });
        };

        self.entity_for_prefix(prefix)
            .ok_or_else(|| ClassifyError::UnknownPrefix {
                prefix: prefix.to_string(),
                id: id.to_string(),
            })
    }

    /// Maps an identifier to the name of the table that owns it.
    pub fn table_name(&self, id: &str) -> Result<&'static str, ClassifyError> {
        self.classify(id).map(EntityType::table_name)
    }

    /// Looks up a bare prefix.
    pub fn entity_for_prefix(&self, prefix: &str) -> Option<EntityType> {
        self.entries.get(prefix).copied()
    }

    /// Number of registered prefixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no prefixes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(prefix, entity)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, EntityType)> + '_ {
        self.entries.iter().map(|(prefix, entity)| (*prefix, *entity))
    }
}

impl Default for PrefixRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
