//! Typed ID definitions for every entity.
//!
//! Each ID type has a unique 4-character prefix that identifies the entity
//! type. IDs are ULID-based for sortability and uniqueness.

use crate::define_id;
use crate::registry::EntityType;

// =============================================================================
// Identity
// =============================================================================

define_id!(UserId, "usr_", EntityType::User);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdError, Ulid};

    #[test]
    fn test_user_id_roundtrip() {
        let id = UserId::new();
        let s = id.to_string();
        let parsed: UserId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_prefix() {
        let id = UserId::new();
        let s = id.to_string();
        assert!(s.starts_with("usr_"));
        assert_eq!(s.len(), 4 + 26);
    }

    #[test]
    fn test_user_id_invalid_prefix() {
        let result: Result<UserId, _> = "ord_01F8MECHZX3TBDSZ7XRADM79XV".parse();
        assert_eq!(
            result.unwrap_err(),
            IdError::InvalidPrefix {
                expected: "usr_",
                actual: "ord_".to_string(),
            }
        );
    }

    #[test]
    fn test_user_id_too_short() {
        let result: Result<UserId, _> = "usr".parse();
        let err = result.unwrap_err();
        assert_eq!(err, IdError::TooShort { actual: 3 });
        assert!(err.is_prefix_error());
    }

    #[test]
    fn test_user_id_empty() {
        let result: Result<UserId, _> = "".parse();
        assert!(result.unwrap_err().is_empty());
    }

    #[test]
    fn test_user_id_invalid_ulid() {
        let result: Result<UserId, _> = "usr_invalid".parse();
        assert!(matches!(result.unwrap_err(), IdError::InvalidUlid(_)));
    }

    #[test]
    fn test_user_id_json_roundtrip() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_json_rejects_foreign_prefix() {
        let result: Result<UserId, _> =
            serde_json::from_str("\"ord_01F8MECHZX3TBDSZ7XRADM79XV\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_user_id_sortable() {
        let id1 = UserId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = UserId::new();
        // ULIDs are time-ordered, and so is the string form
        assert!(id1 < id2);
        assert!(id1.to_string() < id2.to_string());
    }

    #[test]
    fn test_user_id_from_ulid() {
        let ulid = Ulid::from_parts(1_700_000_000_000, 42);
        let id = UserId::from_ulid(ulid);

        assert_eq!(id.ulid(), ulid);
        assert_eq!(id.timestamp_ms(), 1_700_000_000_000);
        assert_eq!(id.to_string(), format!("usr_{ulid}"));
        assert_eq!(UserId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_user_id_entity() {
        assert_eq!(UserId::ENTITY, EntityType::User);
        assert_eq!(UserId::ENTITY.prefix(), UserId::PREFIX);
    }

    #[test]
    fn test_all_id_prefixes_unique() {
        let prefixes: Vec<_> = EntityType::ALL.iter().map(|e| e.prefix()).collect();
        let unique: std::collections::HashSet<_> = prefixes.iter().collect();
        assert_eq!(prefixes.len(), unique.len(), "Duplicate ID prefixes found!");
    }
}
