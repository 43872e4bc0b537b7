//! Macros for defining typed ID types.

/// Defines a ULID newtype whose string form carries `$prefix` and which
/// belongs to `$entity`.
///
/// The prefix must be exactly [`crate::PREFIX_LEN`] ASCII characters, checked
/// at compile time. Ordering follows the ULID, so ids sort by creation time.
/// Serde uses the prefixed string form.
///
/// # Example
///
/// ```ignore
/// define_id!(UserId, "usr_", EntityType::User);
///
/// let user_id = UserId::new();
/// let parsed: UserId = "usr_01F8MECHZX3TBDSZ7XRADM79XV".parse()?;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal, $entity:expr) => {
        /// A typed ID for this entity type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::Ulid);

        const _: () = assert!(
            $prefix.is_ascii() && $prefix.len() == $crate::PREFIX_LEN,
            "ID prefix must be exactly 4 ASCII characters"
        );

        impl $name {
            /// The prefix for this ID type.
            pub const PREFIX: &'static str = $prefix;

            /// The entity type this ID belongs to.
            pub const ENTITY: $crate::EntityType = $entity;

            #[must_use]
            pub fn new() -> Self {
                Self($crate::Ulid::new())
            }

            /// Wraps an existing ULID, e.g. one minted at a known instant.
            #[must_use]
            pub const fn from_ulid(ulid: $crate::Ulid) -> Self {
                Self(ulid)
            }

            #[must_use]
            pub const fn ulid(&self) -> $crate::Ulid {
                self.0
            }

            /// Creation time encoded in the ULID, in Unix milliseconds.
            #[must_use]
            pub fn timestamp_ms(&self) -> u64 {
                self.0.timestamp_ms()
            }

            /// Parses `{prefix}{ulid}`.
            pub fn parse(s: &str) -> Result<Self, $crate::IdError> {
                if s.is_empty() {
                    return Err($crate::IdError::Empty);
                }

                let Some((prefix, ulid_str)) = $crate::split_prefix(s) else {
                    return Err($crate::IdError::TooShort {
                        actual: s.chars().count(),
                    });
                };

                if prefix != Self::PREFIX {
                    return Err($crate::IdError::InvalidPrefix {
                        expected: Self::PREFIX,
                        actual: prefix.to_string(),
                    });
                }

                let ulid = ulid_str
                    .parse::<$crate::Ulid>()
                    .map_err(|e| $crate::IdError::InvalidUlid(e.to_string()))?;

                Ok(Self(ulid))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", Self::PREFIX, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
