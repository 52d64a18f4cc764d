//! Strongly-typed value objects used by domain entities.
//!
//! Aggregates carry these wrappers instead of raw primitives so that
//! identifiers and enumerations are checked once at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier could not be parsed as a UUID.
    #[error("{0} must be a valid UUID")]
    InvalidId(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for UUID based identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parses an identifier from its textual form.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidId($field))
            }

            /// Returns the raw UUID backing this identifier.
            pub const fn get(self) -> Uuid {
                self.0
            }

            /// Hyphenated lower-case form used for persistence.
            pub fn to_db(self) -> String {
                self.0.hyphenated().to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(GenreId, "Unique identifier for a genre.", "genre_id");
id_newtype!(
    CastMemberId,
    "Unique identifier for a cast member.",
    "cast_member_id"
);

/// Role a cast member plays in a production.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub enum CastMemberType {
    Director,
    Actor,
}

impl CastMemberType {
    /// Integer representation used in persistence and on the wire.
    pub const fn code(self) -> i32 {
        match self {
            Self::Director => 1,
            Self::Actor => 2,
        }
    }
}

impl Display for CastMemberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Director => write!(f, "director"),
            Self::Actor => write!(f, "actor"),
        }
    }
}

impl TryFrom<i32> for CastMemberType {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Director),
            2 => Ok(Self::Actor),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "cast member type: {other}"
            ))),
        }
    }
}

impl From<CastMemberType> for i32 {
    fn from(value: CastMemberType) -> Self {
        value.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphenated_ids() {
        let id = CategoryId::new();
        let parsed = CategoryId::parse(&id.to_db()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_malformed_ids() {
        let err = GenreId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidId("genre_id"));
    }

    #[test]
    fn db_form_is_lower_case() {
        let id = CastMemberId::from(Uuid::from_u128(0xABCDEF));
        assert_eq!(id.to_db(), "00000000-0000-0000-0000-000000abcdef");
    }

    #[test]
    fn cast_member_type_codes() {
        assert_eq!(CastMemberType::try_from(1).unwrap(), CastMemberType::Director);
        assert_eq!(CastMemberType::Actor.code(), 2);
        assert!(CastMemberType::try_from(3).is_err());
    }
}
