use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::types::{CastMemberId, CastMemberType};
use crate::domain::validation::{self, ValidationResult};

/// A person credited on catalog titles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMember {
    id: CastMemberId,
    name: String,
    kind: CastMemberType,
    created_at: NaiveDateTime,
}

impl CastMember {
    pub fn new(
        name: impl Into<String>,
        kind: CastMemberType,
    ) -> Result<Self, validation::EntityValidationError> {
        let member = Self {
            id: CastMemberId::new(),
            name: name.into(),
            kind,
            created_at: Utc::now().naive_utc(),
        };
        member.validate()?;
        Ok(member)
    }

    pub fn restore(
        id: CastMemberId,
        name: String,
        kind: CastMemberType,
        created_at: NaiveDateTime,
    ) -> Result<Self, validation::EntityValidationError> {
        let member = Self {
            id,
            name,
            kind,
            created_at,
        };
        member.validate()?;
        Ok(member)
    }

    pub fn id(&self) -> CastMemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CastMemberType {
        self.kind
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn update(&mut self, name: impl Into<String>, kind: CastMemberType) -> ValidationResult {
        let name = name.into();
        validation::not_null_or_empty(&name, "Name")?;
        self.name = name;
        self.kind = kind;
        Ok(())
    }

    fn validate(&self) -> ValidationResult {
        validation::not_null_or_empty(&self.name, "Name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_cast_member() {
        let member = CastMember::new("Jane Doe", CastMemberType::Actor).unwrap();
        assert_eq!(member.name(), "Jane Doe");
        assert_eq!(member.kind(), CastMemberType::Actor);
    }

    #[test]
    fn rejects_blank_names() {
        let err = CastMember::new(" ", CastMemberType::Director).unwrap_err();
        assert_eq!(err.to_string(), "Name should not be null or empty");
    }
}
