use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::types::CategoryId;
use crate::domain::validation::{self, ValidationResult};

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 10_000;

/// Catalog category aggregate root.
///
/// Fields are private so every mutation goes through [`Category::update`],
/// [`Category::activate`] or [`Category::deactivate`], which keep the name and
/// description rules enforced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
    is_active: bool,
    created_at: NaiveDateTime,
}

impl Category {
    /// Builds a brand-new category with a fresh id and creation timestamp.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        is_active: bool,
    ) -> Result<Self, validation::EntityValidationError> {
        let category = Self {
            id: CategoryId::new(),
            name: name.into(),
            description: description.into(),
            is_active,
            created_at: Utc::now().naive_utc(),
        };
        category.validate()?;
        Ok(category)
    }

    /// Rebuilds a category from persisted state.
    pub fn restore(
        id: CategoryId,
        name: String,
        description: String,
        is_active: bool,
        created_at: NaiveDateTime,
    ) -> Result<Self, validation::EntityValidationError> {
        let category = Self {
            id,
            name,
            description,
            is_active,
            created_at,
        };
        category.validate()?;
        Ok(category)
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Replaces the name and, when given, the description.
    ///
    /// The aggregate is left untouched if the new values are invalid.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ValidationResult {
        let mut candidate = self.clone();
        candidate.name = name.into();
        if let Some(description) = description {
            candidate.description = description;
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    pub fn activate(&mut self) -> ValidationResult {
        self.is_active = true;
        self.validate()
    }

    pub fn deactivate(&mut self) -> ValidationResult {
        self.is_active = false;
        self.validate()
    }

    fn validate(&self) -> ValidationResult {
        validation::not_null_or_empty(&self.name, "Name")?;
        validation::min_length(&self.name, NAME_MIN_LENGTH, "Name")?;
        validation::max_length(&self.name, NAME_MAX_LENGTH, "Name")?;
        validation::max_length(&self.description, DESCRIPTION_MAX_LENGTH, "Description")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_is_stamped() {
        let before = Utc::now().naive_utc();
        let category = Category::new("Actions", "d", true).unwrap();
        assert!(!category.id().get().is_nil());
        assert!(category.created_at() >= before);
        assert!(category.is_active());
        assert_eq!(category.description(), "d");
    }

    #[test]
    fn rejects_short_and_long_names() {
        assert_eq!(
            Category::new("ab", "", true).unwrap_err().to_string(),
            "Name should be at least 3 characters long"
        );
        assert_eq!(
            Category::new("a".repeat(256), "", true)
                .unwrap_err()
                .to_string(),
            "Name should be less or equal 255 characters long"
        );
        assert_eq!(
            Category::new("  ", "", true).unwrap_err().to_string(),
            "Name should not be null or empty"
        );
    }

    #[test]
    fn rejects_long_description() {
        let err = Category::new("Actions", "x".repeat(10_001), true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Description should be less or equal 10000 characters long"
        );
    }

    #[test]
    fn update_without_description_keeps_it() {
        let mut category = Category::new("Actions", "original", true).unwrap();
        category.update("Dramas", None).unwrap();
        assert_eq!(category.name(), "Dramas");
        assert_eq!(category.description(), "original");
    }

    #[test]
    fn failed_update_leaves_category_untouched() {
        let mut category = Category::new("Actions", "original", true).unwrap();
        assert!(category.update("ab", Some("new".into())).is_err());
        assert_eq!(category.name(), "Actions");
        assert_eq!(category.description(), "original");
    }

    #[test]
    fn toggles_activation() {
        let mut category = Category::new("Actions", "", true).unwrap();
        category.deactivate().unwrap();
        assert!(!category.is_active());
        category.activate().unwrap();
        assert!(category.is_active());
    }
}
