use std::collections::BTreeSet;

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::types::{CategoryId, GenreId};
use crate::domain::validation::{self, ValidationResult};

/// Genre aggregate root.
///
/// `categories` is the in-memory side of the genre/category relation. It is
/// never embedded in the `genres` row; the relation store materializes it
/// into `genres_categories`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genre {
    id: GenreId,
    name: String,
    is_active: bool,
    created_at: NaiveDateTime,
    categories: BTreeSet<CategoryId>,
}

impl Genre {
    pub fn new(
        name: impl Into<String>,
        is_active: bool,
    ) -> Result<Self, validation::EntityValidationError> {
        let genre = Self {
            id: GenreId::new(),
            name: name.into(),
            is_active,
            created_at: Utc::now().naive_utc(),
            categories: BTreeSet::new(),
        };
        genre.validate()?;
        Ok(genre)
    }

    /// Rebuilds a genre row from persisted state. Categories are hydrated
    /// separately.
    pub fn restore(
        id: GenreId,
        name: String,
        is_active: bool,
        created_at: NaiveDateTime,
    ) -> Result<Self, validation::EntityValidationError> {
        let genre = Self {
            id,
            name,
            is_active,
            created_at,
            categories: BTreeSet::new(),
        };
        genre.validate()?;
        Ok(genre)
    }

    pub fn id(&self) -> GenreId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn categories(&self) -> &BTreeSet<CategoryId> {
        &self.categories
    }

    /// Category ids as an ordered list, the shape relation writes expect.
    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().copied().collect()
    }

    pub fn update(&mut self, name: impl Into<String>) -> ValidationResult {
        let name = name.into();
        validation::not_null_or_empty(&name, "Name")?;
        self.name = name;
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

    /// Returns `false` if the id was already present.
    pub fn add_category(&mut self, category_id: CategoryId) -> bool {
        self.categories.insert(category_id)
    }

    pub fn remove_category(&mut self, category_id: CategoryId) -> bool {
        self.categories.remove(&category_id)
    }

    pub fn remove_all_categories(&mut self) {
        self.categories.clear();
    }

    fn validate(&self) -> ValidationResult {
        validation::not_null_or_empty(&self.name, "Name")
    }
}
