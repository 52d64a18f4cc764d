use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::genre::Genre;
use crate::domain::types::{CategoryId, GenreId};

/// Related category; `name` is only filled by listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCategoryDto {
    pub id: CategoryId,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreDto {
    pub id: GenreId,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub categories: Vec<GenreCategoryDto>,
}

impl GenreDto {
    /// Every distinct category id referenced by `genres`, in first-seen order.
    pub fn category_ids(genres: &[GenreDto]) -> Vec<CategoryId> {
        let mut ids: Vec<CategoryId> = Vec::new();
        for category in genres.iter().flat_map(|genre| genre.categories.iter()) {
            if !ids.contains(&category.id) {
                ids.push(category.id);
            }
        }
        ids
    }

    /// Fills category names from `names`; unknown ids keep `None`.
    pub fn fill_category_names(&mut self, names: &HashMap<CategoryId, String>) {
        for category in &mut self.categories {
            category.name = names.get(&category.id).cloned();
        }
    }
}

impl From<Genre> for GenreDto {
    fn from(value: Genre) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_string(),
            is_active: value.is_active(),
            created_at: value.created_at(),
            categories: value
                .categories()
                .iter()
                .map(|id| GenreCategoryDto { id: *id, name: None })
                .collect(),
        }
    }
}
