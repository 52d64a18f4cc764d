use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::genre::Genre as DomainGenre;
use crate::domain::types::{CategoryId, GenreId, TypeConstraintError};

/// Diesel model representing the `genres` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::genres)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::genres)]
pub struct NewGenre<'a> {
    pub id: String,
    pub name: &'a str,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::genres)]
pub struct GenreChanges<'a> {
    pub name: &'a str,
    pub is_active: bool,
}

/// One row of the `genres_categories` relation table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Insertable)]
#[diesel(table_name = crate::schema::genres_categories)]
pub struct GenreCategory {
    pub category_id: String,
    pub genre_id: String,
}

impl GenreCategory {
    pub fn new(genre_id: GenreId, category_id: CategoryId) -> Self {
        Self {
            category_id: category_id.to_db(),
            genre_id: genre_id.to_db(),
        }
    }

    /// Typed `(genre, category)` pair.
    pub fn ids(&self) -> Result<(GenreId, CategoryId), TypeConstraintError> {
        Ok((
            GenreId::parse(&self.genre_id)?,
            CategoryId::parse(&self.category_id)?,
        ))
    }
}

/// Converts the genre row only; relations are hydrated by the store.
impl TryFrom<Genre> for DomainGenre {
    type Error = TypeConstraintError;

    fn try_from(genre: Genre) -> Result<Self, Self::Error> {
        Ok(DomainGenre::restore(
            GenreId::parse(&genre.id)?,
            genre.name,
            genre.is_active,
            genre.created_at,
        )?)
    }
}

impl<'a> From<&'a DomainGenre> for NewGenre<'a> {
    fn from(genre: &'a DomainGenre) -> Self {
        Self {
            id: genre.id().to_db(),
            name: genre.name(),
            is_active: genre.is_active(),
            created_at: genre.created_at(),
        }
    }
}

impl<'a> From<&'a DomainGenre> for GenreChanges<'a> {
    fn from(genre: &'a DomainGenre) -> Self {
        Self {
            name: genre.name(),
            is_active: genre.is_active(),
        }
    }
}
