use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::domain::types::{CategoryId, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub id: String,
    pub name: &'a str,
    pub description: &'a str,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Mutable columns written by an update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChanges<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub is_active: bool,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(DomainCategory::restore(
            CategoryId::parse(&category.id)?,
            category.name,
            category.description,
            category.is_active,
            category.created_at,
        )?)
    }
}

impl<'a> From<&'a DomainCategory> for NewCategory<'a> {
    fn from(category: &'a DomainCategory) -> Self {
        Self {
            id: category.id().to_db(),
            name: category.name(),
            description: category.description(),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

impl<'a> From<&'a DomainCategory> for CategoryChanges<'a> {
    fn from(category: &'a DomainCategory) -> Self {
        Self {
            name: category.name(),
            description: category.description(),
            is_active: category.is_active(),
        }
    }
}
