use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_string(),
            description: value.description().to_string(),
            is_active: value.is_active(),
            created_at: value.created_at(),
        }
    }
}
