//! Response bodies of the JSON API.

use serde::Serialize;

use crate::domain::search::SearchResult;

pub mod cast_members;
pub mod categories;
pub mod genres;

/// `{ "data": ... }` envelope for single resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataDto<T> {
    pub data: T,
}

impl<T> DataDto<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMetaDto {
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
}

/// `{ "data": [...], "meta": {...} }` envelope for list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListDto<T> {
    pub data: Vec<T>,
    pub meta: ListMetaDto,
}

impl<T> From<SearchResult<T>> for ListDto<T> {
    fn from(value: SearchResult<T>) -> Self {
        Self {
            meta: ListMetaDto {
                current_page: value.page,
                per_page: value.per_page,
                total: value.total,
            },
            data: value.items,
        }
    }
}
