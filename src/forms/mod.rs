use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::search::{DEFAULT_PAGE, DEFAULT_PER_PAGE, SearchOrder, SearchQuery};
use crate::domain::types::{CategoryId, TypeConstraintError};

pub mod cast_members;
pub mod categories;
pub mod genres;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Form validation failed: {0}")]
    Validation(String),
    #[error("Form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Query string accepted by every list endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQueryForm {
    /// `0` is served as the first page.
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 1000))]
    pub per_page: Option<usize>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl TryFrom<ListQueryForm> for SearchQuery {
    type Error = FormError;

    fn try_from(value: ListQueryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let dir = match value.dir.as_deref().map(str::trim) {
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SearchOrder::Desc,
            Some(dir) if dir.is_empty() || dir.eq_ignore_ascii_case("asc") => SearchOrder::Asc,
            None => SearchOrder::Asc,
            Some(other) => {
                return Err(FormError::TypeConstraint(format!(
                    "unknown sort direction '{other}'"
                )));
            }
        };

        Ok(SearchQuery::new()
            .paginate(
                value.page.unwrap_or(DEFAULT_PAGE),
                value.per_page.unwrap_or(DEFAULT_PER_PAGE),
            )
            .search(value.search.unwrap_or_default())
            .sort(value.sort.unwrap_or_default(), dir))
    }
}

/// Parses submitted category ids, keeping their order.
pub(crate) fn parse_category_ids(ids: Vec<String>) -> Result<Vec<CategoryId>, FormError> {
    ids.iter()
        .map(|id| CategoryId::parse(id.trim()).map_err(FormError::from))
        .collect()
}
