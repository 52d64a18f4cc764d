use serde::Deserialize;
use validator::Validate;

use super::{FormError, parse_category_ids};
use crate::domain::types::CategoryId;

fn default_active() -> bool {
    true
}

/// Body of `POST /genres`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGenreForm {
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub categories_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateGenrePayload {
    pub name: String,
    pub is_active: bool,
    pub categories_ids: Vec<CategoryId>,
}

impl TryFrom<CreateGenreForm> for CreateGenrePayload {
    type Error = FormError;

    fn try_from(value: CreateGenreForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: value.name,
            is_active: value.is_active,
            categories_ids: parse_category_ids(value.categories_ids)?,
        })
    }
}

/// Body of `PUT /genres/{id}`.
///
/// A missing `categories_ids` leaves relations alone, an empty list clears
/// them.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGenreForm {
    pub name: String,
    pub is_active: Option<bool>,
    pub categories_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateGenrePayload {
    pub name: String,
    pub is_active: Option<bool>,
    pub categories_ids: Option<Vec<CategoryId>>,
}

impl TryFrom<UpdateGenreForm> for UpdateGenrePayload {
    type Error = FormError;

    fn try_from(value: UpdateGenreForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: value.name,
            is_active: value.is_active,
            categories_ids: value.categories_ids.map(parse_category_ids).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_category_lists_differ() {
        let absent: UpdateGenreForm = serde_json::from_str(r#"{"name":"Drama"}"#).unwrap();
        let empty: UpdateGenreForm =
            serde_json::from_str(r#"{"name":"Drama","categories_ids":[]}"#).unwrap();

        let absent = UpdateGenrePayload::try_from(absent).unwrap();
        let empty = UpdateGenrePayload::try_from(empty).unwrap();

        assert_eq!(absent.categories_ids, None);
        assert_eq!(empty.categories_ids, Some(Vec::new()));
    }

    #[test]
    fn create_parses_ids() {
        let id = CategoryId::new();
        let body = format!(r#"{{"name":"Drama","categories_ids":["{id}"]}}"#);
        let form: CreateGenreForm = serde_json::from_str(&body).unwrap();

        let payload = CreateGenrePayload::try_from(form).unwrap();

        assert!(payload.is_active);
        assert_eq!(payload.categories_ids, vec![id]);
    }

    #[test]
    fn create_rejects_malformed_ids() {
        let form: CreateGenreForm =
            serde_json::from_str(r#"{"name":"Drama","categories_ids":["42"]}"#).unwrap();

        assert!(matches!(
            CreateGenrePayload::try_from(form),
            Err(FormError::TypeConstraint(_))
        ));
    }
}
