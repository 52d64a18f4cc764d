use serde::Deserialize;
use validator::Validate;

use super::FormError;

fn default_active() -> bool {
    true
}

/// Body of `POST /categories`.
///
/// Name rules are enforced by the aggregate so that clients get the domain
/// messages; the form only shapes the input.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryPayload {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl TryFrom<CreateCategoryForm> for CreateCategoryPayload {
    type Error = FormError;

    fn try_from(value: CreateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        })
    }
}

/// Body of `PUT /categories/{id}`. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryPayload {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryPayload {
    type Error = FormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        })
    }
}
