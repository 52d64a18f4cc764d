use serde::Deserialize;
use validator::Validate;

use super::FormError;
use crate::domain::types::CastMemberType;

/// Body of `POST /cast_members`; `type` is `1` for directors, `2` for actors.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCastMemberForm {
    pub name: String,
    #[serde(rename = "type")]
    #[validate(range(min = 1, max = 2))]
    pub kind: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCastMemberPayload {
    pub name: String,
    pub kind: CastMemberType,
}

impl TryFrom<CreateCastMemberForm> for CreateCastMemberPayload {
    type Error = FormError;

    fn try_from(value: CreateCastMemberForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: value.name,
            kind: CastMemberType::try_from(value.kind)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_type_code() {
        let form: CreateCastMemberForm =
            serde_json::from_str(r#"{"name":"Jane","type":2}"#).unwrap();

        let payload = CreateCastMemberPayload::try_from(form).unwrap();

        assert_eq!(payload.kind, CastMemberType::Actor);
    }

    #[test]
    fn rejects_unknown_type() {
        let form: CreateCastMemberForm =
            serde_json::from_str(r#"{"name":"Jane","type":7}"#).unwrap();

        assert!(matches!(
            CreateCastMemberPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
