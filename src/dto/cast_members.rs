use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::cast_member::CastMember;
use crate::domain::types::{CastMemberId, CastMemberType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMemberDto {
    pub id: CastMemberId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CastMemberType,
    pub created_at: NaiveDateTime,
}

impl From<CastMember> for CastMemberDto {
    fn from(value: CastMember) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_string(),
            kind: value.kind(),
            created_at: value.created_at(),
        }
    }
}
