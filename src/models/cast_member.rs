use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cast_member::CastMember as DomainCastMember;
use crate::domain::types::{CastMemberId, CastMemberType, TypeConstraintError};

/// Diesel model representing the `cast_members` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::cast_members)]
pub struct CastMember {
    pub id: String,
    pub name: String,
    pub kind: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::cast_members)]
pub struct NewCastMember<'a> {
    pub id: String,
    pub name: &'a str,
    pub kind: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<CastMember> for DomainCastMember {
    type Error = TypeConstraintError;

    fn try_from(member: CastMember) -> Result<Self, Self::Error> {
        Ok(DomainCastMember::restore(
            CastMemberId::parse(&member.id)?,
            member.name,
            CastMemberType::try_from(member.kind)?,
            member.created_at,
        )?)
    }
}

impl<'a> From<&'a DomainCastMember> for NewCastMember<'a> {
    fn from(member: &'a DomainCastMember) -> Self {
        Self {
            id: member.id().to_db(),
            name: member.name(),
            kind: member.kind().code(),
            created_at: member.created_at(),
        }
    }
}
