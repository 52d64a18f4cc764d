use crate::domain::cast_member::CastMember;
use crate::domain::search::{SearchQuery, SearchResult};
use crate::domain::types::CastMemberId;
use crate::dto::cast_members::CastMemberDto;
use crate::forms::cast_members::CreateCastMemberPayload;
use crate::repository::{CrudStore, Searchable, UnitOfWork};

use super::{ServiceResult, transaction};

pub fn create_cast_member<U, S>(
    payload: CreateCastMemberPayload,
    uow: &U,
    store: &S,
) -> ServiceResult<CastMemberDto>
where
    U: UnitOfWork,
    S: CrudStore<CastMember, Id = CastMemberId>,
{
    transaction(uow, || {
        let member = CastMember::new(payload.name, payload.kind)?;
        store.insert(&member)?;
        Ok(CastMemberDto::from(member))
    })
}

pub fn get_cast_member<S>(id: CastMemberId, store: &S) -> ServiceResult<CastMemberDto>
where
    S: CrudStore<CastMember, Id = CastMemberId>,
{
    Ok(CastMemberDto::from(store.get(id)?))
}

pub fn delete_cast_member<U, S>(id: CastMemberId, uow: &U, store: &S) -> ServiceResult<()>
where
    U: UnitOfWork,
    S: CrudStore<CastMember, Id = CastMemberId>,
{
    transaction(uow, || {
        let member = store.get(id)?;
        store.delete(&member)?;
        Ok(())
    })
}

pub fn list_cast_members<S>(
    query: &SearchQuery,
    store: &S,
) -> ServiceResult<SearchResult<CastMemberDto>>
where
    S: Searchable<CastMember>,
{
    Ok(store.search(query)?.map(CastMemberDto::from))
}
