use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::cast_member::CastMember;
use crate::domain::search::{SearchOrder, SearchQuery, SearchResult, SortField};
use crate::domain::types::CastMemberId;
use crate::models::cast_member::{CastMember as DbCastMember, NewCastMember as DbNewCastMember};
use crate::repository::{
    CrudStore, DieselUnitOfWork, RepositoryError, RepositoryResult, Searchable, like_pattern,
    to_sql_count,
};
use crate::schema::cast_members;

#[derive(Clone, Copy)]
pub struct DieselCastMemberStore<'a> {
    uow: &'a DieselUnitOfWork,
}

impl<'a> DieselCastMemberStore<'a> {
    pub fn new(uow: &'a DieselUnitOfWork) -> Self {
        Self { uow }
    }
}

fn filtered(term: Option<&str>) -> cast_members::BoxedQuery<'static, Sqlite> {
    let mut query = cast_members::table.into_boxed::<Sqlite>();
    if let Some(term) = term {
        query = query.filter(cast_members::name.like(like_pattern(term)).escape('\\'));
    }
    query
}

fn ordered(
    query: cast_members::BoxedQuery<'static, Sqlite>,
    field: SortField,
    dir: SearchOrder,
) -> cast_members::BoxedQuery<'static, Sqlite> {
    match (field, dir) {
        (SortField::Name, SearchOrder::Asc) | (SortField::Default, _) => query
            .order_by(cast_members::name.asc())
            .then_order_by(cast_members::id.asc()),
        (SortField::Name, SearchOrder::Desc) => query
            .order_by(cast_members::name.desc())
            .then_order_by(cast_members::id.desc()),
        (SortField::Id, SearchOrder::Asc) => query.order_by(cast_members::id.asc()),
        (SortField::Id, SearchOrder::Desc) => query.order_by(cast_members::id.desc()),
        (SortField::CreatedAt, SearchOrder::Asc) => {
            query.order_by(cast_members::created_at.asc())
        }
        (SortField::CreatedAt, SearchOrder::Desc) => {
            query.order_by(cast_members::created_at.desc())
        }
    }
}

impl CrudStore<CastMember> for DieselCastMemberStore<'_> {
    type Id = CastMemberId;

    fn insert(&self, member: &CastMember) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        diesel::insert_into(cast_members::table)
            .values(DbNewCastMember::from(member))
            .execute(&mut *conn)?;

        Ok(())
    }

    fn get(&self, id: CastMemberId) -> RepositoryResult<CastMember> {
        let mut conn = self.uow.conn();

        let member = cast_members::table
            .find(id.to_db())
            .first::<DbCastMember>(&mut *conn)
            .optional()?;

        match member {
            Some(member) => Ok(member.try_into()?),
            None => Err(RepositoryError::not_found("CastMember", id)),
        }
    }

    fn update(&self, member: &CastMember) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        let affected = diesel::update(cast_members::table.find(member.id().to_db()))
            .set(DbNewCastMember::from(member))
            .execute(&mut *conn)?;

        if affected == 0 {
            return Err(RepositoryError::not_found("CastMember", member.id()));
        }
        Ok(())
    }

    fn delete(&self, member: &CastMember) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        let affected =
            diesel::delete(cast_members::table.find(member.id().to_db())).execute(&mut *conn)?;

        if affected == 0 {
            return Err(RepositoryError::not_found("CastMember", member.id()));
        }
        Ok(())
    }
}

impl Searchable<CastMember> for DieselCastMemberStore<'_> {
    fn search(&self, query: &SearchQuery) -> RepositoryResult<SearchResult<CastMember>> {
        let mut conn = self.uow.conn();
        let term = query.search_term();

        let total = filtered(term).count().get_result::<i64>(&mut *conn)? as usize;

        let items = ordered(filtered(term), query.sort_field(), query.dir)
            .offset(to_sql_count(query.offset()))
            .limit(to_sql_count(query.limit()))
            .load::<DbCastMember>(&mut *conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<CastMember>, _>>()?;

        Ok(SearchResult {
            page: query.page,
            per_page: query.per_page,
            total,
            items,
        })
    }
}
