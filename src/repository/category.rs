use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::category::Category;
use crate::domain::search::{SearchOrder, SearchQuery, SearchResult, SortField};
use crate::domain::types::CategoryId;
use crate::models::category::{
    Category as DbCategory, CategoryChanges, NewCategory as DbNewCategory,
};
use crate::repository::{
    CategoryLookup, CrudStore, DieselUnitOfWork, RepositoryError, RepositoryResult, Searchable,
    like_pattern, to_sql_count,
};
use crate::schema::categories;

/// Category persistence on top of a request's unit of work.
#[derive(Clone, Copy)]
pub struct DieselCategoryStore<'a> {
    uow: &'a DieselUnitOfWork,
}

impl<'a> DieselCategoryStore<'a> {
    pub fn new(uow: &'a DieselUnitOfWork) -> Self {
        Self { uow }
    }
}

fn filtered(term: Option<&str>) -> categories::BoxedQuery<'static, Sqlite> {
    let mut query = categories::table.into_boxed::<Sqlite>();
    if let Some(term) = term {
        query = query.filter(categories::name.like(like_pattern(term)).escape('\\'));
    }
    query
}

fn ordered(
    query: categories::BoxedQuery<'static, Sqlite>,
    field: SortField,
    dir: SearchOrder,
) -> categories::BoxedQuery<'static, Sqlite> {
    match (field, dir) {
        (SortField::Name, SearchOrder::Asc) | (SortField::Default, _) => query
            .order_by(categories::name.asc())
            .then_order_by(categories::id.asc()),
        (SortField::Name, SearchOrder::Desc) => query
            .order_by(categories::name.desc())
            .then_order_by(categories::id.desc()),
        (SortField::Id, SearchOrder::Asc) => query.order_by(categories::id.asc()),
        (SortField::Id, SearchOrder::Desc) => query.order_by(categories::id.desc()),
        (SortField::CreatedAt, SearchOrder::Asc) => query.order_by(categories::created_at.asc()),
        (SortField::CreatedAt, SearchOrder::Desc) => {
            query.order_by(categories::created_at.desc())
        }
    }
}

fn db_keys(ids: &[CategoryId]) -> Vec<String> {
    ids.iter().map(|id| id.to_db()).collect()
}

impl CrudStore<Category> for DieselCategoryStore<'_> {
    type Id = CategoryId;

    fn insert(&self, category: &Category) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        diesel::insert_into(categories::table)
            .values(DbNewCategory::from(category))
            .execute(&mut *conn)?;

        Ok(())
    }

    fn get(&self, id: CategoryId) -> RepositoryResult<Category> {
        let mut conn = self.uow.conn();

        let category = categories::table
            .find(id.to_db())
            .first::<DbCategory>(&mut *conn)
            .optional()?;

        match category {
            Some(category) => Ok(category.try_into()?),
            None => Err(RepositoryError::not_found("Category", id)),
        }
    }

    fn update(&self, category: &Category) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        let affected = diesel::update(categories::table.find(category.id().to_db()))
            .set(CategoryChanges::from(category))
            .execute(&mut *conn)?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Category", category.id()));
        }
        Ok(())
    }

    fn delete(&self, category: &Category) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        let affected =
            diesel::delete(categories::table.find(category.id().to_db())).execute(&mut *conn)?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Category", category.id()));
        }
        Ok(())
    }
}

impl Searchable<Category> for DieselCategoryStore<'_> {
    fn search(&self, query: &SearchQuery) -> RepositoryResult<SearchResult<Category>> {
        let mut conn = self.uow.conn();
        let term = query.search_term();

        let total = filtered(term).count().get_result::<i64>(&mut *conn)? as usize;

        let items = ordered(filtered(term), query.sort_field(), query.dir)
            .offset(to_sql_count(query.offset()))
            .limit(to_sql_count(query.limit()))
            .load::<DbCategory>(&mut *conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(SearchResult {
            page: query.page,
            per_page: query.per_page,
            total,
            items,
        })
    }
}

impl CategoryLookup for DieselCategoryStore<'_> {
    fn get_ids_by_ids(&self, ids: &[CategoryId]) -> RepositoryResult<Vec<CategoryId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.uow.conn();

        let found = categories::table
            .filter(categories::id.eq_any(db_keys(ids)))
            .select(categories::id)
            .load::<String>(&mut *conn)?;

        Ok(found
            .iter()
            .map(|id| CategoryId::parse(id))
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn get_by_ids(&self, ids: &[CategoryId]) -> RepositoryResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.uow.conn();

        let items = categories::table
            .filter(categories::id.eq_any(db_keys(ids)))
            .load::<DbCategory>(&mut *conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }
}
