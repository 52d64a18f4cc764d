use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::genre::Genre;
use crate::domain::search::{SearchOrder, SearchQuery, SearchResult, SortField};
use crate::domain::types::{CategoryId, GenreId};
use crate::models::genre::{Genre as DbGenre, GenreCategory, GenreChanges, NewGenre as DbNewGenre};
use crate::repository::relation::hydrate_categories;
use crate::repository::{
    CrudStore, DieselCategoryStore, DieselUnitOfWork, RelationStore, RelationSynchronizer,
    RepositoryError, RepositoryResult, Searchable, like_pattern, to_sql_count,
};
use crate::schema::{genres, genres_categories};

/// Genre persistence on top of a request's unit of work.
///
/// Relation rows are written through [`RelationSynchronizer`] and read back
/// with one batched query per call.
#[derive(Clone, Copy)]
pub struct DieselGenreStore<'a> {
    uow: &'a DieselUnitOfWork,
}

impl<'a> DieselGenreStore<'a> {
    pub fn new(uow: &'a DieselUnitOfWork) -> Self {
        Self { uow }
    }

    fn relations(&self) -> DieselRelationStore<'a> {
        DieselRelationStore::new(self.uow)
    }
}

fn filtered(term: Option<&str>) -> genres::BoxedQuery<'static, Sqlite> {
    let mut query = genres::table.into_boxed::<Sqlite>();
    if let Some(term) = term {
        query = query.filter(genres::name.like(like_pattern(term)).escape('\\'));
    }
    query
}

fn ordered(
    query: genres::BoxedQuery<'static, Sqlite>,
    field: SortField,
    dir: SearchOrder,
) -> genres::BoxedQuery<'static, Sqlite> {
    match (field, dir) {
        (SortField::Name, SearchOrder::Asc) | (SortField::Default, _) => query
            .order_by(genres::name.asc())
            .then_order_by(genres::id.asc()),
        (SortField::Name, SearchOrder::Desc) => query
            .order_by(genres::name.desc())
            .then_order_by(genres::id.desc()),
        (SortField::Id, SearchOrder::Asc) => query.order_by(genres::id.asc()),
        (SortField::Id, SearchOrder::Desc) => query.order_by(genres::id.desc()),
        (SortField::CreatedAt, SearchOrder::Asc) => query.order_by(genres::created_at.asc()),
        (SortField::CreatedAt, SearchOrder::Desc) => query.order_by(genres::created_at.desc()),
    }
}

impl CrudStore<Genre> for DieselGenreStore<'_> {
    type Id = GenreId;

    fn insert(&self, genre: &Genre) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;

        let categories = DieselCategoryStore::new(self.uow);
        let relations = self.relations();
        RelationSynchronizer::new(&categories, &relations).insert_with(
            genre.id(),
            &genre.category_ids(),
            || {
                let mut conn = self.uow.conn();
                diesel::insert_into(genres::table)
                    .values(DbNewGenre::from(genre))
                    .execute(&mut *conn)?;
                Ok(())
            },
        )
    }

    fn get(&self, id: GenreId) -> RepositoryResult<Genre> {
        let row = {
            let mut conn = self.uow.conn();
            genres::table
                .find(id.to_db())
                .first::<DbGenre>(&mut *conn)
                .optional()?
        };

        let Some(row) = row else {
            return Err(RepositoryError::not_found("Genre", id));
        };
        let mut genre: Genre = row.try_into()?;

        for (_, category_id) in self.relations().list_by_genre_ids(&[id])? {
            genre.add_category(category_id);
        }
        Ok(genre)
    }

    fn update(&self, genre: &Genre) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        let affected = diesel::update(genres::table.find(genre.id().to_db()))
            .set(GenreChanges::from(genre))
            .execute(&mut *conn)?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Genre", genre.id()));
        }
        Ok(())
    }

    fn delete(&self, genre: &Genre) -> RepositoryResult<()> {
        self.uow.ensure_writable()?;

        let categories = DieselCategoryStore::new(self.uow);
        let relations = self.relations();
        RelationSynchronizer::new(&categories, &relations).replace_all(genre.id(), &[])?;

        let mut conn = self.uow.conn();
        let affected =
            diesel::delete(genres::table.find(genre.id().to_db())).execute(&mut *conn)?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Genre", genre.id()));
        }
        Ok(())
    }
}

impl Searchable<Genre> for DieselGenreStore<'_> {
    fn search(&self, query: &SearchQuery) -> RepositoryResult<SearchResult<Genre>> {
        let term = query.search_term();

        let (total, rows) = {
            let mut conn = self.uow.conn();

            let total = filtered(term).count().get_result::<i64>(&mut *conn)? as usize;

            let rows = ordered(filtered(term), query.sort_field(), query.dir)
                .offset(to_sql_count(query.offset()))
                .limit(to_sql_count(query.limit()))
                .load::<DbGenre>(&mut *conn)?;

            (total, rows)
        };

        let mut items = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Genre>, _>>()?;
        hydrate_categories(&mut items, &self.relations())?;

        Ok(SearchResult {
            page: query.page,
            per_page: query.per_page,
            total,
            items,
        })
    }
}

/// Access to the `genres_categories` table.
#[derive(Clone, Copy)]
pub struct DieselRelationStore<'a> {
    uow: &'a DieselUnitOfWork,
}

impl<'a> DieselRelationStore<'a> {
    pub fn new(uow: &'a DieselUnitOfWork) -> Self {
        Self { uow }
    }
}

impl RelationStore for DieselRelationStore<'_> {
    fn list_by_genre_ids(
        &self,
        genre_ids: &[GenreId],
    ) -> RepositoryResult<Vec<(GenreId, CategoryId)>> {
        if genre_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.uow.conn();

        let keys: Vec<String> = genre_ids.iter().map(|id| id.to_db()).collect();
        let rows = genres_categories::table
            .filter(genres_categories::genre_id.eq_any(keys))
            .order_by((genres_categories::genre_id, genres_categories::category_id))
            .load::<GenreCategory>(&mut *conn)?;

        Ok(rows
            .iter()
            .map(GenreCategory::ids)
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn delete_by_genre_id(&self, genre_id: GenreId) -> RepositoryResult<usize> {
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        let affected = diesel::delete(
            genres_categories::table.filter(genres_categories::genre_id.eq(genre_id.to_db())),
        )
        .execute(&mut *conn)?;

        Ok(affected)
    }

    fn insert_relations(
        &self,
        genre_id: GenreId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<usize> {
        if category_ids.is_empty() {
            return Ok(0);
        }
        self.uow.ensure_writable()?;
        let mut conn = self.uow.conn();

        let rows: Vec<GenreCategory> = category_ids
            .iter()
            .map(|category_id| GenreCategory::new(genre_id, *category_id))
            .collect();

        let affected = diesel::insert_into(genres_categories::table)
            .values(&rows)
            .execute(&mut *conn)?;

        Ok(affected)
    }
}
