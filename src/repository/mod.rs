use std::fmt::Display;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::Category;
use crate::domain::search::{SearchQuery, SearchResult};
use crate::domain::types::{CategoryId, GenreId};

pub mod cast_member;
pub mod category;
pub mod errors;
pub mod genre;
pub mod relation;
pub mod unit_of_work;

pub use cast_member::DieselCastMemberStore;
pub use category::DieselCategoryStore;
pub use errors::{RepositoryError, RepositoryResult};
pub use genre::{DieselGenreStore, DieselRelationStore};
pub use relation::RelationSynchronizer;
pub use unit_of_work::DieselUnitOfWork;

/// Entry point to Diesel-backed persistence.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers. Every request opens its own
/// [`DieselUnitOfWork`] and builds stores on top of it.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Opens a transaction; writes become visible on [`UnitOfWork::commit`].
    pub fn unit_of_work(&self) -> RepositoryResult<DieselUnitOfWork> {
        DieselUnitOfWork::begin(self.conn()?)
    }

    /// Connection without an enclosing transaction, used by read paths.
    pub fn autocommit(&self) -> RepositoryResult<DieselUnitOfWork> {
        Ok(DieselUnitOfWork::autocommit(self.conn()?))
    }
}

/// Batches the writes staged by stores and applies them atomically.
pub trait UnitOfWork {
    /// Makes every staged write durable.
    fn commit(&self) -> RepositoryResult<()>;
    /// Discards staged writes. Best-effort: a finished unit is left alone.
    fn rollback(&self) -> RepositoryResult<()>;
}

/// Id based persistence shared by every aggregate store.
pub trait CrudStore<T> {
    type Id: Copy + Display;

    /// Stage a new aggregate.
    fn insert(&self, aggregate: &T) -> RepositoryResult<()>;
    /// Load an aggregate or fail with [`RepositoryError::NotFound`].
    fn get(&self, id: Self::Id) -> RepositoryResult<T>;
    /// Stage the mutable fields of an already loaded aggregate.
    fn update(&self, aggregate: &T) -> RepositoryResult<()>;
    /// Stage the removal of an aggregate.
    fn delete(&self, aggregate: &T) -> RepositoryResult<()>;
}

/// Paginated, filtered and sorted listing.
pub trait Searchable<T> {
    fn search(&self, query: &SearchQuery) -> RepositoryResult<SearchResult<T>>;
}

/// Batch lookups over categories used by genre relations.
pub trait CategoryLookup {
    /// Subset of `ids` that exist, in no particular order.
    fn get_ids_by_ids(&self, ids: &[CategoryId]) -> RepositoryResult<Vec<CategoryId>>;
    /// Full rows for the subset of `ids` that exist.
    fn get_by_ids(&self, ids: &[CategoryId]) -> RepositoryResult<Vec<Category>>;
}

/// Rows of the genre/category relation table.
///
/// Writes go through [`RelationSynchronizer`] only.
pub trait RelationStore {
    /// All `(genre, category)` pairs for the given genres, in one query.
    fn list_by_genre_ids(
        &self,
        genre_ids: &[GenreId],
    ) -> RepositoryResult<Vec<(GenreId, CategoryId)>>;
    fn delete_by_genre_id(&self, genre_id: GenreId) -> RepositoryResult<usize>;
    fn insert_relations(
        &self,
        genre_id: GenreId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<usize>;
}

/// `LIKE` pattern matching `term` anywhere, with wildcards in `term` escaped
/// by `\`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Clamps an offset/limit into SQLite's signed range.
pub(crate) fn to_sql_count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
