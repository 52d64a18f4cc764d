use std::fmt::Display;

use thiserror::Error;

/// Errors surfaced by every store operation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matches the requested id.
    #[error("{0}")]
    NotFound(String),
    /// One or more referenced categories do not exist.
    #[error("{0}")]
    RelatedAggregateNotFound(String),
    /// A persisted row no longer satisfies the aggregate rules.
    #[error("{0}")]
    ValidationError(String),
    #[error("unit of work is already finished")]
    UnitOfWorkFinished,
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl RepositoryError {
    /// `"<Entity> '<id>' not found."`
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{entity} '{id}' not found."))
    }

    /// `"Related category id (or ids) not found: <ids>"`, ids joined by `,`.
    pub fn related_categories_not_found<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let ids = ids
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self::RelatedAggregateNotFound(format!(
            "Related category id (or ids) not found: {ids}"
        ))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
