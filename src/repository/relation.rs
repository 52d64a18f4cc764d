//! Keeps `genres_categories` in step with each genre's category set.

use std::collections::{HashMap, HashSet};

use crate::domain::genre::Genre;
use crate::domain::types::{CategoryId, GenreId};
use crate::repository::{CategoryLookup, RelationStore, RepositoryError, RepositoryResult};

/// Sole writer of genre/category relation rows.
///
/// References are validated before any row is touched, so a rejected call
/// leaves the previous relations in place.
pub struct RelationSynchronizer<'a, C, R> {
    categories: &'a C,
    relations: &'a R,
}

impl<'a, C, R> RelationSynchronizer<'a, C, R>
where
    C: CategoryLookup,
    R: RelationStore,
{
    pub fn new(categories: &'a C, relations: &'a R) -> Self {
        Self {
            categories,
            relations,
        }
    }

    /// Fails with [`RepositoryError::RelatedAggregateNotFound`] listing the
    /// unknown ids in input order.
    pub fn validate_references(&self, category_ids: &[CategoryId]) -> RepositoryResult<()> {
        if category_ids.is_empty() {
            return Ok(());
        }

        let found: HashSet<CategoryId> = self
            .categories
            .get_ids_by_ids(category_ids)?
            .into_iter()
            .collect();

        let missing = unique(category_ids)
            .into_iter()
            .filter(|id| !found.contains(id))
            .collect::<Vec<_>>();

        if missing.is_empty() {
            return Ok(());
        }
        log::debug!("Rejected {} unknown category reference(s)", missing.len());
        Err(RepositoryError::related_categories_not_found(missing))
    }

    /// Makes the persisted rows for `genre_id` equal `category_ids`.
    ///
    /// An empty slice removes every relation of the genre.
    pub fn replace_all(
        &self,
        genre_id: GenreId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<()> {
        self.validate_references(category_ids)?;
        self.write_all(genre_id, category_ids)
    }

    /// Checks `category_ids` before `insert_row` runs, then writes the
    /// relations of the new genre. Unknown ids leave no genre row behind,
    /// even outside a transaction.
    pub fn insert_with<F>(
        &self,
        genre_id: GenreId,
        category_ids: &[CategoryId],
        insert_row: F,
    ) -> RepositoryResult<()>
    where
        F: FnOnce() -> RepositoryResult<()>,
    {
        self.validate_references(category_ids)?;
        insert_row()?;
        self.write_all(genre_id, category_ids)
    }

    fn write_all(&self, genre_id: GenreId, category_ids: &[CategoryId]) -> RepositoryResult<()> {
        self.relations.delete_by_genre_id(genre_id)?;
        if !category_ids.is_empty() {
            self.relations.insert_relations(genre_id, &unique(category_ids))?;
        }
        Ok(())
    }
}

/// Fills `categories` of every genre with a single relation query.
pub fn hydrate_categories<R: RelationStore>(
    genres: &mut [Genre],
    relations: &R,
) -> RepositoryResult<()> {
    if genres.is_empty() {
        return Ok(());
    }

    let genre_ids: Vec<GenreId> = genres.iter().map(Genre::id).collect();
    let mut by_genre: HashMap<GenreId, Vec<CategoryId>> = HashMap::new();
    for (genre_id, category_id) in relations.list_by_genre_ids(&genre_ids)? {
        by_genre.entry(genre_id).or_default().push(category_id);
    }

    for genre in genres.iter_mut() {
        if let Some(category_ids) = by_genre.remove(&genre.id()) {
            for category_id in category_ids {
                genre.add_category(category_id);
            }
        }
    }
    Ok(())
}

/// Order-preserving de-duplication.
fn unique(ids: &[CategoryId]) -> Vec<CategoryId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
