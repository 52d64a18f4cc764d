use std::collections::HashMap;

use crate::domain::genre::Genre;
use crate::domain::search::{SearchQuery, SearchResult};
use crate::domain::types::{CategoryId, GenreId};
use crate::dto::genres::GenreDto;
use crate::forms::genres::{CreateGenrePayload, UpdateGenrePayload};
use crate::repository::{
    CategoryLookup, CrudStore, RelationStore, RelationSynchronizer, Searchable, UnitOfWork,
};

use super::{ServiceResult, activation_change, transaction};

/// Creates a genre with its relations. Unknown category ids reject the whole
/// genre.
pub fn create_genre<U, G>(
    payload: CreateGenrePayload,
    uow: &U,
    genres: &G,
) -> ServiceResult<GenreDto>
where
    U: UnitOfWork,
    G: CrudStore<Genre, Id = GenreId>,
{
    transaction(uow, || {
        let mut genre = Genre::new(payload.name, payload.is_active)?;
        for category_id in payload.categories_ids {
            genre.add_category(category_id);
        }
        genres.insert(&genre)?;
        log::debug!(
            "Created genre {} with {} categories",
            genre.id(),
            genre.categories().len()
        );
        Ok(GenreDto::from(genre))
    })
}

pub fn get_genre<G>(id: GenreId, genres: &G) -> ServiceResult<GenreDto>
where
    G: CrudStore<Genre, Id = GenreId>,
{
    Ok(GenreDto::from(genres.get(id)?))
}

/// Updates name and activation and, when `categories_ids` is present,
/// replaces the genre's relations with exactly that list.
///
/// An absent list leaves persisted relations untouched; an empty one removes
/// all of them.
pub fn update_genre<U, G, C, R>(
    id: GenreId,
    payload: UpdateGenrePayload,
    uow: &U,
    genres: &G,
    categories: &C,
    relations: &R,
) -> ServiceResult<GenreDto>
where
    U: UnitOfWork,
    G: CrudStore<Genre, Id = GenreId>,
    C: CategoryLookup,
    R: RelationStore,
{
    transaction(uow, || {
        let mut genre = genres.get(id)?;
        genre.update(payload.name)?;
        match activation_change(payload.is_active, genre.is_active()) {
            Some(true) => genre.activate()?,
            Some(false) => genre.deactivate()?,
            None => {}
        }

        if let Some(category_ids) = payload.categories_ids {
            RelationSynchronizer::new(categories, relations).replace_all(id, &category_ids)?;
            genre.remove_all_categories();
            for category_id in category_ids {
                genre.add_category(category_id);
            }
        }

        genres.update(&genre)?;
        Ok(GenreDto::from(genre))
    })
}

pub fn delete_genre<U, G>(id: GenreId, uow: &U, genres: &G) -> ServiceResult<()>
where
    U: UnitOfWork,
    G: CrudStore<Genre, Id = GenreId>,
{
    transaction(uow, || {
        let genre = genres.get(id)?;
        genres.delete(&genre)?;
        log::debug!("Deleted genre {id}");
        Ok(())
    })
}

/// Lists genres and fills the names of their categories with one batched
/// lookup per page.
pub fn list_genres<G, C>(
    query: &SearchQuery,
    genres: &G,
    categories: &C,
) -> ServiceResult<SearchResult<GenreDto>>
where
    G: Searchable<Genre>,
    C: CategoryLookup,
{
    let mut result = genres.search(query)?.map(GenreDto::from);

    let ids = GenreDto::category_ids(&result.items);
    if ids.is_empty() {
        return Ok(result);
    }

    let names: HashMap<CategoryId, String> = categories
        .get_by_ids(&ids)?
        .into_iter()
        .map(|category| (category.id(), category.name().to_string()))
        .collect();
    for genre in &mut result.items {
        genre.fill_category_names(&names);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::category::Category;
    use crate::domain::search::SearchOrder;
    use crate::repository::test::TestRepository;
    use crate::services::ServiceError;

    fn categories(names: &[&str]) -> Vec<Category> {
        names
            .iter()
            .map(|name| Category::new(*name, "", true).unwrap())
            .collect()
    }

    fn ids(categories: &[Category]) -> Vec<CategoryId> {
        categories.iter().map(Category::id).collect()
    }

    fn seeded_genre(repo: &TestRepository, name: &str, category_ids: &[CategoryId]) -> Genre {
        let mut genre = Genre::new(name, true).unwrap();
        for id in category_ids {
            genre.add_category(*id);
        }
        repo.seed_genre(&genre);
        genre
    }

    fn update_payload(categories_ids: Option<Vec<CategoryId>>) -> UpdateGenrePayload {
        UpdateGenrePayload {
            name: "Renamed".to_string(),
            is_active: None,
            categories_ids,
        }
    }

    #[test]
    fn create_persists_relations() {
        let stored = categories(&["Action", "Horror", "Comedy"]);
        let repo = TestRepository::with_categories(stored.clone());
        let payload = CreateGenrePayload {
            name: "Thriller".to_string(),
            is_active: true,
            categories_ids: ids(&stored),
        };

        let dto = create_genre(payload, &repo, &repo).unwrap();

        assert_eq!(
            repo.committed_relations(dto.id),
            ids(&stored).into_iter().collect::<BTreeSet<_>>()
        );
        let genre = get_genre(dto.id, &repo).unwrap();
        assert_eq!(genre.categories.len(), 3);
    }

    #[test]
    fn create_with_unknown_category_is_rejected_atomically() {
        let stored = categories(&["Action", "Horror"]);
        let repo = TestRepository::with_categories(stored.clone());
        let missing = CategoryId::new();
        let mut requested = ids(&stored);
        requested.push(missing);
        let payload = CreateGenrePayload {
            name: "Thriller".to_string(),
            is_active: true,
            categories_ids: requested,
        };

        let err = create_genre(payload, &repo, &repo).unwrap_err();

        assert_eq!(
            err,
            ServiceError::RelatedAggregate(format!(
                "Related category id (or ids) not found: {missing}"
            ))
        );
        assert_eq!(repo.committed_genre_count(), 0);
        assert_eq!(repo.committed_relation_count(), 0);
    }

    #[test]
    fn create_rejects_empty_name() {
        let repo = TestRepository::new();
        let payload = CreateGenrePayload {
            name: String::new(),
            is_active: true,
            categories_ids: Vec::new(),
        };

        let err = create_genre(payload, &repo, &repo).unwrap_err();

        assert_eq!(
            err,
            ServiceError::EntityValidation("Name should not be null or empty".into())
        );
        assert_eq!(repo.calls("insert_genre"), 0);
    }

    #[test]
    fn update_with_empty_list_removes_all_relations() {
        let stored = categories(&["Action", "Horror"]);
        let repo = TestRepository::with_categories(stored.clone());
        let genre = seeded_genre(&repo, "Drama", &ids(&stored));

        let dto = update_genre(
            genre.id(),
            update_payload(Some(Vec::new())),
            &repo,
            &repo,
            &repo,
            &repo,
        )
        .unwrap();

        assert!(dto.categories.is_empty());
        assert!(repo.committed_relations(genre.id()).is_empty());
        assert_eq!(repo.calls("delete_by_genre_id"), 1);
        assert_eq!(repo.calls("insert_relations"), 0);
    }

    #[test]
    fn update_without_list_keeps_relations() {
        let stored = categories(&["Action", "Horror"]);
        let repo = TestRepository::with_categories(stored.clone());
        let genre = seeded_genre(&repo, "Drama", &ids(&stored));

        let dto =
            update_genre(genre.id(), update_payload(None), &repo, &repo, &repo, &repo).unwrap();

        assert_eq!(dto.name, "Renamed");
        assert_eq!(dto.categories.len(), 2);
        assert_eq!(
            repo.committed_relations(genre.id()),
            ids(&stored).into_iter().collect::<BTreeSet<_>>()
        );
        assert_eq!(repo.calls("delete_by_genre_id"), 0);
        assert_eq!(repo.calls("insert_relations"), 0);
        assert_eq!(repo.calls("get_ids_by_ids"), 0);
    }

    #[test]
    fn update_replaces_relations() {
        let stored = categories(&["Action", "Horror", "Comedy"]);
        let repo = TestRepository::with_categories(stored.clone());
        let genre = seeded_genre(&repo, "Drama", &ids(&stored)[..2]);
        let replacement = vec![stored[2].id()];

        update_genre(
            genre.id(),
            update_payload(Some(replacement.clone())),
            &repo,
            &repo,
            &repo,
            &repo,
        )
        .unwrap();

        assert_eq!(
            repo.committed_relations(genre.id()),
            replacement.into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn rejected_update_keeps_genre_and_relations() {
        let stored = categories(&["Action"]);
        let repo = TestRepository::with_categories(stored.clone());
        let genre = seeded_genre(&repo, "Drama", &ids(&stored));

        let result = update_genre(
            genre.id(),
            update_payload(Some(vec![CategoryId::new()])),
            &repo,
            &repo,
            &repo,
            &repo,
        );

        assert!(matches!(result, Err(ServiceError::RelatedAggregate(_))));
        assert_eq!(repo.committed_genre(genre.id()), Some(genre));
        assert_eq!(repo.calls("rollback"), 1);
    }

    #[test]
    fn update_toggles_activation() {
        let repo = TestRepository::new();
        let genre = seeded_genre(&repo, "Drama", &[]);
        let payload = UpdateGenrePayload {
            is_active: Some(false),
            ..update_payload(None)
        };

        update_genre(genre.id(), payload, &repo, &repo, &repo, &repo).unwrap();

        assert!(!repo.committed_genre(genre.id()).unwrap().is_active());
    }

    #[test]
    fn delete_removes_genre_and_relations() {
        let stored = categories(&["Action", "Horror"]);
        let repo = TestRepository::with_categories(stored.clone());
        let genre = seeded_genre(&repo, "Drama", &ids(&stored));

        delete_genre(genre.id(), &repo, &repo).unwrap();

        assert_eq!(repo.committed_genre(genre.id()), None);
        assert_eq!(repo.committed_relation_count(), 0);
    }

    #[test]
    fn delete_unknown_genre_is_not_found() {
        let repo = TestRepository::new();
        let id = GenreId::new();

        let err = delete_genre(id, &repo, &repo).unwrap_err();

        assert_eq!(err, ServiceError::NotFound(format!("Genre '{id}' not found.")));
    }

    #[test]
    fn list_fills_category_names_with_one_lookup() {
        let stored = categories(&["Action", "Horror"]);
        let repo = TestRepository::with_categories(stored.clone());
        seeded_genre(&repo, "Drama", &ids(&stored));
        seeded_genre(&repo, "Crime", &[stored[0].id()]);
        seeded_genre(&repo, "Noir", &[]);
        let query = SearchQuery::new().sort("name", SearchOrder::Asc);

        let result = list_genres(&query, &repo, &repo).unwrap();

        assert_eq!(result.total, 3);
        assert_eq!(repo.calls("list_by_genre_ids"), 1);
        assert_eq!(repo.calls("get_by_ids"), 1);
        let crime = &result.items[0];
        assert_eq!(crime.name, "Crime");
        assert_eq!(crime.categories[0].name.as_deref(), Some("Action"));
        assert!(result.items[2].categories.is_empty());
    }

    #[test]
    fn list_without_categories_skips_name_lookup() {
        let repo = TestRepository::new();
        seeded_genre(&repo, "Drama", &[]);

        let result = list_genres(&SearchQuery::new(), &repo, &repo).unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(repo.calls("get_by_ids"), 0);
    }
}
