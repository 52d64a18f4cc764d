use crate::domain::category::Category;
use crate::domain::search::{SearchQuery, SearchResult};
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{CreateCategoryPayload, UpdateCategoryPayload};
use crate::repository::{CrudStore, Searchable, UnitOfWork};

use super::{ServiceResult, activation_change, transaction};

pub fn create_category<U, S>(
    payload: CreateCategoryPayload,
    uow: &U,
    store: &S,
) -> ServiceResult<CategoryDto>
where
    U: UnitOfWork,
    S: CrudStore<Category, Id = CategoryId>,
{
    transaction(uow, || {
        let category = Category::new(payload.name, payload.description, payload.is_active)?;
        store.insert(&category)?;
        log::debug!("Created category {}", category.id());
        Ok(CategoryDto::from(category))
    })
}

pub fn get_category<S>(id: CategoryId, store: &S) -> ServiceResult<CategoryDto>
where
    S: CrudStore<Category, Id = CategoryId>,
{
    Ok(CategoryDto::from(store.get(id)?))
}

/// Replaces name and description; `is_active` is toggled only when it
/// differs from the stored value.
pub fn update_category<U, S>(
    id: CategoryId,
    payload: UpdateCategoryPayload,
    uow: &U,
    store: &S,
) -> ServiceResult<CategoryDto>
where
    U: UnitOfWork,
    S: CrudStore<Category, Id = CategoryId>,
{
    transaction(uow, || {
        let mut category = store.get(id)?;
        category.update(payload.name, payload.description)?;
        match activation_change(payload.is_active, category.is_active()) {
            Some(true) => category.activate()?,
            Some(false) => category.deactivate()?,
            None => {}
        }
        store.update(&category)?;
        Ok(CategoryDto::from(category))
    })
}

pub fn delete_category<U, S>(id: CategoryId, uow: &U, store: &S) -> ServiceResult<()>
where
    U: UnitOfWork,
    S: CrudStore<Category, Id = CategoryId>,
{
    transaction(uow, || {
        let category = store.get(id)?;
        store.delete(&category)?;
        log::debug!("Deleted category {id}");
        Ok(())
    })
}

pub fn list_categories<S>(
    query: &SearchQuery,
    store: &S,
) -> ServiceResult<SearchResult<CategoryDto>>
where
    S: Searchable<Category>,
{
    Ok(store.search(query)?.map(CategoryDto::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::SearchOrder;
    use crate::repository::test::TestRepository;
    use crate::services::ServiceError;

    fn create_payload(name: &str) -> CreateCategoryPayload {
        CreateCategoryPayload {
            name: name.to_string(),
            description: "desc".to_string(),
            is_active: true,
        }
    }

    fn update_payload(name: &str) -> UpdateCategoryPayload {
        UpdateCategoryPayload {
            name: name.to_string(),
            description: None,
            is_active: None,
        }
    }

    #[test]
    fn create_commits_the_category() {
        let repo = TestRepository::new();

        let dto = create_category(create_payload("Action"), &repo, &repo).unwrap();

        let stored = repo.committed_category(dto.id).unwrap();
        assert_eq!(stored.name(), "Action");
        assert_eq!(stored.description(), "desc");
        assert!(stored.is_active());
        assert_eq!(repo.calls("commit"), 1);
    }

    #[test]
    fn create_rejects_short_name_before_any_write() {
        let repo = TestRepository::new();

        let err = create_category(create_payload("ab"), &repo, &repo).unwrap_err();

        assert_eq!(
            err,
            ServiceError::EntityValidation("Name should be at least 3 characters long".into())
        );
        assert_eq!(repo.calls("insert_category"), 0);
        assert_eq!(repo.calls("commit"), 0);
        assert_eq!(repo.calls("rollback"), 1);
    }

    #[test]
    fn get_unknown_category_is_not_found() {
        let repo = TestRepository::new();
        let id = CategoryId::new();

        let err = get_category(id, &repo).unwrap_err();

        assert_eq!(
            err,
            ServiceError::NotFound(format!("Category '{id}' not found."))
        );
    }

    #[test]
    fn update_keeps_description_when_absent() {
        let category = Category::new("Action", "keep me", true).unwrap();
        let repo = TestRepository::with_categories(vec![category.clone()]);

        let dto =
            update_category(category.id(), update_payload("Adventure"), &repo, &repo).unwrap();

        assert_eq!(dto.name, "Adventure");
        assert_eq!(dto.description, "keep me");
        assert!(dto.is_active);
    }

    #[test]
    fn update_toggles_activation() {
        let category = Category::new("Action", "", true).unwrap();
        let repo = TestRepository::with_categories(vec![category.clone()]);
        let payload = UpdateCategoryPayload {
            is_active: Some(false),
            ..update_payload("Action")
        };

        update_category(category.id(), payload, &repo, &repo).unwrap();

        assert!(!repo.committed_category(category.id()).unwrap().is_active());
    }

    #[test]
    fn invalid_update_leaves_category_untouched() {
        let category = Category::new("Action", "", true).unwrap();
        let repo = TestRepository::with_categories(vec![category.clone()]);

        let result = update_category(category.id(), update_payload(""), &repo, &repo);

        assert!(matches!(result, Err(ServiceError::EntityValidation(_))));
        assert_eq!(repo.committed_category(category.id()), Some(category));
        assert_eq!(repo.calls("update_category"), 0);
    }

    #[test]
    fn delete_removes_the_category() {
        let category = Category::new("Action", "", true).unwrap();
        let repo = TestRepository::with_categories(vec![category.clone()]);

        delete_category(category.id(), &repo, &repo).unwrap();

        assert_eq!(repo.committed_category(category.id()), None);
    }

    #[test]
    fn delete_unknown_category_rolls_back() {
        let repo = TestRepository::new();

        let result = delete_category(CategoryId::new(), &repo, &repo);

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert_eq!(repo.calls("rollback"), 1);
    }

    #[test]
    fn list_filters_by_name() {
        let categories = ["Action", "Horror", "Horror Comedy", "Drama"]
            .into_iter()
            .map(|name| Category::new(name, "", true).unwrap())
            .collect();
        let repo = TestRepository::with_categories(categories);
        let query = SearchQuery::new()
            .paginate(1, 10)
            .search("Horror")
            .sort("name", SearchOrder::Asc);

        let result = list_categories(&query, &repo).unwrap();

        assert_eq!(result.total, 2);
        let names: Vec<&str> = result.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Horror", "Horror Comedy"]);
    }
}
