use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::search::SearchQuery;
use crate::domain::types::CategoryId;
use crate::dto::{DataDto, ListDto};
use crate::forms::ListQueryForm;
use crate::forms::categories::{
    CreateCategoryForm, CreateCategoryPayload, UpdateCategoryForm, UpdateCategoryPayload,
};
use crate::repository::{DieselCategoryStore, DieselRepository};
use crate::routes::{blocking, error_response};
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    get_category as get_category_service, list_categories as list_categories_service,
    update_category as update_category_service,
};

#[get("/categories")]
pub async fn list_categories(
    params: web::Query<ListQueryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = match SearchQuery::try_from(params.into_inner()) {
        Ok(query) => query,
        Err(e) => return error_response(e.into()),
    };

    let result = blocking(move || {
        let uow = repo.autocommit()?;
        list_categories_service(&query, &DieselCategoryStore::new(&uow))
    })
    .await;

    match result {
        Ok(page) => HttpResponse::Ok().json(ListDto::from(page)),
        Err(e) => error_response(e),
    }
}

#[post("/categories")]
pub async fn create_category(
    form: web::Json<CreateCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let payload = match CreateCategoryPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    let result = blocking(move || {
        let uow = repo.unit_of_work()?;
        create_category_service(payload, &uow, &DieselCategoryStore::new(&uow))
    })
    .await;

    match result {
        Ok(category) => HttpResponse::Created().json(DataDto::new(category)),
        Err(e) => error_response(e),
    }
}

#[get("/categories/{id}")]
pub async fn get_category(
    id: web::Path<CategoryId>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();

    let result = blocking(move || {
        let uow = repo.autocommit()?;
        get_category_service(id, &DieselCategoryStore::new(&uow))
    })
    .await;

    match result {
        Ok(category) => HttpResponse::Ok().json(DataDto::new(category)),
        Err(e) => error_response(e),
    }
}

#[put("/categories/{id}")]
pub async fn update_category(
    id: web::Path<CategoryId>,
    form: web::Json<UpdateCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    let payload = match UpdateCategoryPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    let result = blocking(move || {
        let uow = repo.unit_of_work()?;
        update_category_service(id, payload, &uow, &DieselCategoryStore::new(&uow))
    })
    .await;

    match result {
        Ok(category) => HttpResponse::Ok().json(DataDto::new(category)),
        Err(e) => error_response(e),
    }
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    id: web::Path<CategoryId>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();

    let result = blocking(move || {
        let uow = repo.unit_of_work()?;
        delete_category_service(id, &uow, &DieselCategoryStore::new(&uow))
    })
    .await;

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}
