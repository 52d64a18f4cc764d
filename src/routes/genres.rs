use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::search::SearchQuery;
use crate::domain::types::GenreId;
use crate::dto::{DataDto, ListDto};
use crate::forms::ListQueryForm;
use crate::forms::genres::{
    CreateGenreForm, CreateGenrePayload, UpdateGenreForm, UpdateGenrePayload,
};
use crate::repository::{
    DieselCategoryStore, DieselGenreStore, DieselRelationStore, DieselRepository,
};
use crate::routes::{blocking, error_response};
use crate::services::genres::{
    create_genre as create_genre_service, delete_genre as delete_genre_service,
    get_genre as get_genre_service, list_genres as list_genres_service,
    update_genre as update_genre_service,
};

#[get("/genres")]
pub async fn list_genres(
    params: web::Query<ListQueryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = match SearchQuery::try_from(params.into_inner()) {
        Ok(query) => query,
        Err(e) => return error_response(e.into()),
    };

    let result = blocking(move || {
        let uow = repo.autocommit()?;
        list_genres_service(
            &query,
            &DieselGenreStore::new(&uow),
            &DieselCategoryStore::new(&uow),
        )
    })
    .await;

    match result {
        Ok(page) => HttpResponse::Ok().json(ListDto::from(page)),
        Err(e) => error_response(e),
    }
}

#[post("/genres")]
pub async fn create_genre(
    form: web::Json<CreateGenreForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let payload = match CreateGenrePayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    let result = blocking(move || {
        let uow = repo.unit_of_work()?;
        create_genre_service(payload, &uow, &DieselGenreStore::new(&uow))
    })
    .await;

    match result {
        Ok(genre) => HttpResponse::Created().json(DataDto::new(genre)),
        Err(e) => error_response(e),
    }
}

#[get("/genres/{id}")]
pub async fn get_genre(
    id: web::Path<GenreId>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();

    let result = blocking(move || {
        let uow = repo.autocommit()?;
        get_genre_service(id, &DieselGenreStore::new(&uow))
    })
    .await;

    match result {
        Ok(genre) => HttpResponse::Ok().json(DataDto::new(genre)),
        Err(e) => error_response(e),
    }
}

#[put("/genres/{id}")]
pub async fn update_genre(
    id: web::Path<GenreId>,
    form: web::Json<UpdateGenreForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    let payload = match UpdateGenrePayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    let result = blocking(move || {
        let uow = repo.unit_of_work()?;
        update_genre_service(
            id,
            payload,
            &uow,
            &DieselGenreStore::new(&uow),
            &DieselCategoryStore::new(&uow),
            &DieselRelationStore::new(&uow),
        )
    })
    .await;

    match result {
        Ok(genre) => HttpResponse::Ok().json(DataDto::new(genre)),
        Err(e) => error_response(e),
    }
}

#[delete("/genres/{id}")]
pub async fn delete_genre(
    id: web::Path<GenreId>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();

    let result = blocking(move || {
        let uow = repo.unit_of_work()?;
        delete_genre_service(id, &uow, &DieselGenreStore::new(&uow))
    })
    .await;

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}
