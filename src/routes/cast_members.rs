use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::domain::search::SearchQuery;
use crate::domain::types::CastMemberId;
use crate::dto::{DataDto, ListDto};
use crate::forms::ListQueryForm;
use crate::forms::cast_members::{CreateCastMemberForm, CreateCastMemberPayload};
use crate::repository::{DieselCastMemberStore, DieselRepository};
use crate::routes::{blocking, error_response};
use crate::services::cast_members::{
    create_cast_member as create_cast_member_service,
    delete_cast_member as delete_cast_member_service, get_cast_member as get_cast_member_service,
    list_cast_members as list_cast_members_service,
};

#[get("/cast_members")]
pub async fn list_cast_members(
    params: web::Query<ListQueryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = match SearchQuery::try_from(params.into_inner()) {
        Ok(query) => query,
        Err(e) => return error_response(e.into()),
    };

    let result = blocking(move || {
        let uow = repo.autocommit()?;
        list_cast_members_service(&query, &DieselCastMemberStore::new(&uow))
    })
    .await;

    match result {
        Ok(page) => HttpResponse::Ok().json(ListDto::from(page)),
        Err(e) => error_response(e),
    }
}

#[post("/cast_members")]
pub async fn create_cast_member(
    form: web::Json<CreateCastMemberForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let payload = match CreateCastMemberPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    let result = blocking(move || {
        let uow = repo.unit_of_work()?;
        create_cast_member_service(payload, &uow, &DieselCastMemberStore::new(&uow))
    })
    .await;

    match result {
        Ok(member) => HttpResponse::Created().json(DataDto::new(member)),
        Err(e) => error_response(e),
    }
}

#[get("/cast_members/{id}")]
pub async fn get_cast_member(
    id: web::Path<CastMemberId>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();

    let result = blocking(move || {
        let uow = repo.autocommit()?;
        get_cast_member_service(id, &DieselCastMemberStore::new(&uow))
    })
    .await;

    match result {
        Ok(member) => HttpResponse::Ok().json(DataDto::new(member)),
        Err(e) => error_response(e),
    }
}

#[delete("/cast_members/{id}")]
pub async fn delete_cast_member(
    id: web::Path<CastMemberId>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();

    let result = blocking(move || {
        let uow = repo.unit_of_work()?;
        delete_cast_member_service(id, &uow, &DieselCastMemberStore::new(&uow))
    })
    .await;

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}
