use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::{ServiceError, ServiceResult};

pub mod cast_members;
pub mod categories;
pub mod genres;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    pub title: &'static str,
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub detail: String,
}

impl From<&ServiceError> for ProblemDetails {
    fn from(err: &ServiceError) -> Self {
        let (status, title, kind) = match err {
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found", "NotFound"),
            ServiceError::EntityValidation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "One or more validation errors occurred",
                "UnprocessableEntity",
            ),
            ServiceError::RelatedAggregate(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid Related Aggregate",
                "RelatedAggregate",
            ),
            ServiceError::Form(_) => (StatusCode::BAD_REQUEST, "Bad Request", "BadRequest"),
            ServiceError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
                "UnexpectedError",
            ),
        };
        Self {
            title,
            status: status.as_u16(),
            kind,
            detail: err.to_string(),
        }
    }
}

pub fn error_response(err: ServiceError) -> HttpResponse {
    let problem = ProblemDetails::from(&err);
    let status =
        StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(problem)
}

/// Runs synchronous store work on the blocking thread pool.
pub async fn blocking<T, F>(work: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(work).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Blocking task failed: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Registers every catalog endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::get_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(genres::list_genres)
        .service(genres::create_genre)
        .service(genres::get_genre)
        .service(genres::update_genre)
        .service(genres::delete_genre)
        .service(cast_members::list_cast_members)
        .service(cast_members::create_cast_member)
        .service(cast_members::get_cast_member)
        .service(cast_members::delete_cast_member);
}
