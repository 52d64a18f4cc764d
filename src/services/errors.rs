use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("{0}")]
    NotFound(String),
    /// The aggregate rejected the submitted values.
    #[error("{0}")]
    EntityValidation(String),
    /// The request references categories that do not exist.
    #[error("{0}")]
    RelatedAggregate(String),
    /// The submitted form could not be turned into a payload.
    #[error("{0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
