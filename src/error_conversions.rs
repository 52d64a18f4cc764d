//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! every cross-layer `From` lives here.

use crate::domain::types::TypeConstraintError;
use crate::domain::validation::EntityValidationError;
use crate::repository::RepositoryError;

impl From<EntityValidationError> for TypeConstraintError {
    fn from(val: EntityValidationError) -> Self {
        TypeConstraintError::InvalidValue(val.0)
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<EntityValidationError> for RepositoryError {
    fn from(val: EntityValidationError) -> Self {
        RepositoryError::ValidationError(val.0)
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::domain::validation::EntityValidationError;
    use crate::forms::FormError;
    use crate::repository::RepositoryError;
    use crate::services::ServiceError;

    impl From<EntityValidationError> for ServiceError {
        fn from(val: EntityValidationError) -> Self {
            ServiceError::EntityValidation(val.0)
        }
    }

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    /// Maps store failures onto the caller-facing variants; anything that is
    /// not a domain outcome becomes [`ServiceError::Internal`].
    impl From<RepositoryError> for ServiceError {
        fn from(val: RepositoryError) -> Self {
            match val {
                RepositoryError::NotFound(message) => ServiceError::NotFound(message),
                RepositoryError::RelatedAggregateNotFound(message) => {
                    ServiceError::RelatedAggregate(message)
                }
                other => {
                    log::error!("Repository failure: {other}");
                    ServiceError::Internal
                }
            }
        }
    }
}
