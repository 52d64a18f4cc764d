use crate::repository::UnitOfWork;

pub mod cast_members;
pub mod categories;
pub mod errors;
pub mod genres;

pub use errors::{ServiceError, ServiceResult};

/// Runs `work` and commits `uow` on success.
///
/// On failure the unit of work is rolled back and the original error is
/// returned; a failed rollback is only logged.
pub fn transaction<U, T, F>(uow: &U, work: F) -> ServiceResult<T>
where
    U: UnitOfWork,
    F: FnOnce() -> ServiceResult<T>,
{
    match work() {
        Ok(value) => {
            uow.commit()?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_error) = uow.rollback() {
                log::warn!("Failed to roll back unit of work: {rollback_error}");
            }
            Err(e)
        }
    }
}

/// Target of an optional `is_active` toggle, `None` when nothing changes.
fn activation_change(requested: Option<bool>, current: bool) -> Option<bool> {
    requested.filter(|requested| *requested != current)
}
