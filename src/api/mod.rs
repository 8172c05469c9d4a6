pub mod archive;
pub mod attendance;
pub mod backup;
pub mod employee;
pub mod leave_request;
pub mod report;
pub mod tools;

use std::sync::{Mutex, MutexGuard};

use actix_web::web;
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

pub type SharedState = web::Data<Mutex<AppState>>;

/// Locks the shared state. A poisoned lock means a handler panicked mid-write.
pub(crate) fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, AppError> {
    state.lock().map_err(|_| {
        error!("Application state lock poisoned");
        AppError::Internal
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn shared(state: AppState) -> SharedState {
        web::Data::new(Mutex::new(state))
    }

    /// Same service tree as production, without rate limiting.
    #[macro_export]
    macro_rules! test_app {
        ($state:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data($state.clone())
                    .service(actix_web::web::scope("/api/v1").configure($crate::routes::v1)),
            )
            .await
        };
    }
}
