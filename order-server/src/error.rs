//! Service-layer error type
//!
//! `ServiceError` bridges repository errors (`RepoError`) and the API-layer
//! error (`AppError`), so handlers can use `?` on store calls.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::IntoResponse;
use shared::error::AppError;

use crate::db::RepoError;

/// Service-layer error
///
/// - `Repo`: storage errors (database failures are logged and answered with 500)
/// - `App`: business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    App(AppError),
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        ServiceError::Repo(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

/// Unparsable JSON bodies answer 400 with the error envelope
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::App(AppError::invalid_request(rejection.body_text()))
    }
}

/// Non-numeric ids answer 400 with the error envelope
impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::App(AppError::invalid_request(rejection.body_text()))
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Repo(RepoError::NotFound(what)) => AppError::not_found(what),
            ServiceError::Repo(RepoError::Validation(msg)) => AppError::validation(msg),
            ServiceError::Repo(RepoError::Database(msg)) => {
                tracing::error!(error = %msg, "Database operation failed");
                AppError::database(msg)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use shared::error::ErrorCode;

    #[test]
    fn test_database_error_surfaces_driver_message() {
        let err: AppError =
            ServiceError::from(RepoError::Database("relation \"orders\" does not exist".into()))
                .into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("relation"));
    }

    #[test]
    fn test_app_error_passes_through() {
        let err: AppError = ServiceError::from(AppError::order_not_found(5)).into();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_into_response_status() {
        let response = ServiceError::from(RepoError::Validation("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
