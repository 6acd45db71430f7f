use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::repository::RepositoryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(e) => AppError::Database(e),
            RepositoryError::Duplicate(msg) => AppError::Conflict(msg),
            RepositoryError::Constraint(msg) => AppError::Validation(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                format!("Database error: {}", e)
            }
            AppError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                msg
            }
            AppError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                msg
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_map_to_http_statuses() {
        let conflict: AppError = RepositoryError::Duplicate("vin_code".into()).into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let invalid: AppError = RepositoryError::Constraint("car_id".into()).into();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let storage: AppError = RepositoryError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_renders_json_body_with_status() {
        let response = AppError::NotFound("car 7".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
