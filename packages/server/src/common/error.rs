use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error taxonomy.
///
/// Every failure a handler can produce maps onto one of these variants; the
/// `IntoResponse` impl turns each into an HTTP status plus a JSON body with a
/// human-readable message. Business failures surface directly to the caller,
/// nothing is retried internally.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("Invalid or expired OTP")]
    InvalidCredential,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Insufficient stock")]
    InsufficientStock,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredential => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientStock => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Infrastructure failures are logged with detail but surfaced opaque.
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "Internal server error".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_is_stable() {
        assert_eq!(
            AppError::NotFound("Product").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("Category").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidCredential.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::PermissionDenied("admin only").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InvalidArgument("bad status".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InsufficientStock.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_messages_name_the_entity() {
        assert_eq!(AppError::NotFound("Product").to_string(), "Product not found");
        assert_eq!(
            AppError::Conflict("Category").to_string(),
            "Category already exists"
        );
    }
}
