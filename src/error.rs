// Error handling module for the Catalog API
// Provides the domain error types and their conversion into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::auth::AuthError;

/// Validation failures raised while constructing an entity
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("name is required")]
    NameRequired,
    #[error("price is required")]
    PriceRequired,
    #[error("price is invalid")]
    InvalidPrice,
    #[error("email is required")]
    EmailRequired,
    /// Hashing is treated as fatal for user construction
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

/// Failures reported by a storage engine
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    /// A uniqueness constraint rejected the write
    #[error("constraint violated: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Main error type for the API
/// All handlers return Result<T, ApiError>
///
/// Each variant maps to one HTTP status code and carries the message
/// that is safe to show to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Maps to HTTP 400 Bad Request
    #[error("{0}")]
    BadRequest(String),

    /// Maps to HTTP 404 Not Found
    #[error("{0}")]
    NotFound(String),

    /// Maps to HTTP 401 Unauthorized
    #[error("{0}")]
    Unauthorized(String),

    /// Underlying store failure, maps to HTTP 500
    /// The source is logged but never sent to the client
    #[error("{message}: {source}")]
    Storage {
        message: String,
        #[source]
        source: RepositoryError,
    },

    /// Any other server-side failure, maps to HTTP 500
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Translate a repository failure, choosing the client message for each case
    pub fn from_repository(err: RepositoryError, not_found: &str, storage: &str) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound(not_found.to_string()),
            other => ApiError::Storage {
                message: storage.to_string(),
                source: other,
            },
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Unauthorized(message) => message,
            ApiError::Storage { message, .. } | ApiError::Internal { message, .. } => message,
        }
    }

    fn log(&self) {
        match self {
            ApiError::BadRequest(message) => debug!("Bad request: {}", message),
            ApiError::NotFound(message) => debug!("Not found: {}", message),
            ApiError::Unauthorized(message) => warn!("Unauthorized request: {}", message),
            ApiError::Storage { source, .. } => error!("Storage error: {:?}", source),
            ApiError::Internal { detail, .. } => error!("Internal error: {}", detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = ErrorResponse {
            message: self.message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::MissingToken => {
                ApiError::Unauthorized("Missing authentication token".to_string())
            }
            AuthError::InvalidToken => ApiError::Unauthorized("Invalid token".to_string()),
            AuthError::ExpiredToken => ApiError::Unauthorized("Token has expired".to_string()),
            AuthError::TokenGeneration(detail) | AuthError::Verification(detail) => {
                ApiError::Internal {
                    message: "Internal Server Error".to_string(),
                    detail,
                }
            }
            AuthError::Repository(source) => ApiError::Storage {
                message: "Internal Server Error".to_string(),
                source,
            },
        }
    }
}
