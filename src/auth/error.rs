// Authentication error types

use crate::error::RepositoryError;

/// Failures while issuing or checking bearer tokens
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are deliberately indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing authentication token")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("token has expired")]
    ExpiredToken,
    #[error("token generation failed: {0}")]
    TokenGeneration(String),
    #[error("password verification task failed: {0}")]
    Verification(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
