// Authentication service - business logic layer

use std::sync::Arc;

use crate::auth::{error::AuthError, token::TokenService};
use crate::error::RepositoryError;
use crate::users::UserRepository;

/// Exchanges credentials for signed bearer tokens
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Look up the user by email, check the password and issue a token
    /// with the configured lifetime
    pub async fn issue_token(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = match self.users.find_by_email(email).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound) => {
                tracing::warn!("Token requested for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        // Argon2 is CPU bound; keep it off the async workers
        let candidate = password.to_string();
        let (user, valid) = tokio::task::spawn_blocking(move || {
            let valid = user.validate_password(&candidate);
            (user, valid)
        })
        .await
        .map_err(|e| AuthError::Verification(e.to_string()))?;

        if !valid {
            tracing::warn!("Wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.generate_access_token(user.id)?;
        tracing::info!("Issued token for user {}", user.id);
        Ok(token)
    }
}
