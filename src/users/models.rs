use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

use crate::error::EntityError;
use crate::id::Id;
use crate::users::password::PasswordService;

/// User database model
/// The plaintext password never lives here, only its salted Argon2 hash
#[derive(Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Build a user, hashing `password` immediately
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> Result<Self, EntityError> {
        let name = name.into();
        let email = email.into();

        if name.is_empty() {
            return Err(EntityError::NameRequired);
        }
        if email.is_empty() {
            return Err(EntityError::EmailRequired);
        }

        let password_hash = PasswordService::hash_password(password)?;

        Ok(Self {
            id: Id::generate(),
            name,
            email,
            password_hash,
        })
    }

    /// Check a candidate password against the stored hash
    pub fn validate_password(&self, candidate: &str) -> bool {
        PasswordService::verify_password(candidate, &self.password_hash)
    }
}

// Hash stays out of logs
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Body of POST /users
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of POST /users/generate-jwt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetJwtInput {
    pub email: String,
    pub password: String,
}

/// Response of POST /users/generate-jwt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetJwtOutput {
    pub access_token: String,
}
