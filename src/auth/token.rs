// JWT token generation and validation service

use crate::auth::error::AuthError;
use crate::id::Id;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Id, // user_id
    pub exp: i64, // absolute expiry, unix seconds
    pub iat: i64, // issued at, unix seconds
}

/// Token service for JWT operations
/// Secret and lifetime come from configuration at construction time
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64, // in seconds
}

impl TokenService {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    /// Sign a token for `subject` using the configured lifetime
    pub fn generate_access_token(&self, subject: Id) -> Result<String, AuthError> {
        self.generate(subject, self.expires_in)
    }

    /// Sign a token for `subject` that expires `expires_in` seconds from now
    pub fn generate(&self, subject: Id, expires_in: i64) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject,
            iat: now,
            exp: now + expires_in,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Check signature and expiry, returning the claims
    /// `exp` is enforced to the second, with no clock-skew leeway
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })
    }
}
