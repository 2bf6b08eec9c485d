// Password hashing and verification with Argon2id

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::EntityError;

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt, producing a PHC string
    pub fn hash_password(password: &str) -> Result<String, EntityError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| EntityError::PasswordHash(e.to_string()))
    }

    /// Verify a password against a stored hash
    /// A malformed hash never verifies
    pub fn verify_password(password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash_password("@Pass123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordService::verify_password("@Pass123", &hash));
        assert!(!PasswordService::verify_password("wrongPassword", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = PasswordService::hash_password("SamePassword123").unwrap();
        let b = PasswordService::hash_password("SamePassword123").unwrap();
        assert_ne!(a, b);
        assert!(PasswordService::verify_password("SamePassword123", &a));
        assert!(PasswordService::verify_password("SamePassword123", &b));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!PasswordService::verify_password("anything", "not-a-phc-string"));
        assert!(!PasswordService::verify_password("", ""));
    }
}
