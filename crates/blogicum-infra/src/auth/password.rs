//! Argon2id password hashing.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, Version};

use blogicum_core::ports::{AuthError, PasswordService};

fn hashing_error(e: impl std::fmt::Display) -> AuthError {
    AuthError::HashingError(e.to_string())
}

/// Argon2-based password service. Stores PHC strings, so hashes made with
/// other cost parameters still verify.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Argon2id with explicit costs (memory in KiB).
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(hashing_error)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(hashing_error)?;
        Ok(hash.to_string())
    }

    /// A wrong password is `Ok(false)`; a stored hash that cannot be parsed is an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let stored = PasswordHash::new(hash).map_err(hashing_error)?;

        match self.argon2.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => {
                tracing::error!(error = %e, "Stored password hash could not be checked");
                Err(hashing_error(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2PasswordService {
        Argon2PasswordService::with_params(8, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let service = cheap();

        let hash = service.hash("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify("correct horse", &hash).unwrap());
        assert!(!service.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = cheap();
        assert_ne!(service.hash("same").unwrap(), service.hash("same").unwrap());
    }

    #[test]
    fn test_default_service_verifies_cheap_hash() {
        let hash = cheap().hash("password123").unwrap();
        assert!(Argon2PasswordService::new().verify("password123", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(matches!(
            cheap().verify("password", "not-a-phc-string"),
            Err(AuthError::HashingError(_))
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(Argon2PasswordService::with_params(0, 0, 0).is_err());
    }
}
