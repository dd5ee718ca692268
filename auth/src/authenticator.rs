use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance over one process-lifetime signing key.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Compact signed token, safe for an `Authorization: Bearer` header
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with a caller-supplied signing key.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Create an authenticator with a signing key generated from the OS RNG.
    ///
    /// The key is held only in memory and is immutable for the lifetime of
    /// this authenticator; restarting the process invalidates all tokens
    /// it has issued.
    pub fn with_generated_key() -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::generate(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a signed token.
    ///
    /// A stored hash that fails to parse is reported as `InvalidCredentials`,
    /// the same as a wrong password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate a signed token without password verification.
    ///
    /// Used when the caller has already established the subject's identity,
    /// e.g. right after registration or a profile update.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate and decode a signed token.
    ///
    /// # Errors
    /// * `JwtError` - Signature invalid, expired, or malformed
    pub fn validate_token<T: for<'de> serde::Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::Claims;

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::with_generated_key();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let claims = Claims::for_subject("alice", 24);
        let result = authenticator
            .authenticate(password, &hash, &claims)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded: Claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::with_generated_key();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let claims = Claims::for_subject("alice", 24);
        let result = authenticator.authenticate("wrong_password", &hash, &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let authenticator = Authenticator::with_generated_key();

        let claims = Claims::for_subject("alice", 24);
        let result = authenticator.authenticate("my_password", "garbage", &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::with_generated_key();

        let result = authenticator.validate_token::<Claims>("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_keys_are_process_scoped() {
        let first = Authenticator::with_generated_key();
        let second = Authenticator::with_generated_key();

        let token = first
            .generate_token(&Claims::for_subject("alice", 24))
            .expect("Failed to generate token");

        // A different key, as after a restart, rejects the token
        assert!(second.validate_token::<Claims>(&token).is_err());
    }
}
