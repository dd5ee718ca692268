use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding compact signed tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a symmetric key. Encoding and
/// decoding keys are derived once at construction and are read-only
/// afterwards, so a single handler is safe to share across requests.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a caller-supplied secret key.
    ///
    /// The secret should be at least 256 bits (32 bytes) for HS256.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a handler with a fresh 256-bit key drawn from the OS RNG.
    ///
    /// The key exists only in this handler's memory. Tokens signed by a
    /// previous process are unverifiable after a restart.
    pub fn generate() -> Self {
        let mut secret = [0u8; 32];
        OsRng.fill_bytes(&mut secret);
        Self::new(&secret)
    }

    /// Encode claims into a compact token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token, checking signature integrity and expiry.
    ///
    /// Expiry is evaluated with zero leeway: a token is rejected the
    /// second its `exp` timestamp passes.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Signature does not match this handler's key
    /// * `Expired` - The `exp` claim is in the past
    /// * `Malformed` - Token structure or payload cannot be parsed
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::SignatureInvalid,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
