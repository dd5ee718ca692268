use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures all collapse to "unauthenticated" at the request
/// boundary; the distinction only exists for logging.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
