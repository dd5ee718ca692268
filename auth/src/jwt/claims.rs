use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload binding a subject to an issuance/expiry window.
///
/// The token is self-contained: validity is purely a function of the
/// signature and `exp` versus the current time. Nothing is persisted
/// server-side and there is no revocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the username the token authenticates)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject with an expiry window starting now.
    ///
    /// # Arguments
    /// * `subject` - Identity string embedded in the token
    /// * `validity_hours` - Hours until the token expires
    pub fn for_subject(subject: impl Into<String>, validity_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(validity_hours);

        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the claims are expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
