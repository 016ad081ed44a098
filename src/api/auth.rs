//! Application-only OAuth token handling.

use std::time::{Duration, Instant};

use crate::api::types::TokenResponse;

/// Refresh tokens this long before Reddit says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// A bearer token with its local expiry instant.
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    /// Create a token that expires `expires_in` after `issued_at`.
    pub fn new(value: String, expires_in: Duration, issued_at: Instant) -> Self {
        Self {
            value,
            expires_at: issued_at + expires_in,
        }
    }

    /// Build a token from the token endpoint response.
    pub fn from_response(response: TokenResponse) -> Self {
        Self::new(
            response.access_token,
            Duration::from_secs(response.expires_in),
            Instant::now(),
        )
    }

    /// The raw token value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("bearer {}", self.value)
    }

    /// Whether the token should be refreshed at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now + EXPIRY_MARGIN >= self.expires_at
    }

    /// Whether the token should be refreshed now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_not_expired() {
        let now = Instant::now();
        let token = AccessToken::new("abc".into(), Duration::from_secs(3600), now);
        assert!(!token.is_expired_at(now));
        assert!(!token.is_expired_at(now + Duration::from_secs(3000)));
    }

    #[test]
    fn test_token_expires_within_margin() {
        let now = Instant::now();
        let token = AccessToken::new("abc".into(), Duration::from_secs(3600), now);
        assert!(token.is_expired_at(now + Duration::from_secs(3540)));
        assert!(token.is_expired_at(now + Duration::from_secs(4000)));
    }

    #[test]
    fn test_short_lived_token_is_expired() {
        let now = Instant::now();
        let token = AccessToken::new("abc".into(), Duration::from_secs(30), now);
        assert!(token.is_expired_at(now));
    }

    #[test]
    fn test_header_value() {
        let token = AccessToken::from_response(TokenResponse {
            access_token: "tok".into(),
            token_type: "bearer".into(),
            expires_in: 86400,
            scope: Some("*".into()),
        });
        assert_eq!(token.value(), "tok");
        assert_eq!(token.header_value(), "bearer tok");
        assert!(!token.is_expired());
    }
}
