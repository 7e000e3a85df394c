//! Bearer-token credentials.
//!
//! The client asks its [`TokenCredential`] for a token before every request,
//! so implementations that cache and refresh tokens work unchanged.
//!
//! ```rust,no_run
//! use schema_registry::{AccessToken, TokenCredential};
//!
//! struct VaultCredential { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl TokenCredential for VaultCredential {
//!     async fn get_token(&self, scopes: &[&str]) -> schema_registry::Result<AccessToken> {
//!         // fetch / refresh token here
//!         Ok(AccessToken::never_expiring("fresh-token"))
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use std::fmt;

/// An access token and the instant it stops being valid.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_on,
        }
    }

    /// A token with no practical expiry.
    pub fn never_expiring(token: impl Into<String>) -> Self {
        Self::new(token, DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self) -> bool {
        self.expires_on <= Utc::now()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Supplies bearer tokens for outgoing requests.
#[async_trait::async_trait]
pub trait TokenCredential: Send + Sync {
    /// Return a token valid for the given scopes.
    async fn get_token(&self, scopes: &[&str]) -> crate::Result<AccessToken>;
}

/// A credential that always returns the same token.
#[derive(Clone)]
pub struct StaticTokenCredential {
    token: AccessToken,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::never_expiring(token),
        }
    }

    pub fn with_expiry(token: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        Self {
            token: AccessToken::new(token, expires_on),
        }
    }
}

impl fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenCredential")
            .field("token", &self.token)
            .finish()
    }
}

#[async_trait::async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scopes: &[&str]) -> crate::Result<AccessToken> {
        if self.token.is_expired() {
            return Err(crate::SchemaRegistryError::Credential(format!(
                "static token expired at {}",
                self.token.expires_on
            )));
        }
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_static_credential_returns_token() {
        let credential = StaticTokenCredential::new("secret");
        let token = credential.get_token(&["scope/.default"]).await.unwrap();
        assert_eq!(token.token, "secret");
        assert!(!token.is_expired());
    }

    #[tokio::test]
    async fn test_expired_static_credential_fails() {
        let credential =
            StaticTokenCredential::with_expiry("old", Utc::now() - Duration::minutes(5));
        let err = credential.get_token(&[]).await.unwrap_err();
        assert!(err.to_string().starts_with("credential error"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", StaticTokenCredential::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
