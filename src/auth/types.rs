//! Auth configuration types

use chrono::{DateTime, Utc};

/// Default IAM token endpoint
pub const DEFAULT_IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Static bearer token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// IAM API key, exchanged for a short-lived bearer token
    IamApiKey {
        /// The API key
        apikey: String,
        /// Token endpoint
        token_url: String,
        /// Optional client id sent as basic auth to the token endpoint
        client_id: Option<String>,
        /// Optional client secret sent as basic auth to the token endpoint
        client_secret: Option<String>,
    },
}

impl AuthConfig {
    /// IAM API key auth against the default token endpoint
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::IamApiKey {
            apikey: apikey.into(),
            token_url: DEFAULT_IAM_TOKEN_URL.to_string(),
            client_id: None,
            client_secret: None,
        }
    }

    /// Static bearer token auth
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Short name of the scheme, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "noauth",
            Self::Bearer { .. } => "bearertoken",
            Self::Basic { .. } => "basic",
            Self::IamApiKey { .. } => "iam",
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    ///
    /// A lifetime too large to represent is treated as never expiring.
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = chrono::Duration::try_seconds(seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
        Self { token, expires_at }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_expiry() {
        assert!(!CachedToken::expires_in("t".to_string(), 3600).is_expired());
        assert!(CachedToken::expires_in("t".to_string(), -100).is_expired());
        // Inside the 30 second buffer counts as expired
        assert!(CachedToken::expires_in("t".to_string(), 10).is_expired());
        assert!(!CachedToken::new("t".to_string(), None).is_expired());
    }

    #[test]
    fn test_cached_token_huge_lifetime() {
        let token = CachedToken::expires_in("t".to_string(), i64::MAX);
        assert!(token.expires_at.is_none());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_auth_config_constructors() {
        assert!(matches!(AuthConfig::default(), AuthConfig::None));

        match AuthConfig::iam("key") {
            AuthConfig::IamApiKey {
                apikey, token_url, ..
            } => {
                assert_eq!(apikey, "key");
                assert_eq!(token_url, DEFAULT_IAM_TOKEN_URL);
            }
            other => panic!("unexpected config: {other:?}"),
        }

        assert_eq!(AuthConfig::bearer("t").kind(), "bearertoken");
    }
}
