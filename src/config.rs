//! Service configuration
//!
//! A `ServiceConfig` names the endpoint, the credentials, and the HTTP
//! behaviour of one service client. It can be read from a YAML file or from
//! `<NAME>_*` variables in the provider's external configuration convention.

use crate::auth::{AuthConfig, DEFAULT_IAM_TOKEN_URL};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::types::{AuthType, BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default service name, also the prefix of external config variables
pub const DEFAULT_SERVICE_NAME: &str = "iam_access_groups";

/// Default service endpoint
pub const DEFAULT_SERVICE_URL: &str = "https://iam.cloud.ibm.com/v2";

// ============================================================================
// Top-Level Service Config
// ============================================================================

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Base URL for API requests
    #[serde(default = "default_url")]
    pub url: String,

    /// Authentication settings
    #[serde(default)]
    pub auth: AuthSettings,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            url: default_url(),
            auth: AuthSettings::default(),
            http: HttpSettings::default(),
        }
    }
}

impl ServiceConfig {
    /// Config pointing at `url` with the given credentials
    pub fn new(url: impl Into<String>, auth: AuthSettings) -> Self {
        Self {
            url: url.into(),
            auth,
            ..Self::default()
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    /// Build from the process environment
    pub fn from_env(service_name: &str) -> Result<Self> {
        Self::from_vars(service_name, std::env::vars())
    }

    /// Build from an explicit set of `<NAME>_*` variables
    ///
    /// `<NAME>` is the service name upper-cased with `-` replaced by `_`.
    /// Unset variables fall back to defaults; an unset auth type means IAM.
    pub fn from_vars<I, K, V>(service_name: &str, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let prefix = env_prefix(service_name);
        let lookup = |suffix: &str| -> (String, Option<String>) {
            let key = format!("{prefix}_{suffix}");
            let value = vars.get(&key).cloned().none_if_empty();
            (key, value)
        };
        let require = |suffix: &str| -> Result<String> {
            let (key, value) = lookup(suffix);
            value.ok_or_else(|| Error::missing_field(key))
        };

        let mut config = Self {
            service_name: service_name.to_string(),
            ..Self::default()
        };

        if let (_, Some(url)) = lookup("URL") {
            config.url = url;
        }

        let auth_type = match lookup("AUTH_TYPE") {
            (key, Some(raw)) => raw
                .parse::<AuthType>()
                .map_err(|message| Error::invalid_value(key, message))?,
            (_, None) => AuthType::default(),
        };

        config.auth = match auth_type {
            AuthType::NoAuth => AuthSettings::None,
            AuthType::BearerToken => AuthSettings::Bearer {
                token: require("BEARER_TOKEN")?,
            },
            AuthType::Basic => AuthSettings::Basic {
                username: require("USERNAME")?,
                password: require("PASSWORD")?,
            },
            AuthType::Iam => AuthSettings::Iam {
                apikey: require("APIKEY")?,
                url: lookup("AUTH_URL")
                    .1
                    .unwrap_or_else(|| DEFAULT_IAM_TOKEN_URL.to_string()),
                client_id: lookup("CLIENT_ID").1,
                client_secret: lookup("CLIENT_SECRET").1,
            },
        };

        if let (key, Some(raw)) = lookup("MAX_RETRIES") {
            config.http.max_retries = raw
                .parse()
                .map_err(|_| Error::invalid_value(key, format!("'{raw}' is not a retry count")))?;
        }

        if let (key, Some(raw)) = lookup("TIMEOUT") {
            config.http.timeout_seconds = raw
                .parse()
                .map_err(|_| Error::invalid_value(key, format!("'{raw}' is not a number of seconds")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the URL and that credentials are present
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.url).map_err(|e| Error::invalid_value("url", e.to_string()))?;
        self.auth.validate()
    }

    /// Override the service URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// HTTP client settings for this service
    pub fn http_client_config(&self) -> HttpClientConfig {
        let backoff = &self.http.backoff;
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.url)
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            );
        if let Some(ref limit) = self.http.rate_limit {
            builder = builder.rate_limit(limit.clone());
        }
        builder.build()
    }

    /// Build an authenticated HTTP client
    pub fn build_http_client(&self) -> Result<HttpClient> {
        HttpClient::with_auth(self.http_client_config(), self.auth.to_auth_config())
    }
}

/// Variable prefix for a service name
pub fn env_prefix(service_name: &str) -> String {
    service_name.to_ascii_uppercase().replace('-', "_")
}

// ============================================================================
// Auth Settings
// ============================================================================

/// Credentials as written in configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthSettings {
    /// No authentication
    #[default]
    #[serde(rename = "noauth", alias = "none")]
    None,

    /// Static bearer token
    #[serde(rename = "bearertoken", alias = "bearer")]
    Bearer {
        /// The token
        token: String,
    },

    /// Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// IAM API key exchange
    Iam {
        /// The API key
        apikey: String,
        /// Token endpoint
        #[serde(default = "default_token_url")]
        url: String,
        /// Client id for the token endpoint
        #[serde(default)]
        client_id: Option<String>,
        /// Client secret for the token endpoint
        #[serde(default)]
        client_secret: Option<String>,
    },
}

fn default_token_url() -> String {
    DEFAULT_IAM_TOKEN_URL.to_string()
}

impl AuthSettings {
    /// Check that required credentials are non-empty
    pub fn validate(&self) -> Result<()> {
        let non_empty = |field: &str, value: &str| {
            if value.is_empty() {
                Err(Error::missing_field(format!("auth.{field}")))
            } else {
                Ok(())
            }
        };

        match self {
            Self::None => Ok(()),
            Self::Bearer { token } => non_empty("token", token),
            Self::Basic { username, password } => {
                non_empty("username", username)?;
                non_empty("password", password)
            }
            Self::Iam {
                apikey,
                client_id,
                client_secret,
                ..
            } => {
                non_empty("apikey", apikey)?;
                if client_id.is_some() != client_secret.is_some() {
                    return Err(Error::invalid_value(
                        "auth.client_id",
                        "client_id and client_secret must be set together",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Runtime auth configuration
    pub fn to_auth_config(&self) -> AuthConfig {
        match self {
            Self::None => AuthConfig::None,
            Self::Bearer { token } => AuthConfig::Bearer {
                token: token.clone(),
            },
            Self::Basic { username, password } => AuthConfig::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            Self::Iam {
                apikey,
                url,
                client_id,
                client_secret,
            } => AuthConfig::IamApiKey {
                apikey: apikey.clone(),
                token_url: url.clone(),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            },
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffSettings,

    /// Client side rate limit, off when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffSettings::default(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffSettings {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    250
}

fn default_max_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use test_case::test_case;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.service_name, "iam_access_groups");
        assert_eq!(config.url, "https://iam.cloud.ibm.com/v2");
        assert!(matches!(config.auth, AuthSettings::None));
        assert_eq!(config.http.max_retries, 3);
        assert!(config.http.rate_limit.is_none());
    }

    #[test]
    fn test_from_yaml_str_iam() {
        let yaml = r#"
url: https://iam.test.cloud.ibm.com/v2
auth:
  type: iam
  apikey: my-key
http:
  timeout_seconds: 5
  max_retries: 1
  backoff:
    type: constant
    initial_ms: 10
  rate_limit:
    requests_per_second: 2
"#;
        let config = ServiceConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.url, "https://iam.test.cloud.ibm.com/v2");
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.backoff.backoff_type, BackoffType::Constant);
        assert_eq!(config.http.backoff.max_ms, 30_000);
        assert_eq!(
            config.http.rate_limit,
            Some(RateLimiterConfig::new(2, 1))
        );

        match config.auth {
            AuthSettings::Iam { apikey, url, .. } => {
                assert_eq!(apikey, "my-key");
                assert_eq!(url, DEFAULT_IAM_TOKEN_URL);
            }
            other => panic!("unexpected auth: {other:?}"),
        }
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: http://localhost:8080/v2").unwrap();
        writeln!(file, "auth:\n  type: bearertoken\n  token: abc").unwrap();

        let config = ServiceConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.url, "http://localhost:8080/v2");
        assert!(matches!(config.auth, AuthSettings::Bearer { ref token } if token == "abc"));
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceConfig::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn test_from_yaml_rejects_empty_apikey() {
        let err = ServiceConfig::from_yaml_str("auth:\n  type: iam\n  apikey: ''\n").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "auth.apikey"));
    }

    #[test]
    fn test_from_yaml_rejects_bad_url() {
        let err = ServiceConfig::from_yaml_str("url: not a url\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "url"));
    }

    #[test]
    fn test_from_vars_iam_default() {
        let config = ServiceConfig::from_vars(
            "iam_access_groups",
            vars(&[
                ("IAM_ACCESS_GROUPS_URL", "https://iam.test.cloud.ibm.com/v2"),
                ("IAM_ACCESS_GROUPS_APIKEY", "key"),
                ("IAM_ACCESS_GROUPS_AUTH_URL", "https://iam.test.cloud.ibm.com/identity/token"),
                ("IAM_ACCESS_GROUPS_MAX_RETRIES", "0"),
                ("IAM_ACCESS_GROUPS_TIMEOUT", "15"),
                ("UNRELATED_APIKEY", "ignored"),
            ]),
        )
        .unwrap();

        assert_eq!(config.url, "https://iam.test.cloud.ibm.com/v2");
        assert_eq!(config.http.max_retries, 0);
        assert_eq!(config.http.timeout_seconds, 15);
        match config.auth.to_auth_config() {
            AuthConfig::IamApiKey {
                apikey, token_url, ..
            } => {
                assert_eq!(apikey, "key");
                assert_eq!(token_url, "https://iam.test.cloud.ibm.com/identity/token");
            }
            other => panic!("unexpected auth: {other:?}"),
        }
    }

    #[test_case("noauth", &[] ; "no auth needs nothing")]
    #[test_case("bearerToken", &[("MY_SVC_BEARER_TOKEN", "t")] ; "bearer")]
    #[test_case("BASIC", &[("MY_SVC_USERNAME", "u"), ("MY_SVC_PASSWORD", "p")] ; "basic")]
    #[test_case("iam", &[("MY_SVC_APIKEY", "k")] ; "iam")]
    fn test_from_vars_auth_types(auth_type: &str, extra: &[(&str, &str)]) {
        let mut all = vars(extra);
        all.push(("MY_SVC_AUTH_TYPE".to_string(), auth_type.to_string()));

        let config = ServiceConfig::from_vars("my-svc", all).unwrap();
        assert_eq!(config.service_name, "my-svc");
        assert_eq!(config.url, DEFAULT_SERVICE_URL);
        assert_eq!(
            config.auth.to_auth_config().kind(),
            auth_type.to_ascii_lowercase()
        );
    }

    #[test_case(&[], "IAM_ACCESS_GROUPS_APIKEY" ; "iam without key")]
    #[test_case(&[("IAM_ACCESS_GROUPS_APIKEY", "")], "IAM_ACCESS_GROUPS_APIKEY" ; "iam with empty key")]
    #[test_case(&[("IAM_ACCESS_GROUPS_AUTH_TYPE", "basic"), ("IAM_ACCESS_GROUPS_USERNAME", "u")], "IAM_ACCESS_GROUPS_PASSWORD" ; "basic without password")]
    #[test_case(&[("IAM_ACCESS_GROUPS_AUTH_TYPE", "bearertoken")], "IAM_ACCESS_GROUPS_BEARER_TOKEN" ; "bearer without token")]
    fn test_from_vars_missing_credentials(pairs: &[(&str, &str)], expected: &str) {
        let err = ServiceConfig::from_vars(DEFAULT_SERVICE_NAME, vars(pairs)).unwrap_err();
        match err {
            Error::MissingConfigField { field } => assert_eq!(field, expected),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test_case("IAM_ACCESS_GROUPS_AUTH_TYPE", "kerberos" ; "unknown auth type")]
    #[test_case("IAM_ACCESS_GROUPS_MAX_RETRIES", "lots" ; "bad retries")]
    #[test_case("IAM_ACCESS_GROUPS_TIMEOUT", "-1" ; "bad timeout")]
    fn test_from_vars_invalid_values(key: &str, value: &str) {
        let pairs = vars(&[("IAM_ACCESS_GROUPS_APIKEY", "k"), (key, value)]);
        let err = ServiceConfig::from_vars(DEFAULT_SERVICE_NAME, pairs).unwrap_err();
        match err {
            Error::InvalidConfigValue { field, .. } => assert_eq!(field, key),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_http_client_config_from_settings() {
        let config = ServiceConfig::new("http://localhost:9000/v2", AuthSettings::None);
        let http = config.http_client_config();
        assert_eq!(http.base_url.as_deref(), Some("http://localhost:9000/v2"));
        assert_eq!(http.timeout, Duration::from_secs(60));
        assert_eq!(http.initial_backoff, Duration::from_millis(250));
        assert!(http.rate_limit.is_none());
        assert!(config.build_http_client().is_ok());
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(env_prefix("iam_access_groups"), "IAM_ACCESS_GROUPS");
        assert_eq!(env_prefix("my-svc"), "MY_SVC");
    }
}
