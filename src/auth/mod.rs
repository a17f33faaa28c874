//! Authentication module
//!
//! Supports: no auth, static bearer token, basic, IAM API key
//!
//! The `Authenticator` applies credentials to every request and caches the
//! IAM access token obtained from an API key.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, DEFAULT_IAM_TOKEN_URL};
