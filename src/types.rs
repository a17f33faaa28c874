//! Common types used throughout the client
//!
//! Shared enums and type aliases that don't belong to a single module.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Auth Type
// ============================================================================

/// Authentication scheme named in external configuration
///
/// Spelled the way the provider's `<SERVICE>_AUTH_TYPE` variable spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// IAM API key exchanged for a bearer token
    #[default]
    Iam,
    /// Static bearer token
    #[serde(rename = "bearertoken")]
    BearerToken,
    /// HTTP basic credentials
    Basic,
    /// No authentication
    #[serde(rename = "noauth")]
    NoAuth,
}

impl FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iam" => Ok(Self::Iam),
            "bearertoken" | "bearer" => Ok(Self::BearerToken),
            "basic" => Ok(Self::Basic),
            "noauth" | "none" => Ok(Self::NoAuth),
            other => Err(format!("unknown auth type '{other}'")),
        }
    }
}

// ============================================================================
// Member Type
// ============================================================================

/// Kind of identity that can be a member of an access group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    /// An IBMid user
    User,
    /// A service ID
    Service,
    /// A trusted profile
    Profile,
}

impl MemberType {
    /// Wire name used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Service => "service",
            Self::Profile => "profile",
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_type_from_str() {
        assert_eq!("IAM".parse::<AuthType>(), Ok(AuthType::Iam));
        assert_eq!("bearerToken".parse::<AuthType>(), Ok(AuthType::BearerToken));
        assert_eq!("noauth".parse::<AuthType>(), Ok(AuthType::NoAuth));
        assert!("kerberos".parse::<AuthType>().is_err());
    }

    #[test]
    fn test_auth_type_serde() {
        let t: AuthType = serde_json::from_str("\"bearertoken\"").unwrap();
        assert_eq!(t, AuthType::BearerToken);
        assert_eq!(serde_json::to_string(&AuthType::NoAuth).unwrap(), "\"noauth\"");
    }

    #[test]
    fn test_member_type_wire_name() {
        assert_eq!(MemberType::Service.as_str(), "service");
        let t: MemberType = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(t, MemberType::User);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
