// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # IAM Access Groups client
//!
//! Async Rust client for the IBM Cloud IAM Access Groups API: access
//! groups, their members, dynamic membership rules and account settings.
//!
//! ## Features
//!
//! - **Full REST surface**: one method per operation, typed options and models
//! - **Pagination**: offset-cursor `Pager` with `get_next`, `get_all` and a stream
//! - **Auth**: IAM API key with token caching, bearer, basic, or none
//! - **Resilient HTTP**: retries with backoff, `Retry-After`, optional rate limit
//! - **Configuration**: YAML files or `<SERVICE>_*` environment variables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use iam_access_groups::service::{IamAccessGroups, ListAccessGroupsOptions};
//!
//! #[tokio::main]
//! async fn main() -> iam_access_groups::Result<()> {
//!     // Reads IAM_ACCESS_GROUPS_APIKEY and friends
//!     let service = IamAccessGroups::from_env()?;
//!
//!     let pager = service.list_access_groups_pager(
//!         ListAccessGroupsOptions::new("my-account-id").limit(50),
//!     )?;
//!     for group in pager.get_all().await? {
//!         println!("{:?}", group.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  IamAccessGroups (service)                      │
//! │  groups · members · rules · settings · list pagers              │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────┬─────────────────────────┐
//! │    Auth      │        HTTP           │       Pagination        │
//! ├──────────────┼───────────────────────┼─────────────────────────┤
//! │ IAM API key  │ Retry / Backoff       │ Pager                   │
//! │ Bearer       │ Rate Limit            │ PageFetcher             │
//! │ Basic        │ ApiResponse + ETag    │ Offset cursor           │
//! └──────────────┴───────────────────────┴─────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Offset-cursor pagination
pub mod pagination;

/// Wire models
pub mod models;

/// Service configuration
pub mod config;

/// The IAM Access Groups service client
pub mod service;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use http::ApiResponse;
pub use pagination::{Page, PageFetcher, PageOptions, Pager};
pub use service::IamAccessGroups;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
