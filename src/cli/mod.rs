//! CLI module
//!
//! Command-line interface over the service client.
//!
//! # Commands
//!
//! - `groups` - List every access group in an account
//! - `members` - List every member of an access group
//! - `group` - Show one access group
//! - `rules` - List the dynamic rules of an access group
//! - `settings` - Show account settings

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
