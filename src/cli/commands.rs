//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_SERVICE_NAME;
use crate::types::MemberType;

/// IAM Access Groups command line client
#[derive(Parser, Debug)]
#[command(name = "iam-access-groups")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service configuration file (YAML); defaults to environment variables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service name, the prefix of `<NAME>_*` environment variables
    #[arg(long, global = true, default_value = DEFAULT_SERVICE_NAME)]
    pub service_name: String,

    /// Override the service URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every access group in an account
    Groups {
        /// Account to list
        #[arg(long)]
        account_id: String,

        /// Page size
        #[arg(long)]
        limit: Option<i64>,

        /// Only groups this identity belongs to
        #[arg(long)]
        iam_id: Option<String>,
    },

    /// List every member of an access group
    Members {
        /// Access group to list
        #[arg(long)]
        group_id: String,

        /// Page size
        #[arg(long)]
        limit: Option<i64>,

        /// Only members of this kind
        #[arg(long = "type", value_enum)]
        member_type: Option<MemberType>,

        /// Include member names and emails
        #[arg(long)]
        verbose_members: bool,
    },

    /// Show one access group
    Group {
        /// Access group id
        #[arg(long)]
        group_id: String,
    },

    /// List the dynamic rules of an access group
    Rules {
        /// Access group id
        #[arg(long)]
        group_id: String,
    },

    /// Show the access group settings of an account
    Settings {
        /// Account id
        #[arg(long)]
        account_id: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}
