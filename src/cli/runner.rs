//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::pagination::{PageFetcher, Pager};
use crate::service::{
    GetAccessGroupOptions, GetAccountSettingsOptions, IamAccessGroups,
    ListAccessGroupMembersOptions, ListAccessGroupRulesOptions, ListAccessGroupsOptions,
};
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<()> {
        let service = self.build_service()?;

        match &self.cli.command {
            Commands::Groups {
                account_id,
                limit,
                iam_id,
            } => {
                let mut options = ListAccessGroupsOptions::new(account_id);
                options.limit = *limit;
                options.iam_id.clone_from(iam_id);
                let pager = service.list_access_groups_pager(options)?;
                self.drain(pager, out).await
            }
            Commands::Members {
                group_id,
                limit,
                member_type,
                verbose_members,
            } => {
                let mut options = ListAccessGroupMembersOptions::new(group_id);
                options.limit = *limit;
                options.member_type = *member_type;
                if *verbose_members {
                    options.verbose = Some(true);
                }
                let pager = service.list_access_group_members_pager(options)?;
                self.drain(pager, out).await
            }
            Commands::Group { group_id } => {
                let response = service
                    .get_access_group(&GetAccessGroupOptions::new(group_id))
                    .await?;
                self.emit(out, &response.result)
            }
            Commands::Rules { group_id } => {
                let response = service
                    .list_access_group_rules(&ListAccessGroupRulesOptions::new(group_id))
                    .await?;
                for rule in &response.result.rules {
                    self.emit(out, rule)?;
                }
                Ok(())
            }
            Commands::Settings { account_id } => {
                let response = service
                    .get_account_settings(&GetAccountSettingsOptions::new(account_id))
                    .await?;
                self.emit(out, &response.result)
            }
        }
    }

    /// Load configuration from `--config` or the environment
    fn load_config(&self) -> Result<ServiceConfig> {
        let config = match &self.cli.config {
            Some(path) => ServiceConfig::from_yaml_file(path)?,
            None => ServiceConfig::from_env(&self.cli.service_name)?,
        };

        match &self.cli.url {
            Some(url) => {
                let config = config.with_url(url);
                config.validate()?;
                Ok(config)
            }
            None => Ok(config),
        }
    }

    fn build_service(&self) -> Result<IamAccessGroups> {
        let config = self.load_config()?;
        if self.cli.verbose {
            info!(url = %config.url, auth = config.auth.to_auth_config().kind(), "Using service");
        }
        IamAccessGroups::new(&config)
    }

    /// Emit every item of every page, one page at a time
    async fn drain<F, W>(&self, mut pager: Pager<F>, out: &mut W) -> Result<()>
    where
        F: PageFetcher,
        F::Item: Serialize,
        W: Write,
    {
        let mut emitted = 0usize;
        while pager.has_next() {
            for item in pager.get_next().await? {
                self.emit(out, &item)?;
                emitted += 1;
            }
        }

        if self.cli.verbose {
            info!(
                items = emitted,
                pages = pager.pages_fetched(),
                total_count = ?pager.total_count(),
                "Listing complete"
            );
        }
        Ok(())
    }

    /// Output one document
    fn emit<W: Write, T: Serialize>(&self, out: &mut W, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        writeln!(out, "{line}").map_err(Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use std::io::Write as _;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "auth:\n  type: noauth\nhttp:\n  max_retries: 0").unwrap();
        file
    }

    async fn run(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        Runner::new(cli).run_with_output(&mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_members_command() {
        let cli = Cli::try_parse_from([
            "iam-access-groups",
            "members",
            "--group-id",
            "g1",
            "--type",
            "service",
            "--verbose-members",
        ])
        .unwrap();

        assert_eq!(cli.service_name, "iam_access_groups");
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Members {
                group_id,
                member_type,
                verbose_members,
                ..
            } => {
                assert_eq!(group_id, "g1");
                assert_eq!(member_type, Some(crate::types::MemberType::Service));
                assert!(verbose_members);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_groups_requires_account() {
        assert!(Cli::try_parse_from(["iam-access-groups", "groups"]).is_err());
    }

    #[tokio::test]
    async fn test_groups_command_drains_pager() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/groups"))
            .and(query_param("offset", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "groups": [{"id": "g2", "name": "Operators"}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/groups"))
            .and(query_param("account_id", "acct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "next": {"href": "/groups?account_id=acct&limit=1&offset=1"},
                "groups": [{"id": "g1", "name": "Admins"}]
            })))
            .mount(&mock_server)
            .await;

        let file = config_file();
        let uri = mock_server.uri();
        let output = run(&[
            "iam-access-groups",
            "--config",
            file.path().to_str().unwrap(),
            "--url",
            &uri,
            "groups",
            "--account-id",
            "acct",
            "--limit",
            "1",
        ])
        .await
        .unwrap();

        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                json!({"id": "g1", "name": "Admins"}),
                json!({"id": "g2", "name": "Operators"}),
            ]
        );
    }

    #[tokio::test]
    async fn test_settings_command() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/groups/settings"))
            .and(query_param("account_id", "acct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account_id": "acct",
                "public_access_enabled": true
            })))
            .mount(&mock_server)
            .await;

        let file = config_file();
        let uri = mock_server.uri();
        let output = run(&[
            "iam-access-groups",
            "-c",
            file.path().to_str().unwrap(),
            "--url",
            &uri,
            "settings",
            "--account-id",
            "acct",
        ])
        .await
        .unwrap();

        assert_eq!(
            output.trim(),
            r#"{"account_id":"acct","public_access_enabled":true}"#
        );
    }

    #[tokio::test]
    async fn test_group_command_surfaces_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/groups/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&mock_server)
            .await;

        let file = config_file();
        let uri = mock_server.uri();
        let err = run(&[
            "iam-access-groups",
            "-c",
            file.path().to_str().unwrap(),
            "--url",
            &uri,
            "group",
            "--group-id",
            "missing",
        ])
        .await
        .unwrap_err();

        assert_eq!(err.status(), Some(404));
    }
}
