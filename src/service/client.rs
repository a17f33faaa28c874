//! IAM Access Groups service client
//!
//! One async method per REST operation. Each validates its options before
//! any I/O, builds the URL from percent-encoded path segments, and decodes
//! the response into an [`ApiResponse`].

use super::options::*;
use super::pagers::{AccessGroupMembersFetcher, AccessGroupsFetcher};
use crate::config::{ServiceConfig, DEFAULT_SERVICE_NAME};
use crate::error::{Error, Result};
use crate::http::{ApiResponse, HttpClient, RequestConfig};
use crate::models::{
    AccountSettings, AddGroupMembersResponse, Group, GroupsList, GroupMembersList, MemberToAdd,
    MembershipAcrossGroupsResponse, RemoveGroupMembersResponse, Rule, RuleCondition, RulesList,
};
use crate::pagination::{PageOptions, Pager};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// Header carrying the SDK analytics tag
const ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

/// Service version reported in the analytics tag
const SERVICE_VERSION: &str = "V2";

/// Client for the IAM Access Groups API
///
/// Cheap to clone; clones share one HTTP client and token cache.
#[derive(Debug, Clone)]
pub struct IamAccessGroups {
    http: Arc<HttpClient>,
    service_url: String,
}

impl IamAccessGroups {
    /// Build a client from validated configuration
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let http = config.build_http_client()?;
        Self::with_client(http, &config.url)
    }

    /// Build a client from `IAM_ACCESS_GROUPS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Wrap an existing HTTP client
    pub fn with_client(http: HttpClient, service_url: &str) -> Result<Self> {
        let service = Self {
            http: Arc::new(http),
            service_url: service_url.to_string(),
        };
        service.endpoint(&[])?;
        Ok(service)
    }

    /// The base URL requests are sent to
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    // ========================================================================
    // Access Groups
    // ========================================================================

    /// Create an access group in an account
    pub async fn create_access_group(
        &self,
        options: &CreateAccessGroupOptions,
    ) -> Result<ApiResponse<Group>> {
        options.validate()?;
        let url = self.endpoint(&["groups"])?;
        let body = GroupBody {
            name: Some(&options.name),
            description: options.description.as_deref(),
        };
        let config = self
            .request_config("CreateAccessGroup", &options.common)
            .query("account_id", &options.account_id)
            .json(serde_json::to_value(body)?);
        self.http.send_json(Method::POST, &url, config).await
    }

    /// List one page of the access groups in an account
    pub async fn list_access_groups(
        &self,
        options: &ListAccessGroupsOptions,
    ) -> Result<ApiResponse<GroupsList>> {
        options.validate()?;
        let url = self.endpoint(&["groups"])?;
        let config = self
            .request_config("ListAccessGroups", &options.common)
            .query("account_id", &options.account_id)
            .query_opt("iam_id", options.iam_id.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("offset", options.offset)
            .query_opt("sort", options.sort.as_deref())
            .query_opt("show_federated", options.show_federated)
            .query_opt("hide_public_access", options.hide_public_access);
        self.http.send_json(Method::GET, &url, config).await
    }

    /// Pager over every access group matching `options`
    ///
    /// `options.offset` must be unset; the pager owns it.
    pub fn list_access_groups_pager(
        &self,
        options: ListAccessGroupsOptions,
    ) -> Result<Pager<AccessGroupsFetcher>> {
        Pager::new(AccessGroupsFetcher::new(self.clone()), options)
    }

    /// Get one access group; the response ETag feeds `update_access_group`
    pub async fn get_access_group(
        &self,
        options: &GetAccessGroupOptions,
    ) -> Result<ApiResponse<Group>> {
        options.validate()?;
        let url = self.endpoint(&["groups", &options.access_group_id])?;
        let config = self
            .request_config("GetAccessGroup", &options.common)
            .query_opt("show_federated", options.show_federated);
        self.http.send_json(Method::GET, &url, config).await
    }

    /// Update the name or description of an access group
    pub async fn update_access_group(
        &self,
        options: &UpdateAccessGroupOptions,
    ) -> Result<ApiResponse<Group>> {
        options.validate()?;
        let url = self.endpoint(&["groups", &options.access_group_id])?;
        let body = GroupBody {
            name: options.name.as_deref(),
            description: options.description.as_deref(),
        };
        let config = self
            .request_config("UpdateAccessGroup", &options.common)
            .header("If-Match", &options.if_match)
            .json(serde_json::to_value(body)?);
        self.http.send_json(Method::PATCH, &url, config).await
    }

    /// Delete an access group
    pub async fn delete_access_group(
        &self,
        options: &DeleteAccessGroupOptions,
    ) -> Result<ApiResponse<()>> {
        options.validate()?;
        let url = self.endpoint(&["groups", &options.access_group_id])?;
        let config = self
            .request_config("DeleteAccessGroup", &options.common)
            .query_opt("force", options.force);
        self.http.send_empty(Method::DELETE, &url, config).await
    }

    // ========================================================================
    // Account Settings
    // ========================================================================

    /// Get the access group settings of an account
    pub async fn get_account_settings(
        &self,
        options: &GetAccountSettingsOptions,
    ) -> Result<ApiResponse<AccountSettings>> {
        options.validate()?;
        let url = self.endpoint(&["groups", "settings"])?;
        let config = self
            .request_config("GetAccountSettings", &options.common)
            .query("account_id", &options.account_id);
        self.http.send_json(Method::GET, &url, config).await
    }

    /// Update the access group settings of an account
    pub async fn update_account_settings(
        &self,
        options: &UpdateAccountSettingsOptions,
    ) -> Result<ApiResponse<AccountSettings>> {
        options.validate()?;
        let url = self.endpoint(&["groups", "settings"])?;
        let body = SettingsBody {
            public_access_enabled: options.public_access_enabled,
        };
        let config = self
            .request_config("UpdateAccountSettings", &options.common)
            .query("account_id", &options.account_id)
            .json(serde_json::to_value(body)?);
        self.http.send_json(Method::PATCH, &url, config).await
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Whether an identity is a direct member of an access group
    ///
    /// A 404 from the service means "not a member" and yields `false`.
    pub async fn is_member_of_access_group(
        &self,
        options: &IsMemberOfAccessGroupOptions,
    ) -> Result<ApiResponse<bool>> {
        options.validate()?;
        let url = self.endpoint(&[
            "groups",
            &options.access_group_id,
            "members",
            &options.iam_id,
        ])?;
        let config = self.request_config("IsMemberOfAccessGroup", &options.common);
        match self.http.send_empty(Method::HEAD, &url, config).await {
            Ok(response) => Ok(response.map(|()| true)),
            Err(e) if e.status() == Some(404) => Ok(ApiResponse::new(false, 404, HeaderMap::new())),
            Err(e) => Err(e),
        }
    }

    /// Add identities to an access group
    pub async fn add_members_to_access_group(
        &self,
        options: &AddMembersToAccessGroupOptions,
    ) -> Result<ApiResponse<AddGroupMembersResponse>> {
        options.validate()?;
        let url = self.endpoint(&["groups", &options.access_group_id, "members"])?;
        let body = AddMembersBody {
            members: &options.members,
        };
        let config = self
            .request_config("AddMembersToAccessGroup", &options.common)
            .json(serde_json::to_value(body)?);
        self.http.send_json(Method::PUT, &url, config).await
    }

    /// List one page of the members of an access group
    pub async fn list_access_group_members(
        &self,
        options: &ListAccessGroupMembersOptions,
    ) -> Result<ApiResponse<GroupMembersList>> {
        options.validate()?;
        let url = self.endpoint(&["groups", &options.access_group_id, "members"])?;
        let config = self
            .request_config("ListAccessGroupMembers", &options.common)
            .query_opt("limit", options.limit)
            .query_opt("offset", options.offset)
            .query_opt("type", options.member_type.map(|t| t.as_str()))
            .query_opt("verbose", options.verbose)
            .query_opt("sort", options.sort.as_deref());
        self.http.send_json(Method::GET, &url, config).await
    }

    /// Pager over every member of an access group
    ///
    /// `options.offset` must be unset; the pager owns it.
    pub fn list_access_group_members_pager(
        &self,
        options: ListAccessGroupMembersOptions,
    ) -> Result<Pager<AccessGroupMembersFetcher>> {
        Pager::new(AccessGroupMembersFetcher::new(self.clone()), options)
    }

    /// Remove one identity from an access group
    pub async fn remove_member_from_access_group(
        &self,
        options: &RemoveMemberFromAccessGroupOptions,
    ) -> Result<ApiResponse<()>> {
        options.validate()?;
        let url = self.endpoint(&[
            "groups",
            &options.access_group_id,
            "members",
            &options.iam_id,
        ])?;
        let config = self.request_config("RemoveMemberFromAccessGroup", &options.common);
        self.http.send_empty(Method::DELETE, &url, config).await
    }

    /// Remove several identities from an access group
    pub async fn remove_members_from_access_group(
        &self,
        options: &RemoveMembersFromAccessGroupOptions,
    ) -> Result<ApiResponse<RemoveGroupMembersResponse>> {
        options.validate()?;
        let url = self.endpoint(&["groups", &options.access_group_id, "members", "delete"])?;
        let body = RemoveMembersBody {
            members: &options.members,
        };
        let config = self
            .request_config("RemoveMembersFromAccessGroup", &options.common)
            .json(serde_json::to_value(body)?);
        self.http.send_json(Method::POST, &url, config).await
    }

    /// Remove an identity from every access group in an account
    pub async fn remove_member_from_all_access_groups(
        &self,
        options: &RemoveMemberFromAllAccessGroupsOptions,
    ) -> Result<ApiResponse<MembershipAcrossGroupsResponse>> {
        options.validate()?;
        let url = self.endpoint(&["groups", "_allgroups", "members", &options.iam_id])?;
        let config = self
            .request_config("RemoveMemberFromAllAccessGroups", &options.common)
            .query("account_id", &options.account_id);
        self.http.send_json(Method::DELETE, &url, config).await
    }

    /// Add an identity to several access groups at once
    pub async fn add_member_to_multiple_access_groups(
        &self,
        options: &AddMemberToMultipleAccessGroupsOptions,
    ) -> Result<ApiResponse<MembershipAcrossGroupsResponse>> {
        options.validate()?;
        let url = self.endpoint(&["groups", "_allgroups", "members", &options.iam_id])?;
        let body = MultipleGroupsBody {
            member_type: options.member_type.map(|t| t.as_str()),
            groups: &options.groups,
        };
        let config = self
            .request_config("AddMemberToMultipleAccessGroups", &options.common)
            .query("account_id", &options.account_id)
            .json(serde_json::to_value(body)?);
        self.http.send_json(Method::PUT, &url, config).await
    }

    // ========================================================================
    // Rules
    // ========================================================================

    /// Create a dynamic membership rule
    pub async fn add_access_group_rule(
        &self,
        options: &AddAccessGroupRuleOptions,
    ) -> Result<ApiResponse<Rule>> {
        options.validate()?;
        let url = self.endpoint(&["groups", &options.access_group_id, "rules"])?;
        let body = RuleBody {
            expiration: options.expiration,
            realm_name: &options.realm_name,
            conditions: &options.conditions,
            name: options.name.as_deref(),
        };
        let config = self
            .request_config("AddAccessGroupRule", &options.common)
            .json(serde_json::to_value(body)?);
        self.http.send_json(Method::POST, &url, config).await
    }

    /// List the rules of an access group
    pub async fn list_access_group_rules(
        &self,
        options: &ListAccessGroupRulesOptions,
    ) -> Result<ApiResponse<RulesList>> {
        options.validate()?;
        let url = self.endpoint(&["groups", &options.access_group_id, "rules"])?;
        let config = self.request_config("ListAccessGroupRules", &options.common);
        self.http.send_json(Method::GET, &url, config).await
    }

    /// Get one rule; the response ETag feeds `replace_access_group_rule`
    pub async fn get_access_group_rule(
        &self,
        options: &GetAccessGroupRuleOptions,
    ) -> Result<ApiResponse<Rule>> {
        options.validate()?;
        let url = self.rule_endpoint(options)?;
        let config = self.request_config("GetAccessGroupRule", &options.common);
        self.http.send_json(Method::GET, &url, config).await
    }

    /// Replace a rule wholesale
    pub async fn replace_access_group_rule(
        &self,
        options: &ReplaceAccessGroupRuleOptions,
    ) -> Result<ApiResponse<Rule>> {
        options.validate()?;
        let url = self.endpoint(&[
            "groups",
            &options.access_group_id,
            "rules",
            &options.rule_id,
        ])?;
        let body = RuleBody {
            expiration: options.expiration,
            realm_name: &options.realm_name,
            conditions: &options.conditions,
            name: options.name.as_deref(),
        };
        let config = self
            .request_config("ReplaceAccessGroupRule", &options.common)
            .header("If-Match", &options.if_match)
            .json(serde_json::to_value(body)?);
        self.http.send_json(Method::PUT, &url, config).await
    }

    /// Delete a rule
    pub async fn remove_access_group_rule(
        &self,
        options: &RemoveAccessGroupRuleOptions,
    ) -> Result<ApiResponse<()>> {
        options.validate()?;
        let url = self.rule_endpoint(options)?;
        let config = self.request_config("RemoveAccessGroupRule", &options.common);
        self.http.send_empty(Method::DELETE, &url, config).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Service URL with `segments` appended, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.service_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                Error::invalid_value("url", format!("'{}' cannot be a base URL", self.service_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn rule_endpoint(&self, options: &AccessGroupRuleOptions) -> Result<String> {
        self.endpoint(&[
            "groups",
            &options.access_group_id,
            "rules",
            &options.rule_id,
        ])
    }

    /// Headers every operation sends; SDK headers win over caller headers
    fn request_config(&self, operation: &str, common: &CommonOptions) -> RequestConfig {
        RequestConfig::new()
            .headers(&common.headers)
            .header(ANALYTICS_HEADER, analytics_tag(operation))
            .header("Accept", "application/json")
            .header_opt("Transaction-Id", common.transaction_id.as_deref())
    }
}

/// Value of the analytics header for one operation
fn analytics_tag(operation: &str) -> String {
    format!("service_name={DEFAULT_SERVICE_NAME};service_version={SERVICE_VERSION};operation_id={operation}")
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Serialize)]
struct GroupBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct SettingsBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    public_access_enabled: Option<bool>,
}

#[derive(Serialize)]
struct AddMembersBody<'a> {
    members: &'a [MemberToAdd],
}

#[derive(Serialize)]
struct RemoveMembersBody<'a> {
    members: &'a [String],
}

#[derive(Serialize)]
struct MultipleGroupsBody<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    member_type: Option<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    groups: &'a [String],
}

#[derive(Serialize)]
struct RuleBody<'a> {
    expiration: i64,
    realm_name: &'a str,
    conditions: &'a [RuleCondition],
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}
