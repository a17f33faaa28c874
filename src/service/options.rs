//! Per-operation request options
//!
//! Each operation takes one options value: required identifiers go through
//! `new`, everything else through chained setters. Every options type also
//! carries an optional transaction id and extra headers.

use crate::error::{Error, Result};
use crate::models::{MemberToAdd, RuleCondition};
use crate::pagination::PageOptions;
use crate::types::MemberType;
use std::collections::HashMap;

/// Settings shared by every operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonOptions {
    /// Correlation id, sent as `Transaction-Id`
    pub transaction_id: Option<String>,
    /// Extra request headers
    pub headers: HashMap<String, String>,
}

macro_rules! impl_common_setters {
    ($($options:ty),+ $(,)?) => {
        $(
            impl $options {
                /// Set the `Transaction-Id` header
                #[must_use]
                pub fn transaction_id(mut self, id: impl Into<String>) -> Self {
                    self.common.transaction_id = Some(id.into());
                    self
                }

                /// Add an extra request header
                #[must_use]
                pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
                    self.common.headers.insert(key.into(), value.into());
                    self
                }
            }
        )+
    };
}

/// Fails with `InvalidArgument` when a required string is empty
fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(format!("{field} must be set")));
    }
    Ok(())
}

fn require_positive(field: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if v <= 0 => Err(Error::invalid_argument(format!(
            "{field} must be positive, got {v}"
        ))),
        _ => Ok(()),
    }
}

// ============================================================================
// Access Groups
// ============================================================================

/// Options for `create_access_group`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccessGroupOptions {
    pub account_id: String,
    pub name: String,
    pub description: Option<String>,
    pub common: CommonOptions,
}

impl CreateAccessGroupOptions {
    pub fn new(account_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("account_id", &self.account_id)?;
        require("name", &self.name)
    }
}

/// Options for `list_access_groups`
///
/// Also the page request of the access groups pager, which owns `offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccessGroupsOptions {
    pub account_id: String,
    /// Only groups this identity belongs to
    pub iam_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    pub show_federated: Option<bool>,
    pub hide_public_access: Option<bool>,
    pub common: CommonOptions,
}

impl ListAccessGroupsOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn iam_id(mut self, iam_id: impl Into<String>) -> Self {
        self.iam_id = Some(iam_id.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn show_federated(mut self, show: bool) -> Self {
        self.show_federated = Some(show);
        self
    }

    #[must_use]
    pub fn hide_public_access(mut self, hide: bool) -> Self {
        self.hide_public_access = Some(hide);
        self
    }
}

impl PageOptions for ListAccessGroupsOptions {
    fn validate(&self) -> Result<()> {
        require("account_id", &self.account_id)?;
        require_positive("limit", self.limit)
    }

    fn offset(&self) -> Option<i64> {
        self.offset
    }

    fn set_offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }
}

/// Options for `get_access_group`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAccessGroupOptions {
    pub access_group_id: String,
    pub show_federated: Option<bool>,
    pub common: CommonOptions,
}

impl GetAccessGroupOptions {
    pub fn new(access_group_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn show_federated(mut self, show: bool) -> Self {
        self.show_federated = Some(show);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)
    }
}

/// Options for `update_access_group`
///
/// `if_match` is the ETag from an earlier read of the group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAccessGroupOptions {
    pub access_group_id: String,
    pub if_match: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub common: CommonOptions,
}

impl UpdateAccessGroupOptions {
    pub fn new(access_group_id: impl Into<String>, if_match: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            if_match: if_match.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)?;
        require("if_match", &self.if_match)
    }
}

/// Options for `delete_access_group`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteAccessGroupOptions {
    pub access_group_id: String,
    /// Delete even when the group still has members or rules
    pub force: Option<bool>,
    pub common: CommonOptions,
}

impl DeleteAccessGroupOptions {
    pub fn new(access_group_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)
    }
}

// ============================================================================
// Account Settings
// ============================================================================

/// Options for `get_account_settings`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAccountSettingsOptions {
    pub account_id: String,
    pub common: CommonOptions,
}

impl GetAccountSettingsOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("account_id", &self.account_id)
    }
}

/// Options for `update_account_settings`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAccountSettingsOptions {
    pub account_id: String,
    pub public_access_enabled: Option<bool>,
    pub common: CommonOptions,
}

impl UpdateAccountSettingsOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn public_access_enabled(mut self, enabled: bool) -> Self {
        self.public_access_enabled = Some(enabled);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("account_id", &self.account_id)
    }
}

// ============================================================================
// Membership
// ============================================================================

/// Options for `is_member_of_access_group`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsMemberOfAccessGroupOptions {
    pub access_group_id: String,
    pub iam_id: String,
    pub common: CommonOptions,
}

impl IsMemberOfAccessGroupOptions {
    pub fn new(access_group_id: impl Into<String>, iam_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            iam_id: iam_id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)?;
        require("iam_id", &self.iam_id)
    }
}

/// Options for `add_members_to_access_group`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddMembersToAccessGroupOptions {
    pub access_group_id: String,
    pub members: Vec<MemberToAdd>,
    pub common: CommonOptions,
}

impl AddMembersToAccessGroupOptions {
    pub fn new(access_group_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            ..Self::default()
        }
    }

    /// Add one identity to the request
    #[must_use]
    pub fn member(mut self, iam_id: impl Into<String>, member_type: MemberType) -> Self {
        self.members.push(MemberToAdd::new(iam_id, member_type));
        self
    }

    #[must_use]
    pub fn members(mut self, members: Vec<MemberToAdd>) -> Self {
        self.members = members;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)?;
        for member in &self.members {
            require("members[].iam_id", &member.iam_id)?;
        }
        Ok(())
    }
}

/// Options for `list_access_group_members`
///
/// Also the page request of the members pager, which owns `offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccessGroupMembersOptions {
    pub access_group_id: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Only members of this kind
    pub member_type: Option<MemberType>,
    /// Include name and email of each member
    pub verbose: Option<bool>,
    pub sort: Option<String>,
    pub common: CommonOptions,
}

impl ListAccessGroupMembersOptions {
    pub fn new(access_group_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn member_type(mut self, member_type: MemberType) -> Self {
        self.member_type = Some(member_type);
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

impl PageOptions for ListAccessGroupMembersOptions {
    fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)?;
        require_positive("limit", self.limit)
    }

    fn offset(&self) -> Option<i64> {
        self.offset
    }

    fn set_offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }
}

/// Options for `remove_member_from_access_group`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveMemberFromAccessGroupOptions {
    pub access_group_id: String,
    pub iam_id: String,
    pub common: CommonOptions,
}

impl RemoveMemberFromAccessGroupOptions {
    pub fn new(access_group_id: impl Into<String>, iam_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            iam_id: iam_id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)?;
        require("iam_id", &self.iam_id)
    }
}

/// Options for `remove_members_from_access_group`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveMembersFromAccessGroupOptions {
    pub access_group_id: String,
    pub members: Vec<String>,
    pub common: CommonOptions,
}

impl RemoveMembersFromAccessGroupOptions {
    pub fn new(access_group_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn member(mut self, iam_id: impl Into<String>) -> Self {
        self.members.push(iam_id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)
    }
}

/// Options for `remove_member_from_all_access_groups`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveMemberFromAllAccessGroupsOptions {
    pub account_id: String,
    pub iam_id: String,
    pub common: CommonOptions,
}

impl RemoveMemberFromAllAccessGroupsOptions {
    pub fn new(account_id: impl Into<String>, iam_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            iam_id: iam_id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("account_id", &self.account_id)?;
        require("iam_id", &self.iam_id)
    }
}

/// Options for `add_member_to_multiple_access_groups`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddMemberToMultipleAccessGroupsOptions {
    pub account_id: String,
    pub iam_id: String,
    pub member_type: Option<MemberType>,
    /// Target group ids
    pub groups: Vec<String>,
    pub common: CommonOptions,
}

impl AddMemberToMultipleAccessGroupsOptions {
    pub fn new(account_id: impl Into<String>, iam_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            iam_id: iam_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn member_type(mut self, member_type: MemberType) -> Self {
        self.member_type = Some(member_type);
        self
    }

    #[must_use]
    pub fn group(mut self, access_group_id: impl Into<String>) -> Self {
        self.groups.push(access_group_id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("account_id", &self.account_id)?;
        require("iam_id", &self.iam_id)
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Options for `add_access_group_rule`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddAccessGroupRuleOptions {
    pub access_group_id: String,
    /// Hours a matched identity stays a member
    pub expiration: i64,
    pub realm_name: String,
    pub conditions: Vec<RuleCondition>,
    pub name: Option<String>,
    pub common: CommonOptions,
}

impl AddAccessGroupRuleOptions {
    pub fn new(
        access_group_id: impl Into<String>,
        expiration: i64,
        realm_name: impl Into<String>,
        conditions: Vec<RuleCondition>,
    ) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            expiration,
            realm_name: realm_name.into(),
            conditions,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)?;
        validate_rule(self.expiration, &self.realm_name, &self.conditions)
    }
}

fn validate_rule(expiration: i64, realm_name: &str, conditions: &[RuleCondition]) -> Result<()> {
    require_positive("expiration", Some(expiration))?;
    require("realm_name", realm_name)?;
    if conditions.is_empty() {
        return Err(Error::invalid_argument("conditions must not be empty"));
    }
    Ok(())
}

/// Options for `list_access_group_rules`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccessGroupRulesOptions {
    pub access_group_id: String,
    pub common: CommonOptions,
}

impl ListAccessGroupRulesOptions {
    pub fn new(access_group_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)
    }
}

/// Options addressing one rule, used by get and remove
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessGroupRuleOptions {
    pub access_group_id: String,
    pub rule_id: String,
    pub common: CommonOptions,
}

impl AccessGroupRuleOptions {
    pub fn new(access_group_id: impl Into<String>, rule_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            rule_id: rule_id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)?;
        require("rule_id", &self.rule_id)
    }
}

/// Options for `get_access_group_rule`
pub type GetAccessGroupRuleOptions = AccessGroupRuleOptions;

/// Options for `remove_access_group_rule`
pub type RemoveAccessGroupRuleOptions = AccessGroupRuleOptions;

/// Options for `replace_access_group_rule`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceAccessGroupRuleOptions {
    pub access_group_id: String,
    pub rule_id: String,
    /// ETag from an earlier read of the rule
    pub if_match: String,
    pub expiration: i64,
    pub realm_name: String,
    pub conditions: Vec<RuleCondition>,
    pub name: Option<String>,
    pub common: CommonOptions,
}

impl ReplaceAccessGroupRuleOptions {
    pub fn new(
        access_group_id: impl Into<String>,
        rule_id: impl Into<String>,
        if_match: impl Into<String>,
        expiration: i64,
        realm_name: impl Into<String>,
        conditions: Vec<RuleCondition>,
    ) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            rule_id: rule_id.into(),
            if_match: if_match.into(),
            expiration,
            realm_name: realm_name.into(),
            conditions,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("access_group_id", &self.access_group_id)?;
        require("rule_id", &self.rule_id)?;
        require("if_match", &self.if_match)?;
        validate_rule(self.expiration, &self.realm_name, &self.conditions)
    }
}

impl_common_setters!(
    CreateAccessGroupOptions,
    ListAccessGroupsOptions,
    GetAccessGroupOptions,
    UpdateAccessGroupOptions,
    DeleteAccessGroupOptions,
    GetAccountSettingsOptions,
    UpdateAccountSettingsOptions,
    IsMemberOfAccessGroupOptions,
    AddMembersToAccessGroupOptions,
    ListAccessGroupMembersOptions,
    RemoveMemberFromAccessGroupOptions,
    RemoveMembersFromAccessGroupOptions,
    RemoveMemberFromAllAccessGroupsOptions,
    AddMemberToMultipleAccessGroupsOptions,
    AddAccessGroupRuleOptions,
    ListAccessGroupRulesOptions,
    AccessGroupRuleOptions,
    ReplaceAccessGroupRuleOptions,
);
