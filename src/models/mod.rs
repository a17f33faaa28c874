//! Response and request models
//!
//! Wire shapes of the IAM Access Groups API. Every response field is
//! optional because the service omits fields it has no value for.
//! Timestamps stay as strings: the service does not always attach a zone.

mod group;
mod member;
mod rule;
mod settings;

pub use group::{Group, GroupsList};
pub use member::{
    AddGroupMembersResponse, GroupMember, GroupMembersList, GroupMembershipOutcome,
    MemberOutcome, MemberToAdd, MembershipAcrossGroupsResponse, RemoveGroupMembersResponse,
};
pub use rule::{Rule, RuleCondition, RulesList};
pub use settings::AccountSettings;

use serde::{Deserialize, Serialize};

/// A single error entry in a per-item outcome
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Snake-case error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests;
