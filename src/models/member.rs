//! Membership models

use super::ApiErrorDetail;
use crate::pagination::{HrefLink, Page};
use crate::types::MemberType;
use serde::{Deserialize, Serialize};

/// A member as returned by `GET /groups/{id}/members`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupMember {
    /// IBMid, service id or profile id of the member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_id: Option<String>,
    /// `user`, `service` or `profile`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub member_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email, for users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Description, for service ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
}

/// One page of `GET /groups/{id}/members`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupMembersList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<HrefLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<HrefLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<HrefLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<HrefLink>,
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

impl GroupMembersList {
    /// Reduce to the fields the pager consumes
    pub fn into_page(self) -> Page<GroupMember> {
        Page {
            items: self.members,
            total_count: self.total_count,
            next: self.next,
        }
    }
}

/// A member to add with `PUT /groups/{id}/members`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberToAdd {
    pub iam_id: String,
    #[serde(rename = "type")]
    pub member_type: MemberType,
}

impl MemberToAdd {
    pub fn new(iam_id: impl Into<String>, member_type: MemberType) -> Self {
        Self {
            iam_id: iam_id.into(),
            member_type,
        }
    }
}

/// Per-member outcome of a bulk membership change
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub member_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    /// HTTP-style status of the operation on this member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
    /// Transaction id for debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

/// Result of `PUT /groups/{id}/members`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddGroupMembersResponse {
    #[serde(default)]
    pub members: Vec<MemberOutcome>,
}

/// Result of `POST /groups/{id}/members/delete`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoveGroupMembersResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_group_id: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberOutcome>,
}

/// Per-group outcome of a change to one member across several groups
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupMembershipOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

/// Result of adding a member to, or removing it from, several groups at once
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MembershipAcrossGroupsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_id: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupMembershipOutcome>,
}
