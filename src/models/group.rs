//! Access group models

use crate::pagination::{HrefLink, Page};
use serde::{Deserialize, Serialize};

/// An IAM access group
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Group {
    /// Access group id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Group name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Group description, if defined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Account the group was created in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// `iam_id` of the creator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<String>,
    /// `iam_id` of the last editor of name or description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_id: Option<String>,
    /// URL of this group resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// True if dynamic rules exist for the group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_federated: Option<bool>,
}

/// One page of `GET /groups`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupsList {
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
    pub groups: Vec<Group>,
}

impl GroupsList {
    /// Reduce to the fields the pager consumes
    pub fn into_page(self) -> Page<Group> {
        Page {
            items: self.groups,
            total_count: self.total_count,
            next: self.next,
        }
    }
}
