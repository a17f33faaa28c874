//! IAM Access Groups service
//!
//! The [`IamAccessGroups`] client covers groups, membership, dynamic rules
//! and account settings. The two list endpoints that page also come with
//! pager constructors.
//!
//! ```rust,ignore
//! let service = IamAccessGroups::from_env()?;
//! let group = service
//!     .create_access_group(&CreateAccessGroupOptions::new(account_id, "Admins"))
//!     .await?
//!     .result;
//! ```

mod client;
mod options;
mod pagers;

pub use client::IamAccessGroups;
pub use options::{
    AccessGroupRuleOptions, AddAccessGroupRuleOptions, AddMemberToMultipleAccessGroupsOptions,
    AddMembersToAccessGroupOptions, CommonOptions, CreateAccessGroupOptions,
    DeleteAccessGroupOptions, GetAccessGroupOptions, GetAccessGroupRuleOptions,
    GetAccountSettingsOptions, IsMemberOfAccessGroupOptions, ListAccessGroupMembersOptions,
    ListAccessGroupRulesOptions, ListAccessGroupsOptions, RemoveAccessGroupRuleOptions,
    RemoveMemberFromAccessGroupOptions, RemoveMemberFromAllAccessGroupsOptions,
    RemoveMembersFromAccessGroupOptions, ReplaceAccessGroupRuleOptions,
    UpdateAccessGroupOptions, UpdateAccountSettingsOptions,
};
pub use pagers::{AccessGroupMembersFetcher, AccessGroupsFetcher};
