//! Page fetchers for the paginated list operations

use super::client::IamAccessGroups;
use super::options::{ListAccessGroupMembersOptions, ListAccessGroupsOptions};
use crate::error::Result;
use crate::models::{Group, GroupMember};
use crate::pagination::{Page, PageFetcher};
use async_trait::async_trait;

/// Fetches pages of `GET /groups`
#[derive(Debug, Clone)]
pub struct AccessGroupsFetcher {
    service: IamAccessGroups,
}

impl AccessGroupsFetcher {
    pub fn new(service: IamAccessGroups) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PageFetcher for AccessGroupsFetcher {
    type Options = ListAccessGroupsOptions;
    type Item = Group;

    async fn fetch_page(&self, options: &ListAccessGroupsOptions) -> Result<Page<Group>> {
        let response = self.service.list_access_groups(options).await?;
        Ok(response.result.into_page())
    }
}

/// Fetches pages of `GET /groups/{id}/members`
#[derive(Debug, Clone)]
pub struct AccessGroupMembersFetcher {
    service: IamAccessGroups,
}

impl AccessGroupMembersFetcher {
    pub fn new(service: IamAccessGroups) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PageFetcher for AccessGroupMembersFetcher {
    type Options = ListAccessGroupMembersOptions;
    type Item = GroupMember;

    async fn fetch_page(
        &self,
        options: &ListAccessGroupMembersOptions,
    ) -> Result<Page<GroupMember>> {
        let response = self.service.list_access_group_members(options).await?;
        Ok(response.result.into_page())
    }
}
