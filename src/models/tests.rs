//! Tests for wire models

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_groups_list_decodes_links_and_groups() {
    let body = json!({
        "limit": 1,
        "offset": 0,
        "total_count": 2,
        "first": {"href": "https://iam.cloud.ibm.com/v2/groups?account_id=acct&limit=1"},
        "next": {"href": "https://iam.cloud.ibm.com/v2/groups?account_id=acct&limit=1&offset=1"},
        "last": {"href": "https://iam.cloud.ibm.com/v2/groups?account_id=acct&limit=1&offset=1"},
        "groups": [{
            "id": "AccessGroupId-1",
            "name": "Admins",
            "account_id": "acct",
            "created_at": "2019-01-01T12:00:00",
            "is_federated": false
        }]
    });

    let list: GroupsList = serde_json::from_value(body).unwrap();
    assert_eq!(list.total_count, Some(2));
    assert!(list.previous.is_none());
    assert_eq!(list.groups.len(), 1);
    assert_eq!(list.groups[0].name.as_deref(), Some("Admins"));
    assert_eq!(list.groups[0].created_at.as_deref(), Some("2019-01-01T12:00:00"));

    let page = list.into_page();
    assert_eq!(page.total_count, Some(2));
    assert_eq!(
        page.next.and_then(|n| n.href).as_deref(),
        Some("https://iam.cloud.ibm.com/v2/groups?account_id=acct&limit=1&offset=1")
    );
}

#[test]
fn test_members_list_without_items_field() {
    let list: GroupMembersList = serde_json::from_value(json!({"total_count": 0})).unwrap();
    let page = list.into_page();
    assert!(page.items.is_empty());
    assert!(page.next.is_none());
}

#[test]
fn test_group_member_type_field() {
    let member: GroupMember = serde_json::from_value(json!({
        "iam_id": "iam-ServiceId-123",
        "type": "service",
        "description": "ci bot"
    }))
    .unwrap();
    assert_eq!(member.member_type.as_deref(), Some("service"));
}

#[test]
fn test_member_to_add_serializes_type() {
    let member = MemberToAdd::new("IBMid-123", crate::types::MemberType::User);
    assert_eq!(
        serde_json::to_value(&member).unwrap(),
        json!({"iam_id": "IBMid-123", "type": "user"})
    );
}

#[test]
fn test_add_members_response_with_errors() {
    let response: AddGroupMembersResponse = serde_json::from_value(json!({
        "members": [{
            "iam_id": "IBMid-123",
            "type": "user",
            "status_code": 400,
            "trace": "abc",
            "errors": [{"code": "invalid_member", "message": "not found"}]
        }]
    }))
    .unwrap();

    let outcome = &response.members[0];
    assert_eq!(outcome.status_code, Some(400));
    assert_eq!(
        outcome.errors,
        vec![ApiErrorDetail {
            code: Some("invalid_member".to_string()),
            message: Some("not found".to_string()),
        }]
    );
}

#[test]
fn test_rule_round_trips_conditions() {
    let rule: Rule = serde_json::from_value(json!({
        "id": "ClaimRule-1",
        "expiration": 12,
        "realm_name": "https://idp.example.org/SAML2",
        "conditions": [{"claim": "isManager", "operator": "EQUALS", "value": "true"}]
    }))
    .unwrap();

    assert_eq!(rule.expiration, Some(12));
    assert_eq!(
        rule.conditions,
        vec![RuleCondition::new("isManager", "EQUALS", "true")]
    );
    assert!(serde_json::to_value(&rule).unwrap().get("name").is_none());
}

#[test]
fn test_account_settings_decode() {
    let settings: AccountSettings = serde_json::from_value(json!({
        "account_id": "acct",
        "public_access_enabled": true
    }))
    .unwrap();
    assert_eq!(settings.public_access_enabled, Some(true));
    assert!(settings.last_modified_at.is_none());
}
