//! Wire shape exchanged with the remote resource group service.
//!
//! Field names follow the JSON representation of the reference deployment.
//! Response-only fields default when omitted, so partial echoes still decode.

use serde::{Deserialize, Serialize};

/// Resource group kind handled by this crate.
pub const LW_ACCOUNT_GROUP_TYPE: &str = "LW_ACCOUNT";

/// Remote resource group record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupRecord {
    /// Primary key, assigned by the backend on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_guid: Option<String>,

    /// Secondary backend identifier (account level).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    #[serde(rename = "resourceName")]
    pub name: String,

    #[serde(rename = "resourceType", default)]
    pub group_type: String,

    /// 1 when enabled, anything else when disabled.
    #[serde(default)]
    pub enabled: i32,

    #[serde(default)]
    pub is_default: bool,

    #[serde(default)]
    pub props: ResourceGroupProps,
}

/// Nested properties of a resource group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "lwAccounts", default)]
    pub accounts: Vec<String>,

    /// Server timestamp of the last change (epoch millis).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    /// Actor recorded by the server for the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}
