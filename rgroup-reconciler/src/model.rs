//! Local records: the declared configuration and the reconciled state.

use serde::{Deserialize, Serialize};

/// Value of `enabled` when the configuration does not set it.
pub const DEFAULT_ENABLED: bool = true;

fn default_enabled() -> bool {
    DEFAULT_ENABLED
}

/// Desired state of a resource group, authored by the configuration engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupConfig {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub accounts: Vec<String>,
}

impl ResourceGroupConfig {
    /// Create an enabled configuration without a description.
    pub fn new(name: impl Into<String>, accounts: Vec<String>) -> Self {
        Self {
            name: name.into(),
            enabled: DEFAULT_ENABLED,
            description: None,
            accounts,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Reconciled state of one resource group.
///
/// Mirrors [`ResourceGroupConfig`] plus every backend-assigned field. The
/// read-only fields are only ever filled from backend responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupState {
    /// Identity of the entity; set once on create or import.
    pub resource_guid: String,
    pub name: String,
    pub enabled: bool,
    pub description: Option<String>,
    pub accounts: Vec<String>,

    // Read-only, backend assigned
    pub guid: Option<String>,
    pub group_type: String,
    pub is_default: bool,
    pub last_updated: Option<String>,
    pub updated_by: Option<String>,
}

impl ResourceGroupState {
    /// Project the writable fields back into a configuration.
    pub fn to_config(&self) -> ResourceGroupConfig {
        ResourceGroupConfig {
            name: self.name.clone(),
            enabled: self.enabled,
            description: self.description.clone(),
            accounts: self.accounts.clone(),
        }
    }
}
