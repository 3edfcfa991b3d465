//! Audit trail for resource group lifecycle transitions.
//!
//! Events go through `tracing` with the `audit` target so the embedding
//! application decides where they end up. Only confirmed transitions are
//! audited; failed calls are reported to the caller instead.

use crate::config::ReconcilerConfig;

/// Audit logger for one component.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    component: String,
    enabled: bool,
}

impl AuditLogger {
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            enabled: true,
        }
    }

    /// Logger that drops every event (for testing).
    pub fn new_noop() -> Self {
        Self {
            component: String::new(),
            enabled: false,
        }
    }

    pub fn from_config(config: &ReconcilerConfig) -> Self {
        if config.audit_enabled {
            Self::new(&config.audit_component)
        } else {
            Self::new_noop()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    fn log(&self, resource_guid: &str, message: String) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            target: "audit",
            component = %self.component,
            resource_guid = %resource_guid,
            "{}",
            message
        );
    }

    pub fn group_created(&self, resource_guid: &str, name: &str) {
        self.log(
            resource_guid,
            format!("Resource group created: {} ({})", name, resource_guid),
        );
    }

    pub fn group_updated(&self, resource_guid: &str, name: &str) {
        self.log(
            resource_guid,
            format!("Resource group updated: {} ({})", name, resource_guid),
        );
    }

    pub fn group_deleted(&self, resource_guid: &str) {
        self.log(
            resource_guid,
            format!("Resource group deleted: {}", resource_guid),
        );
    }

    pub fn group_imported(&self, resource_guid: &str, name: &str) {
        self.log(
            resource_guid,
            format!("Resource group imported: {} ({})", name, resource_guid),
        );
    }
}
