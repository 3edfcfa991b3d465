//! Reconciler configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by the reconcilers an embedder creates.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Component name attached to audit events.
    pub audit_component: String,
    /// Emit audit events for confirmed lifecycle transitions.
    pub audit_enabled: bool,
    /// Include outgoing payloads in info logs.
    pub log_payloads: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            audit_component: "resource-group".to_string(),
            audit_enabled: true,
            log_payloads: true,
        }
    }
}
