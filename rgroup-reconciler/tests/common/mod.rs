//! Shared test utilities for rgroup-reconciler integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use rgroup_reconciler::wire::{LW_ACCOUNT_GROUP_TYPE, ResourceGroupProps, ResourceGroupRecord};
use rgroup_reconciler::{
    InMemoryClient, ReconcilerConfig, ResourceGroupConfig, ResourceGroupReconciler,
};

/// Backend shared by every reconciler a test creates.
pub struct TestBackend {
    pub client: Arc<InMemoryClient>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            client: Arc::new(InMemoryClient::new().with_actor("tester@example.com")),
        }
    }

    /// Fresh reconciler with audit logging disabled.
    pub fn reconciler(&self) -> ResourceGroupReconciler {
        let config = ReconcilerConfig {
            audit_enabled: false,
            ..Default::default()
        };
        ResourceGroupReconciler::with_config(self.client.clone(), config)
    }

    /// Store a group directly in the backend, bypassing any reconciler.
    pub async fn seed(&self, name: &str, accounts: &[&str]) -> String {
        self.client
            .insert(ResourceGroupRecord {
                name: name.to_string(),
                group_type: LW_ACCOUNT_GROUP_TYPE.to_string(),
                enabled: 1,
                props: ResourceGroupProps {
                    description: Some(format!("{name} description")),
                    accounts: accounts.iter().map(|a| a.to_string()).collect(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await
    }
}

pub fn group(name: &str, accounts: &[&str]) -> ResourceGroupConfig {
    ResourceGroupConfig::new(name, accounts.iter().map(|a| a.to_string()).collect())
}
