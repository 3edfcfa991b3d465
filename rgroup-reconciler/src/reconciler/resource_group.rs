//! Resource group reconciler - drives one LW_ACCOUNT resource group through
//! its lifecycle against a [`ResourceGroupClient`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::Lifecycle;
use super::import::{ImportResolver, fetch_state};
use crate::audit::AuditLogger;
use crate::clients::ResourceGroupClient;
use crate::config::ReconcilerConfig;
use crate::error::{Operation, Phase, ReconcileError, Result};
use crate::mapper;
use crate::model::{ResourceGroupConfig, ResourceGroupState};
use crate::wire::{LW_ACCOUNT_GROUP_TYPE, ResourceGroupRecord};

enum Entity {
    Absent,
    Present(ResourceGroupState),
    Deleted(String),
}

/// Reconciler for a single resource group.
///
/// The client may be shared with other reconcilers; the local state is owned
/// here and only replaced after the backend confirmed an operation.
pub struct ResourceGroupReconciler {
    client: Arc<dyn ResourceGroupClient>,
    config: ReconcilerConfig,
    audit: AuditLogger,
    entity: Entity,
}

impl ResourceGroupReconciler {
    /// Reconciler for a group that does not exist yet.
    pub fn new(client: Arc<dyn ResourceGroupClient>) -> Self {
        Self::with_config(client, ReconcilerConfig::default())
    }

    pub fn with_config(client: Arc<dyn ResourceGroupClient>, config: ReconcilerConfig) -> Self {
        let audit = AuditLogger::from_config(&config);
        Self {
            client,
            config,
            audit,
            entity: Entity::Absent,
        }
    }

    /// Resume tracking a group from previously persisted state.
    pub fn with_state(mut self, state: ResourceGroupState) -> Self {
        self.entity = Entity::Present(state);
        self
    }

    pub fn phase(&self) -> Phase {
        match self.entity {
            Entity::Absent => Phase::Absent,
            Entity::Present(_) => Phase::Present,
            Entity::Deleted(_) => Phase::Deleted,
        }
    }

    /// Last confirmed state, if the group is present.
    pub fn state(&self) -> Option<&ResourceGroupState> {
        match &self.entity {
            Entity::Present(state) => Some(state),
            _ => None,
        }
    }

    /// Identity of the tracked group, also after deletion.
    pub fn resource_guid(&self) -> Option<&str> {
        match &self.entity {
            Entity::Absent => None,
            Entity::Present(state) => Some(&state.resource_guid),
            Entity::Deleted(resource_guid) => Some(resource_guid),
        }
    }

    pub fn into_state(self) -> Option<ResourceGroupState> {
        match self.entity {
            Entity::Present(state) => Some(state),
            _ => None,
        }
    }

    fn ensure_absent(&self, operation: Operation) -> Result<()> {
        match self.phase() {
            Phase::Absent => Ok(()),
            phase => Err(ReconcileError::InvalidPhase { operation, phase }),
        }
    }

    /// State of the tracked group, provided `resource_guid` identifies it.
    fn tracked(&self, operation: Operation, resource_guid: &str) -> Result<&ResourceGroupState> {
        let tracked = match &self.entity {
            Entity::Absent => {
                return Err(ReconcileError::InvalidPhase {
                    operation,
                    phase: Phase::Absent,
                });
            }
            Entity::Deleted(tracked) if tracked == resource_guid => {
                return Err(ReconcileError::Deleted {
                    operation,
                    resource_guid: tracked.clone(),
                });
            }
            Entity::Deleted(tracked) => tracked,
            Entity::Present(state) if state.resource_guid == resource_guid => return Ok(state),
            Entity::Present(state) => &state.resource_guid,
        };
        Err(ReconcileError::IdentityMismatch {
            operation,
            requested: resource_guid.to_string(),
            tracked: tracked.clone(),
        })
    }

    fn log_outgoing(&self, verb: &str, data: &ResourceGroupRecord) {
        if self.config.log_payloads {
            info!(
                payload = ?data,
                "{} {} resource group",
                verb, LW_ACCOUNT_GROUP_TYPE
            );
        } else {
            info!(
                name = %data.name,
                "{} {} resource group",
                verb, LW_ACCOUNT_GROUP_TYPE
            );
        }
    }
}

#[async_trait]
impl Lifecycle for ResourceGroupReconciler {
    type Config = ResourceGroupConfig;
    type State = ResourceGroupState;

    async fn create(&mut self, config: &ResourceGroupConfig) -> Result<ResourceGroupState> {
        self.ensure_absent(Operation::Create)?;

        let data = mapper::encode(config);
        self.log_outgoing("Creating", &data);
        let response = self
            .client
            .create(&data)
            .await
            .map_err(|e| ReconcileError::api(Operation::Create, e))?;

        let state = mapper::decode(&response);
        if state.resource_guid.is_empty() {
            return Err(ReconcileError::MissingIdentity {
                operation: Operation::Create,
            });
        }

        info!(
            "Created {} resource group with guid {}",
            LW_ACCOUNT_GROUP_TYPE, state.resource_guid
        );
        self.audit.group_created(&state.resource_guid, &state.name);
        self.entity = Entity::Present(state.clone());
        Ok(state)
    }

    async fn read(&mut self, resource_guid: &str) -> Result<ResourceGroupState> {
        self.tracked(Operation::Read, resource_guid)?;

        info!(
            "Reading {} resource group with guid {}",
            LW_ACCOUNT_GROUP_TYPE, resource_guid
        );
        let state = fetch_state(self.client.as_ref(), Operation::Read, resource_guid).await?;

        info!(
            "Read {} resource group with guid {}",
            LW_ACCOUNT_GROUP_TYPE, resource_guid
        );
        self.entity = Entity::Present(state.clone());
        Ok(state)
    }

    async fn update(
        &mut self,
        resource_guid: &str,
        config: &ResourceGroupConfig,
    ) -> Result<ResourceGroupState> {
        let mut state = self.tracked(Operation::Update, resource_guid)?.clone();

        let mut data = mapper::encode(config);
        data.resource_guid = Some(resource_guid.to_string());
        self.log_outgoing("Updating", &data);
        let response = self
            .client
            .update(resource_guid, &data)
            .await
            .map_err(|e| ReconcileError::api(Operation::Update, e))?;

        if let Some(echoed) = response.resource_guid.as_deref() {
            if echoed != resource_guid {
                warn!(
                    requested = %resource_guid,
                    %echoed,
                    "Backend echoed a different resource guid on update, keeping the requested one"
                );
            }
        }

        // Description and accounts are not read back; keep what was sent.
        state.description = data.props.description;
        state.accounts = data.props.accounts;
        mapper::apply_update_refresh(&mut state, &response);

        info!(
            "Updated {} resource group with guid {}",
            LW_ACCOUNT_GROUP_TYPE, resource_guid
        );
        self.audit.group_updated(resource_guid, &state.name);
        self.entity = Entity::Present(state.clone());
        Ok(state)
    }

    async fn delete(&mut self, resource_guid: &str) -> Result<()> {
        self.tracked(Operation::Delete, resource_guid)?;

        info!(
            "Deleting {} resource group with guid {}",
            LW_ACCOUNT_GROUP_TYPE, resource_guid
        );
        self.client
            .delete(resource_guid)
            .await
            .map_err(|e| ReconcileError::api(Operation::Delete, e))?;

        info!(
            "Deleted {} resource group with guid {}",
            LW_ACCOUNT_GROUP_TYPE, resource_guid
        );
        self.audit.group_deleted(resource_guid);
        self.entity = Entity::Deleted(resource_guid.to_string());
        Ok(())
    }

    async fn import(&mut self, resource_guid: &str) -> Result<ResourceGroupState> {
        self.ensure_absent(Operation::Import)?;

        let state = ImportResolver::new(self.client.as_ref())
            .resolve(resource_guid)
            .await?;

        self.audit.group_imported(&state.resource_guid, &state.name);
        self.entity = Entity::Present(state.clone());
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ClientError, ClientOp, InMemoryClient};
    use crate::error::ErrorKind;

    fn reconciler() -> (Arc<InMemoryClient>, ResourceGroupReconciler) {
        let client = Arc::new(InMemoryClient::new());
        let reconciler = ResourceGroupReconciler::new(client.clone());
        (client, reconciler)
    }

    fn group_a() -> ResourceGroupConfig {
        ResourceGroupConfig::new("Group A", vec!["acct1".into()])
    }

    #[tokio::test]
    async fn test_phase_transitions() {
        let (_client, mut rg) = reconciler();
        assert_eq!(rg.phase(), Phase::Absent);
        assert!(rg.resource_guid().is_none());

        let created = rg.create(&group_a()).await.unwrap();
        assert_eq!(rg.phase(), Phase::Present);
        assert_eq!(rg.resource_guid(), Some(created.resource_guid.as_str()));

        rg.delete(&created.resource_guid).await.unwrap();
        assert_eq!(rg.phase(), Phase::Deleted);
        assert!(rg.state().is_none());
        assert_eq!(rg.resource_guid(), Some(created.resource_guid.as_str()));
    }

    #[tokio::test]
    async fn test_create_twice_is_refused_without_remote_call() {
        let (client, mut rg) = reconciler();
        rg.create(&group_a()).await.unwrap();

        let err = rg.create(&group_a()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lifecycle);
        assert_eq!(client.len().await, 1);
        assert_eq!(client.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_operations_require_tracked_identity() {
        let (client, mut rg) = reconciler();

        let err = rg.read("G1").await.unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::InvalidPhase {
                operation: Operation::Read,
                phase: Phase::Absent
            }
        ));

        let created = rg.create(&group_a()).await.unwrap();
        let err = rg.update("other", &group_a()).await.unwrap_err();
        match err {
            ReconcileError::IdentityMismatch {
                requested, tracked, ..
            } => {
                assert_eq!(requested, "other");
                assert_eq!(tracked, created.resource_guid);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Only the create reached the client.
        assert_eq!(client.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_identity_in_create_response() {
        struct Anonymous;

        #[async_trait]
        impl ResourceGroupClient for Anonymous {
            async fn create(
                &self,
                record: &ResourceGroupRecord,
            ) -> std::result::Result<ResourceGroupRecord, ClientError> {
                Ok(record.clone())
            }
            async fn get(
                &self,
                resource_guid: &str,
            ) -> std::result::Result<ResourceGroupRecord, ClientError> {
                Err(ClientError::NotFound(resource_guid.to_string()))
            }
            async fn update(
                &self,
                resource_guid: &str,
                _record: &ResourceGroupRecord,
            ) -> std::result::Result<ResourceGroupRecord, ClientError> {
                Err(ClientError::NotFound(resource_guid.to_string()))
            }
            async fn delete(&self, resource_guid: &str) -> std::result::Result<(), ClientError> {
                Err(ClientError::NotFound(resource_guid.to_string()))
            }
        }

        let mut rg = ResourceGroupReconciler::new(Arc::new(Anonymous));
        let err = rg.create(&group_a()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Contract);
        assert_eq!(rg.phase(), Phase::Absent);
    }

    /// Backend that answers get and update with a fixed identity echo.
    struct Echo(Option<&'static str>);

    impl Echo {
        fn response(&self) -> ResourceGroupRecord {
            let mut record = mapper::encode(&group_a());
            record.resource_guid = self.0.map(str::to_string);
            record
        }
    }

    #[async_trait]
    impl ResourceGroupClient for Echo {
        async fn create(
            &self,
            _record: &ResourceGroupRecord,
        ) -> std::result::Result<ResourceGroupRecord, ClientError> {
            Ok(self.response())
        }
        async fn get(
            &self,
            _resource_guid: &str,
        ) -> std::result::Result<ResourceGroupRecord, ClientError> {
            Ok(self.response())
        }
        async fn update(
            &self,
            _resource_guid: &str,
            _record: &ResourceGroupRecord,
        ) -> std::result::Result<ResourceGroupRecord, ClientError> {
            Ok(self.response())
        }
        async fn delete(&self, _resource_guid: &str) -> std::result::Result<(), ClientError> {
            Ok(())
        }
    }

    fn tracked_g1() -> ResourceGroupState {
        let mut record = mapper::encode(&group_a());
        record.resource_guid = Some("G1".to_string());
        mapper::decode(&record)
    }

    #[tokio::test]
    async fn test_import_without_identity_in_response() {
        let mut rg = ResourceGroupReconciler::new(Arc::new(Echo(None)));

        let err = rg.import("G1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Contract);
        assert_eq!(err.operation(), Operation::Import);
        assert_eq!(rg.phase(), Phase::Absent);
        assert!(rg.resource_guid().is_none());
    }

    #[tokio::test]
    async fn test_read_without_identity_in_response_keeps_tracked_guid() {
        let mut rg =
            ResourceGroupReconciler::new(Arc::new(Echo(None))).with_state(tracked_g1());

        let state = rg.read("G1").await.unwrap();
        assert_eq!(state.resource_guid, "G1");
        assert_eq!(rg.resource_guid(), Some("G1"));
    }

    #[tokio::test]
    async fn test_foreign_echo_does_not_change_identity() {
        let mut rg =
            ResourceGroupReconciler::new(Arc::new(Echo(Some("OTHER")))).with_state(tracked_g1());

        let read = rg.read("G1").await.unwrap();
        assert_eq!(read.resource_guid, "G1");
        assert_eq!(rg.resource_guid(), Some("G1"));

        let updated = rg
            .update("G1", &group_a().with_description("x"))
            .await
            .unwrap();
        assert_eq!(updated.resource_guid, "G1");
        assert_eq!(rg.resource_guid(), Some("G1"));
        assert_eq!(rg.state().map(|s| s.resource_guid.as_str()), Some("G1"));

        // Still addressable under the requested guid.
        rg.delete("G1").await.unwrap();
        assert_eq!(rg.phase(), Phase::Deleted);
    }

    #[tokio::test]
    async fn test_update_carries_identity_in_payload() {
        let (client, mut rg) = reconciler();
        let created = rg.create(&group_a()).await.unwrap();

        rg.update(&created.resource_guid, &group_a().with_description("x"))
            .await
            .unwrap();

        let calls = client.calls().await;
        let update = calls
            .iter()
            .find(|c| c.op == ClientOp::Update)
            .expect("update call");
        assert_eq!(
            update.resource_guid.as_deref(),
            Some(created.resource_guid.as_str())
        );
        let payload = update.record.as_ref().expect("update payload");
        assert_eq!(
            payload.resource_guid.as_deref(),
            Some(created.resource_guid.as_str())
        );
    }

    #[tokio::test]
    async fn test_resumed_reconciler_reads_persisted_identity() {
        let (client, mut rg) = reconciler();
        let created = rg.create(&group_a()).await.unwrap();
        let persisted = rg.into_state().unwrap();

        let mut resumed = ResourceGroupReconciler::new(client.clone()).with_state(persisted);
        let read = resumed.read(&created.resource_guid).await.unwrap();
        assert_eq!(read, created);
    }
}
