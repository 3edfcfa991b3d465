//! In-memory resource group backend.
//!
//! Behaves like the remote service for the parts the reconciler depends on:
//! it assigns identifiers, stamps change metadata and validates payloads.
//! Tests use the hooks to inject failures, simulate out-of-band changes and
//! inspect the calls that were made.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{ClientError, ResourceGroupClient};
use crate::wire::{LW_ACCOUNT_GROUP_TYPE, ResourceGroupRecord};

const DEFAULT_ACTOR: &str = "reconciler@localhost";

/// Client operation, used for failure injection and the call journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientOp {
    Create,
    Get,
    Update,
    Delete,
}

/// One call received by the in-memory client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCall {
    pub op: ClientOp,
    pub resource_guid: Option<String>,
    /// Payload for create and update.
    pub record: Option<ResourceGroupRecord>,
}

#[derive(Default)]
struct Inner {
    groups: HashMap<String, ResourceGroupRecord>,
    failures: HashMap<ClientOp, VecDeque<ClientError>>,
    omit_accounts_on_update: bool,
    calls: Vec<ClientCall>,
}

impl Inner {
    fn record_call(
        &mut self,
        op: ClientOp,
        resource_guid: Option<&str>,
        record: Option<&ResourceGroupRecord>,
    ) -> Result<(), ClientError> {
        self.calls.push(ClientCall {
            op,
            resource_guid: resource_guid.map(str::to_string),
            record: record.cloned(),
        });
        match self.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => {
                debug!(?op, error = %err, "Injected failure");
                Err(err)
            }
            None => Ok(()),
        }
    }
}

/// In-memory implementation of [`ResourceGroupClient`].
///
/// Every call is appended to a journal that is only emptied by
/// [`InMemoryClient::take_calls`]. Long-lived embedders should drain it.
pub struct InMemoryClient {
    inner: RwLock<Inner>,
    account_guid: String,
    actor: String,
}

impl Default for InMemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            account_guid: Uuid::new_v4().to_string(),
            actor: DEFAULT_ACTOR.to_string(),
        }
    }

    /// Set the actor recorded in `updatedBy`.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Account-level guid stamped on every group.
    pub fn account_guid(&self) -> &str {
        &self.account_guid
    }

    /// Store a group as if it had been created out of band.
    ///
    /// Assigns a resource guid when the record has none and returns it.
    pub async fn insert(&self, mut record: ResourceGroupRecord) -> String {
        let resource_guid = record
            .resource_guid
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        record.resource_guid = Some(resource_guid.clone());
        record.guid = Some(self.account_guid.clone());
        self.stamp(&mut record);

        let mut inner = self.inner.write().await;
        inner.groups.insert(resource_guid.clone(), record);
        resource_guid
    }

    /// Remove a group out of band. Returns whether it existed.
    pub async fn remove(&self, resource_guid: &str) -> bool {
        let mut inner = self.inner.write().await;
        inner.groups.remove(resource_guid).is_some()
    }

    /// Current backend copy of a group.
    pub async fn record(&self, resource_guid: &str) -> Option<ResourceGroupRecord> {
        let inner = self.inner.read().await;
        inner.groups.get(resource_guid).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.groups.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.groups.is_empty()
    }

    /// Fail the next call of `op` with `error`. Queued per operation.
    pub async fn fail_next(&self, op: ClientOp, error: ClientError) {
        let mut inner = self.inner.write().await;
        inner.failures.entry(op).or_default().push_back(error);
    }

    /// Leave `lwAccounts` out of update responses.
    pub async fn omit_accounts_on_update(&self, omit: bool) {
        self.inner.write().await.omit_accounts_on_update = omit;
    }

    /// All calls received so far, in order.
    pub async fn calls(&self) -> Vec<ClientCall> {
        self.inner.read().await.calls.clone()
    }

    /// Drain the call journal, returning what it held.
    pub async fn take_calls(&self) -> Vec<ClientCall> {
        std::mem::take(&mut self.inner.write().await.calls)
    }

    fn stamp(&self, record: &mut ResourceGroupRecord) {
        record.props.last_updated = Some(Utc::now().timestamp_millis().to_string());
        record.props.updated_by = Some(self.actor.clone());
    }
}

fn validate(record: &ResourceGroupRecord) -> Result<(), ClientError> {
    if record.name.trim().is_empty() {
        return Err(ClientError::Rejected("resourceName must not be empty".into()));
    }
    if record.group_type != LW_ACCOUNT_GROUP_TYPE {
        return Err(ClientError::Rejected(format!(
            "unsupported resourceType {:?}",
            record.group_type
        )));
    }
    if record.props.accounts.is_empty() {
        return Err(ClientError::Rejected(
            "props.lwAccounts must list at least one account".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ResourceGroupClient for InMemoryClient {
    async fn create(
        &self,
        record: &ResourceGroupRecord,
    ) -> Result<ResourceGroupRecord, ClientError> {
        let mut inner = self.inner.write().await;
        inner.record_call(ClientOp::Create, None, Some(record))?;
        validate(record)?;

        let resource_guid = Uuid::new_v4().to_string();
        let mut stored = record.clone();
        stored.resource_guid = Some(resource_guid.clone());
        stored.guid = Some(self.account_guid.clone());
        stored.is_default = false;
        self.stamp(&mut stored);

        debug!(resource_guid = %resource_guid, name = %stored.name, "Created resource group");
        inner.groups.insert(resource_guid, stored.clone());
        Ok(stored)
    }

    async fn get(&self, resource_guid: &str) -> Result<ResourceGroupRecord, ClientError> {
        let mut inner = self.inner.write().await;
        inner.record_call(ClientOp::Get, Some(resource_guid), None)?;

        inner
            .groups
            .get(resource_guid)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(resource_guid.to_string()))
    }

    async fn update(
        &self,
        resource_guid: &str,
        record: &ResourceGroupRecord,
    ) -> Result<ResourceGroupRecord, ClientError> {
        let mut inner = self.inner.write().await;
        inner.record_call(ClientOp::Update, Some(resource_guid), Some(record))?;

        if let Some(carried) = record.resource_guid.as_deref() {
            if carried != resource_guid {
                return Err(ClientError::Rejected(format!(
                    "payload resourceGuid {carried} does not match {resource_guid}"
                )));
            }
        }
        validate(record)?;

        let omit_accounts = inner.omit_accounts_on_update;
        let Some(stored) = inner.groups.get_mut(resource_guid) else {
            return Err(ClientError::NotFound(resource_guid.to_string()));
        };
        stored.name = record.name.clone();
        stored.enabled = record.enabled;
        stored.props.description = record.props.description.clone();
        stored.props.accounts = record.props.accounts.clone();
        self.stamp(stored);

        debug!(resource_guid = %resource_guid, name = %stored.name, "Updated resource group");
        let mut response = stored.clone();
        if omit_accounts {
            response.props.accounts.clear();
        }
        Ok(response)
    }

    async fn delete(&self, resource_guid: &str) -> Result<(), ClientError> {
        let mut inner = self.inner.write().await;
        inner.record_call(ClientOp::Delete, Some(resource_guid), None)?;

        let is_default = match inner.groups.get(resource_guid) {
            Some(group) => group.is_default,
            None => return Err(ClientError::NotFound(resource_guid.to_string())),
        };
        if is_default {
            return Err(ClientError::Rejected(
                "default resource groups cannot be deleted".into(),
            ));
        }

        inner.groups.remove(resource_guid);
        debug!(resource_guid = %resource_guid, "Deleted resource group");
        Ok(())
    }
}
