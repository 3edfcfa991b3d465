//! Lifecycle reconcilers.
//!
//! A reconciler owns the local state of exactly one remote entity and drives
//! it through create, read, update, delete and import. Operations run one at
//! a time (`&mut self`); failures are returned untouched and leave the local
//! state as it was.

pub mod import;
pub mod resource_group;

use async_trait::async_trait;

use crate::error::Result;

pub use import::ImportResolver;
pub use resource_group::ResourceGroupReconciler;

/// Lifecycle contract exposed to the configuration engine.
#[async_trait]
pub trait Lifecycle: Send {
    /// Desired state authored by the engine.
    type Config: Sync;
    /// Reconciled state handed back to the engine.
    type State: Send;

    /// Create the entity from configuration.
    async fn create(&mut self, config: &Self::Config) -> Result<Self::State>;

    /// Refresh local state from the backend.
    async fn read(&mut self, resource_guid: &str) -> Result<Self::State>;

    /// Push configuration to an existing entity.
    async fn update(&mut self, resource_guid: &str, config: &Self::Config) -> Result<Self::State>;

    /// Remove the entity.
    async fn delete(&mut self, resource_guid: &str) -> Result<()>;

    /// Adopt an existing entity known only by its identifier.
    async fn import(&mut self, resource_guid: &str) -> Result<Self::State>;
}
