//! Clients for the remote resource group service.
//!
//! The reconciler only sees [`ResourceGroupClient`]. Transport, retries and
//! authentication live behind it; one client may be shared by many
//! reconcilers working on different resource groups.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::wire::ResourceGroupRecord;

pub use memory::{ClientCall, ClientOp, InMemoryClient};

/// Failures a client may report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The call could not complete (network, auth, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend declined the request.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// No resource group with this resource guid.
    #[error("resource group {0} not found")]
    NotFound(String),
}

/// Call surface of the remote service for one entity kind.
#[async_trait]
pub trait ResourceGroupClient: Send + Sync {
    /// Create a resource group; the response carries the new resource guid.
    async fn create(
        &self,
        record: &ResourceGroupRecord,
    ) -> Result<ResourceGroupRecord, ClientError>;

    /// Fetch a resource group by resource guid.
    async fn get(&self, resource_guid: &str) -> Result<ResourceGroupRecord, ClientError>;

    /// Replace the writable fields of a resource group.
    async fn update(
        &self,
        resource_guid: &str,
        record: &ResourceGroupRecord,
    ) -> Result<ResourceGroupRecord, ClientError>;

    /// Delete a resource group.
    async fn delete(&self, resource_guid: &str) -> Result<(), ClientError>;
}
