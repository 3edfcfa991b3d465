//! Lifecycle reconciler for LW_ACCOUNT resource groups.
//!
//! Keeps a declared resource group configuration in sync with the remote
//! security platform through create, read, update, delete and import. The
//! remote service is reached through an injected [`ResourceGroupClient`];
//! [`InMemoryClient`] provides a network-free backend.
//!
//! # Example
//! ```ignore
//! use std::sync::Arc;
//! use rgroup_reconciler::{InMemoryClient, Lifecycle, ResourceGroupConfig, ResourceGroupReconciler};
//!
//! let client = Arc::new(InMemoryClient::new());
//! let mut group = ResourceGroupReconciler::new(client);
//! let state = group
//!     .create(&ResourceGroupConfig::new("Group A", vec!["acct1".into()]))
//!     .await?;
//! group.read(&state.resource_guid).await?;
//! ```

pub mod audit;
pub mod clients;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod reconciler;
pub mod schema;
pub mod wire;

pub use audit::AuditLogger;
pub use clients::{ClientError, InMemoryClient, ResourceGroupClient};
pub use config::ReconcilerConfig;
pub use error::{ErrorKind, Operation, Phase, ReconcileError, Result};
pub use model::{ResourceGroupConfig, ResourceGroupState};
pub use reconciler::{ImportResolver, Lifecycle, ResourceGroupReconciler};
pub use wire::{LW_ACCOUNT_GROUP_TYPE, ResourceGroupProps, ResourceGroupRecord};
