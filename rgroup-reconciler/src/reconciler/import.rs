//! Import resolver - rebuilds local state from a bare resource guid.

use tracing::{info, warn};

use crate::clients::ResourceGroupClient;
use crate::error::{Operation, ReconcileError, Result};
use crate::mapper;
use crate::model::ResourceGroupState;
use crate::wire::LW_ACCOUNT_GROUP_TYPE;

/// Fetch a group and decode it into a full state record.
///
/// The requested guid is the identity of the result, whatever the response
/// echoes back. An import response must carry a guid of its own.
pub(crate) async fn fetch_state(
    client: &dyn ResourceGroupClient,
    operation: Operation,
    resource_guid: &str,
) -> Result<ResourceGroupState> {
    let response = client
        .get(resource_guid)
        .await
        .map_err(|e| ReconcileError::api(operation, e))?;

    let mut state = mapper::decode(&response);
    if state.resource_guid.is_empty() && operation == Operation::Import {
        return Err(ReconcileError::MissingIdentity { operation });
    }
    if state.resource_guid != resource_guid {
        if !state.resource_guid.is_empty() {
            warn!(
                requested = %resource_guid,
                echoed = %state.resource_guid,
                %operation,
                "Backend echoed a different resource guid, keeping the requested one"
            );
        }
        state.resource_guid = resource_guid.to_string();
    }
    Ok(state)
}

/// Reconstructs the state of a group that was created outside this
/// reconciler.
pub struct ImportResolver<'a> {
    client: &'a dyn ResourceGroupClient,
}

impl<'a> ImportResolver<'a> {
    pub fn new(client: &'a dyn ResourceGroupClient) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, resource_guid: &str) -> Result<ResourceGroupState> {
        info!(
            "Importing {} resource group with guid {}",
            LW_ACCOUNT_GROUP_TYPE, resource_guid
        );
        let state = fetch_state(self.client, Operation::Import, resource_guid).await?;
        info!(
            name = %state.name,
            "Imported {} resource group with guid {}",
            LW_ACCOUNT_GROUP_TYPE, resource_guid
        );
        Ok(state)
    }
}
