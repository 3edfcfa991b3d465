//! Reconciler error types.

use std::fmt;

use thiserror::Error;

use crate::clients::ClientError;

/// Lifecycle operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        };
        f.write_str(s)
    }
}

/// Lifecycle phase of the entity a reconciler tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No resource guid known yet.
    Absent,
    /// Resource guid known; state may be stale.
    Present,
    /// Removed remotely; terminal.
    Deleted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Absent => "absent",
            Phase::Present => "present",
            Phase::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// Coarse classification of a [`ReconcileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call could not complete (network, auth, timeout).
    Transport,
    /// The backend validated and declined the request.
    RemoteRejected,
    /// The identifier does not resolve.
    NotFound,
    /// The operation is not valid for the tracked entity.
    Lifecycle,
    /// The client returned a response that breaks its contract.
    Contract,
}

/// Errors returned by lifecycle operations.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Failure reported by the remote client, passed through unchanged.
    #[error("{operation} resource group failed: {source}")]
    Api {
        operation: Operation,
        #[source]
        source: ClientError,
    },

    /// The entity was already deleted through this reconciler.
    #[error("{operation} resource group: {resource_guid} was deleted")]
    Deleted {
        operation: Operation,
        resource_guid: String,
    },

    #[error("cannot {operation} resource group while it is {phase}")]
    InvalidPhase { operation: Operation, phase: Phase },

    #[error("{operation} resource group: requested {requested} but tracking {tracked}")]
    IdentityMismatch {
        operation: Operation,
        requested: String,
        tracked: String,
    },

    #[error("{operation} resource group: response carried no resource guid")]
    MissingIdentity { operation: Operation },
}

impl ReconcileError {
    pub(crate) fn api(operation: Operation, source: ClientError) -> Self {
        Self::Api { operation, source }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Api { operation, .. }
            | Self::Deleted { operation, .. }
            | Self::InvalidPhase { operation, .. }
            | Self::IdentityMismatch { operation, .. }
            | Self::MissingIdentity { operation } => *operation,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { source, .. } => match source {
                ClientError::Transport(_) => ErrorKind::Transport,
                ClientError::Rejected(_) => ErrorKind::RemoteRejected,
                ClientError::NotFound(_) => ErrorKind::NotFound,
            },
            Self::Deleted { .. } => ErrorKind::NotFound,
            Self::InvalidPhase { .. } | Self::IdentityMismatch { .. } => ErrorKind::Lifecycle,
            Self::MissingIdentity { .. } => ErrorKind::Contract,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Whether the caller should drop its local record after this failure.
    ///
    /// Only a delete that the backend refused or could not resolve qualifies;
    /// everything else leaves the entity as it was and may be retried.
    pub fn is_terminal(&self) -> bool {
        self.operation() == Operation::Delete
            && matches!(self.kind(), ErrorKind::NotFound | ErrorKind::RemoteRejected)
    }
}

/// Result type for lifecycle operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;
