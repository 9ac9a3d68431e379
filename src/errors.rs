use thiserror::Error;

/// Errors surfaced by the replication boundary.
///
/// Illegal game operations never reach this type: the action guard denies
/// them before dispatch and the client reports them as ignored. Only
/// transport and snapshot codec failures are errors.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    #[error("Room store error: {details}")]
    Store { details: String },

    #[error("Broadcast channel error: {details}")]
    Channel { details: String },

    #[error("Snapshot serialization failed: {details}")]
    Serialization { details: String },
}

/// Result type alias for replication operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Helper methods for creating common errors
impl SyncError {
    pub fn store(details: impl Into<String>) -> Self {
        Self::Store {
            details: details.into(),
        }
    }

    pub fn channel(details: impl Into<String>) -> Self {
        Self::Channel {
            details: details.into(),
        }
    }

    pub fn serialization(details: impl Into<String>) -> Self {
        Self::Serialization {
            details: details.into(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            details: err.to_string(),
        }
    }
}
