use crate::BoardResult;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Per-view persisted key/value configuration, supplied by the host.
///
/// Values survive across sessions. Reads and writes are synchronous;
/// the host batches disk I/O on its side.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<JsonValue>;
    fn set(&self, key: &str, value: JsonValue);
}

/// Host-side record mutation operations.
#[async_trait]
pub trait MutationService: Send + Sync {
    /// Create and open a new record with the grouping property pre-set
    /// to `grouping_value` (None for the ungrouped column).
    async fn create_record(&self, grouping_value: Option<String>) -> BoardResult<()>;

    /// Update the grouping property on each record, batched for
    /// multi-card drops.
    async fn apply_grouping_change(
        &self,
        paths: &[String],
        new_value: Option<String>,
    ) -> BoardResult<()>;
}

/// Host-side recoverable deletion.
#[async_trait]
pub trait TrashService: Send + Sync {
    async fn trash(&self, path: &str) -> BoardResult<()>;
}

/// Result of trashing a batch of records. Failures are collected and
/// reported in aggregate; they do not roll back successful deletions.
#[derive(Debug, Default)]
pub struct TrashOutcome {
    pub trashed: Vec<String>,
    pub failed: Vec<String>,
}

impl TrashOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
