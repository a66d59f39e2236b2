use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-observed statistics for a partition's receiver.
///
/// Purely informational: the event-delivery path replaces this wholesale
/// whenever the receiver reports fresh numbers, and nothing in position
/// tracking depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverRuntimeInfo {
    /// The partition these statistics describe.
    pub partition_id: String,
    /// Sequence number of the last event enqueued in the partition.
    pub last_enqueued_sequence_number: u64,
    /// Offset of the last event enqueued in the partition.
    pub last_enqueued_offset: Option<String>,
    /// When the last event was enqueued, per the service.
    pub last_enqueued_at: Option<DateTime<Utc>>,
    /// When these statistics were retrieved.
    pub retrieved_at: Option<DateTime<Utc>>,
}

impl ReceiverRuntimeInfo {
    /// Empty statistics for a partition that has not reported yet.
    pub fn new(partition_id: impl Into<String>) -> Self {
        Self {
            partition_id: partition_id.into(),
            last_enqueued_sequence_number: 0,
            last_enqueued_offset: None,
            last_enqueued_at: None,
            retrieved_at: None,
        }
    }

    /// Replace the observed fields with a fresh report.
    pub fn update(
        &mut self,
        sequence_number: u64,
        offset: impl Into<String>,
        enqueued_at: DateTime<Utc>,
        retrieved_at: DateTime<Utc>,
    ) {
        self.last_enqueued_sequence_number = sequence_number;
        self.last_enqueued_offset = Some(offset.into());
        self.last_enqueued_at = Some(enqueued_at);
        self.retrieved_at = Some(retrieved_at);
    }
}
