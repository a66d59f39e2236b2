use serde::{Deserialize, Serialize};

/// Offset sentinel meaning "the very beginning of the partition's stream".
///
/// Offsets are opaque, backend-defined cursor tokens; this is the one value
/// with a fixed meaning across backends.
pub const START_OF_STREAM: &str = "-1";

/// A durable record of the last-processed position in a partition.
///
/// Immutable once constructed. A fresh value is captured for every
/// persistence call so the store always receives a matched
/// (offset, sequence_number) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// The partition this checkpoint belongs to.
    pub partition_id: String,
    /// Opaque cursor into the partition's stream.
    pub offset: String,
    /// Sequence number of the event at `offset`.
    pub sequence_number: u64,
}

impl Checkpoint {
    pub fn new(
        partition_id: impl Into<String>,
        offset: impl Into<String>,
        sequence_number: u64,
    ) -> Self {
        Self {
            partition_id: partition_id.into(),
            offset: offset.into(),
            sequence_number,
        }
    }
}

impl std::fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}//{}",
            self.partition_id, self.offset, self.sequence_number
        )
    }
}
