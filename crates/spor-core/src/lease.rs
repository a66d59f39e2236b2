use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ownership token proving a process is the current authorized consumer
/// of a partition.
///
/// Leases are granted, renewed and revoked by an external ownership manager;
/// this crate only carries them so they can be presented to the checkpoint
/// store on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    /// The partition this lease grants ownership of.
    pub partition_id: String,
    /// Name of the owning host/process.
    pub owner: String,
    /// Ownership generation; bumped on every hand-off.
    pub epoch: u64,
    /// Token the store matches against the currently valid lease.
    pub token: Uuid,
}

impl Lease {
    pub fn new(partition_id: impl Into<String>, owner: impl Into<String>, epoch: u64) -> Self {
        Self {
            partition_id: partition_id.into(),
            owner: owner.into(),
            epoch,
            token: Uuid::new_v4(),
        }
    }
}

impl std::fmt::Display for Lease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "partition {} owned by {} (epoch {})",
            self.partition_id, self.owner, self.epoch
        )
    }
}
