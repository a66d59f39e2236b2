use crate::checkpoint::Checkpoint;
use crate::error::CheckpointError;
use crate::lease::Lease;

/// Trait for durable checkpoint storage, keyed by partition id.
///
/// Implementations must provide read-your-writes consistency for a single
/// lease holder. The stale-write guard and lease validation belong to the
/// store; callers present their current lease on every write and get told
/// if it is no longer good. Retry and backoff policy also live behind this
/// trait, not in front of it.
pub trait CheckpointStore: Send + Sync {
    /// Get the checkpoint for a partition, if one was ever stored.
    fn get_checkpoint(&self, partition_id: &str) -> Result<Option<Checkpoint>, CheckpointError>;

    /// Durably store a checkpoint on behalf of the given lease holder.
    ///
    /// Fails with `Stale` if the checkpoint's sequence number is behind the
    /// last stored value, and with `LeaseLost` if the lease token is no
    /// longer the valid one for the partition.
    fn update_checkpoint(&self, lease: &Lease, checkpoint: Checkpoint)
        -> Result<(), CheckpointError>;
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicBool, Ordering};
    use uuid::Uuid;

    /// In-memory checkpoint store for testing.
    ///
    /// Enforces the same guards a real backend would: writes with a stale
    /// sequence number are rejected, and if a lease token has been
    /// registered for a partition, writes presenting any other token fail
    /// with `LeaseLost`.
    #[derive(Default)]
    pub struct InMemoryCheckpointStore {
        checkpoints: RwLock<HashMap<String, Checkpoint>>,
        lease_tokens: RwLock<HashMap<String, Uuid>>,
        fail_next: AtomicBool,
    }

    impl InMemoryCheckpointStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a checkpoint directly, bypassing the write guards.
        pub fn seed(&self, checkpoint: Checkpoint) {
            self.checkpoints
                .write()
                .unwrap()
                .insert(checkpoint.partition_id.clone(), checkpoint);
        }

        /// Register `lease` as the currently valid one for its partition.
        /// Writes presenting a different token will fail with `LeaseLost`.
        pub fn register_lease(&self, lease: &Lease) {
            self.lease_tokens
                .write()
                .unwrap()
                .insert(lease.partition_id.clone(), lease.token);
        }

        /// Make the next store call fail with `StoreUnavailable`.
        pub fn fail_next(&self) {
            self.fail_next.store(true, Ordering::SeqCst);
        }

        /// Number of stored checkpoints, across all partitions.
        pub fn len(&self) -> usize {
            self.checkpoints.read().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.checkpoints.read().unwrap().is_empty()
        }

        fn check_failure_injection(&self) -> Result<(), CheckpointError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(CheckpointError::StoreUnavailable(
                    "injected failure".to_string(),
                ));
            }
            Ok(())
        }
    }

    impl CheckpointStore for InMemoryCheckpointStore {
        fn get_checkpoint(
            &self,
            partition_id: &str,
        ) -> Result<Option<Checkpoint>, CheckpointError> {
            self.check_failure_injection()?;
            Ok(self.checkpoints.read().unwrap().get(partition_id).cloned())
        }

        fn update_checkpoint(
            &self,
            lease: &Lease,
            checkpoint: Checkpoint,
        ) -> Result<(), CheckpointError> {
            self.check_failure_injection()?;

            {
                let tokens = self.lease_tokens.read().unwrap();
                if let Some(current) = tokens.get(&checkpoint.partition_id) {
                    if *current != lease.token {
                        return Err(CheckpointError::LeaseLost(checkpoint.partition_id));
                    }
                }
            }

            let mut checkpoints = self.checkpoints.write().unwrap();
            if let Some(stored) = checkpoints.get(&checkpoint.partition_id) {
                if checkpoint.sequence_number < stored.sequence_number {
                    return Err(CheckpointError::Stale {
                        partition_id: checkpoint.partition_id,
                        stored: stored.sequence_number,
                        attempted: checkpoint.sequence_number,
                    });
                }
            }

            checkpoints.insert(checkpoint.partition_id.clone(), checkpoint);
            Ok(())
        }
    }

}
