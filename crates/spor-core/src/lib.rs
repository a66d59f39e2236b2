//! Spor Core - Domain types and collaborator contracts.
//!
//! This crate defines the values that describe a consumer's position in a
//! partitioned event stream (checkpoints, leases, starting positions) and
//! the contracts the tracker consumes them through. It has no dependencies
//! on other Spor crates.

pub mod checkpoint;
pub mod error;
pub mod lease;
pub mod policy;
pub mod position;
pub mod receiver;
pub mod storage;

// Re-exports for convenience
pub use checkpoint::{Checkpoint, START_OF_STREAM};
pub use error::CheckpointError;
pub use lease::Lease;
pub use policy::InitialPositionPolicy;
pub use position::StartingPosition;
pub use receiver::ReceiverRuntimeInfo;
pub use storage::CheckpointStore;

#[cfg(any(test, feature = "test-utils"))]
pub use storage::memory::InMemoryCheckpointStore;
