use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CheckpointError {
    #[error(
        "Stale checkpoint for partition {partition_id}: \
         attempted sequence {attempted} is behind stored sequence {stored}"
    )]
    Stale {
        partition_id: String,
        stored: u64,
        attempted: u64,
    },

    #[error("Lease for partition {0} is no longer held by this owner")]
    LeaseLost(String),

    #[error("Checkpoint store unavailable: {0}")]
    StoreUnavailable(String),
}
