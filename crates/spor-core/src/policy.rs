use crate::position::StartingPosition;

/// User-supplied fallback for partitions that have never been checkpointed.
///
/// Called at most once per partition per tracker lifetime, and only when the
/// store has no checkpoint. Expected to be pure; side effects are the
/// caller's problem.
pub trait InitialPositionPolicy: Send + Sync {
    fn starting_position(&self, partition_id: &str) -> StartingPosition;
}

/// Plain closures work as policies.
impl<F> InitialPositionPolicy for F
where
    F: Fn(&str) -> StartingPosition + Send + Sync,
{
    fn starting_position(&self, partition_id: &str) -> StartingPosition {
        self(partition_id)
    }
}
