use std::sync::{Arc, Mutex};

use spor_core::{
    Checkpoint, CheckpointError, CheckpointStore, InitialPositionPolicy, Lease,
    ReceiverRuntimeInfo, StartingPosition, START_OF_STREAM,
};

/// Mutable position state for one partition, guarded as a unit so a
/// checkpoint snapshot never sees a torn (offset, sequence_number) pair.
struct TrackedPosition {
    offset: String,
    sequence_number: u64,
    /// Whether the regression guard is active. Armed by resolving from a
    /// stored checkpoint or by the first accepted advance; until then the
    /// in-memory sequence number is not trustworthy and every advance is
    /// accepted.
    guard_armed: bool,
    lease: Lease,
    runtime_info: ReceiverRuntimeInfo,
}

/// Single authority for "what is the current read position of this
/// partition, and where should a new consumer resume from".
///
/// One instance per owned partition. Created when the partition is assigned
/// to this process and dropped when ownership is relinquished; lease
/// hand-offs swap the lease slot in place without replacing the tracker.
pub struct PositionTracker<C, P>
where
    C: CheckpointStore,
    P: InitialPositionPolicy,
{
    partition_id: String,
    stream_name: String,
    consumer_group: String,
    store: Arc<C>,
    policy: Arc<P>,
    state: Mutex<TrackedPosition>,
}

impl<C, P> PositionTracker<C, P>
where
    C: CheckpointStore,
    P: InitialPositionPolicy,
{
    pub fn new(
        partition_id: impl Into<String>,
        stream_name: impl Into<String>,
        consumer_group: impl Into<String>,
        lease: Lease,
        store: Arc<C>,
        policy: Arc<P>,
    ) -> Self {
        let partition_id = partition_id.into();
        let runtime_info = ReceiverRuntimeInfo::new(partition_id.clone());
        Self {
            partition_id,
            stream_name: stream_name.into(),
            consumer_group: consumer_group.into(),
            store,
            policy,
            state: Mutex::new(TrackedPosition {
                offset: START_OF_STREAM.to_string(),
                sequence_number: 0,
                guard_armed: false,
                lease,
                runtime_info,
            }),
        }
    }

    pub fn partition_id(&self) -> &str {
        &self.partition_id
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    pub fn consumer_group(&self) -> &str {
        &self.consumer_group
    }

    /// Name of the host currently holding the lease for this partition.
    pub fn owner(&self) -> String {
        self.state.lock().unwrap().lease.owner.clone()
    }

    /// Snapshot of the current (offset, sequence_number) pair.
    pub fn current_position(&self) -> (String, u64) {
        let state = self.state.lock().unwrap();
        (state.offset.clone(), state.sequence_number)
    }

    // The lease is granted and renewed by an external ownership manager;
    // unlike the rest of the identity it changes over the tracker's life.
    pub fn set_lease(&self, lease: Lease) {
        self.state.lock().unwrap().lease = lease;
    }

    pub fn runtime_info(&self) -> ReceiverRuntimeInfo {
        self.state.lock().unwrap().runtime_info.clone()
    }

    /// Replace the receiver statistics wholesale.
    pub fn set_runtime_info(&self, info: ReceiverRuntimeInfo) {
        self.state.lock().unwrap().runtime_info = info;
    }

    /// Determine where this partition's consumer should begin reading.
    ///
    /// A stored checkpoint always wins: its offset and sequence number are
    /// adopted as current state and the offset returned. Only when no
    /// checkpoint exists is the user's policy consulted; an offset result
    /// seeds the position, a timestamp result leaves the position at the
    /// start-of-stream sentinels since a timestamp is not a cursor.
    ///
    /// One store round-trip, at most one policy call. Store failures
    /// propagate unchanged; retries are the store's business.
    pub fn resolve_starting_position(&self) -> Result<StartingPosition, CheckpointError> {
        match self.store.get_checkpoint(&self.partition_id)? {
            Some(checkpoint) => {
                let mut state = self.state.lock().unwrap();
                state.offset = checkpoint.offset.clone();
                state.sequence_number = checkpoint.sequence_number;
                state.guard_armed = true;
                tracing::info!(
                    "Partition {}: resuming from checkpoint {}//{}",
                    self.partition_id,
                    state.offset,
                    state.sequence_number
                );
                Ok(StartingPosition::Offset(checkpoint.offset))
            }
            None => {
                tracing::info!(
                    "Partition {}: no checkpoint stored, consulting initial position policy",
                    self.partition_id
                );
                let position = self.policy.starting_position(&self.partition_id);
                if let StartingPosition::Offset(offset) = &position {
                    // The true sequence number at this offset is unknown
                    // until the first event arrives, so the regression
                    // guard stays disarmed.
                    let mut state = self.state.lock().unwrap();
                    state.offset = offset.clone();
                    state.sequence_number = 0;
                    state.guard_armed = false;
                }
                tracing::info!(
                    "Partition {}: policy chose {}",
                    self.partition_id,
                    position
                );
                Ok(position)
            }
        }
    }

    /// Advance the tracked position from a freshly received event.
    ///
    /// Accepts the pair unless it would move the sequence number backwards;
    /// a regressing update is logged and dropped, never an error. Both the
    /// compare and the update happen under the lock, so concurrent calls
    /// cannot interleave.
    pub fn advance(&self, offset: impl Into<String>, sequence_number: u64) {
        let offset = offset.into();
        let mut state = self.state.lock().unwrap();
        if !state.guard_armed || sequence_number >= state.sequence_number {
            state.offset = offset;
            state.sequence_number = sequence_number;
            state.guard_armed = true;
        } else {
            tracing::info!(
                "Partition {}: advance({}//{}) would move backwards from {}//{}, ignoring",
                self.partition_id,
                offset,
                sequence_number,
                state.offset,
                state.sequence_number
            );
        }
    }

    /// Persist the currently tracked position.
    ///
    /// The (offset, sequence_number) pair is captured in one critical
    /// section so an in-flight `advance` on another thread can never leak a
    /// half-updated pair into the store.
    pub fn checkpoint(&self) -> Result<(), CheckpointError> {
        let (checkpoint, lease) = {
            let state = self.state.lock().unwrap();
            (
                Checkpoint::new(
                    self.partition_id.clone(),
                    state.offset.clone(),
                    state.sequence_number,
                ),
                state.lease.clone(),
            )
        };
        self.persist(&lease, checkpoint)
    }

    /// Persist a caller-supplied position, leaving tracked state untouched.
    ///
    /// Lets a consumer checkpoint every Nth event (using that event's own
    /// offset and sequence number) while still advancing on every event.
    pub fn checkpoint_at(
        &self,
        offset: impl Into<String>,
        sequence_number: u64,
    ) -> Result<(), CheckpointError> {
        let checkpoint = Checkpoint::new(self.partition_id.clone(), offset, sequence_number);
        let lease = self.state.lock().unwrap().lease.clone();
        self.persist(&lease, checkpoint)
    }

    fn persist(&self, lease: &Lease, checkpoint: Checkpoint) -> Result<(), CheckpointError> {
        tracing::info!("Partition {}: saving checkpoint {}", self.partition_id, checkpoint);
        self.store.update_checkpoint(lease, checkpoint)
    }
}
