//! Spor Tracker - Per-partition stream-position tracking.
//!
//! Decides where a consumer resumes reading a partition, refuses to move
//! the recorded position backwards, and persists progress through a
//! pluggable checkpoint store.

pub mod tracker;

pub use tracker::PositionTracker;
