use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkpoint::START_OF_STREAM;

/// Where a consumer should begin reading a partition when no checkpoint
/// exists - either a literal cursor or a point in time.
///
/// Exactly two cases, handled exhaustively; a policy cannot return any
/// other shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum StartingPosition {
    /// Begin at an opaque, backend-defined offset token.
    Offset(String),
    /// Begin at the first event enqueued at or after this instant.
    Timestamp(DateTime<Utc>),
}

impl StartingPosition {
    /// Begin at the very start of the partition's stream.
    pub fn start_of_stream() -> Self {
        StartingPosition::Offset(START_OF_STREAM.to_string())
    }

    pub fn offset(offset: impl Into<String>) -> Self {
        StartingPosition::Offset(offset.into())
    }

    pub fn timestamp(at: DateTime<Utc>) -> Self {
        StartingPosition::Timestamp(at)
    }

    /// Get the offset token if this is an offset position.
    pub fn as_offset(&self) -> Option<&str> {
        match self {
            StartingPosition::Offset(offset) => Some(offset),
            StartingPosition::Timestamp(_) => None,
        }
    }

    /// Get the instant if this is a timestamp position.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            StartingPosition::Offset(_) => None,
            StartingPosition::Timestamp(at) => Some(*at),
        }
    }
}

impl std::fmt::Display for StartingPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartingPosition::Offset(offset) => write!(f, "offset {}", offset),
            StartingPosition::Timestamp(at) => write!(f, "timestamp {}", at.to_rfc3339()),
        }
    }
}
