use ob_core::AgentId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    /// Two agents approach each other while already overlapping by more than
    /// round-off: a collision between them was missed.
    #[error("{a} and {b} overlap: contact began {overlap_secs:.6} s in the past")]
    Overlap {
        a:            AgentId,
        b:            AgentId,
        overlap_secs: f64,
    },
}

pub type EventResult<T> = Result<T, EventError>;
