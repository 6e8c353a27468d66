use ob_core::ParamError;
use ob_event::EventError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid parameter: {0}")]
    Param(#[from] ParamError),

    #[error("event prediction failed: {0}")]
    Event(#[from] EventError),

    /// The queue surfaced an event dated at or before the last processed one.
    #[error("event at t={event_time} does not follow the last processed time {old_time}")]
    LostMonotonicity {
        event_time: f64,
        old_time:   f64,
    },

    #[error("more than {limit} events in one step (stopped at t={time})")]
    EventBudgetExceeded {
        limit: usize,
        time:  f64,
    },

    /// Containment or non-overlap failed the sanity check.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("step size {0} must be finite and non-negative")]
    InvalidStep(f64),

    /// A previous hard error left the state inconsistent.
    #[error("simulator is poisoned by an earlier error; repopulate or restart it")]
    Poisoned,
}

impl SimError {
    /// `true` for errors that leave the simulator unusable until it is reset.
    ///
    /// Rejected inputs (`Param`, `InvalidStep`) change nothing and are not
    /// fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SimError::Param(_) | SimError::InvalidStep(_))
    }
}

pub type SimResult<T> = Result<T, SimError>;
