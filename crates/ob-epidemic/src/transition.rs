//! A record of one agent changing health state.

use std::fmt;

use ob_agent::HealthState;
use ob_core::AgentId;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    pub agent: AgentId,
    pub from:  HealthState,
    pub to:    HealthState,
    /// Simulated time of the change.
    pub time:  f64,
}

impl Transition {
    /// `true` if the agent stopped moving because of this transition.
    #[inline]
    pub fn is_death(&self) -> bool {
        self.to == HealthState::Dead
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3} {} {} -> {}", self.time, self.agent, self.from, self.to)
    }
}
