//! Plain data row types written by output backends.

use ob_agent::HealthState;
use ob_sim::{AgentView, Tally};

/// Population counts after one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TallyRow {
    pub time:        f64,
    pub day:         u64,
    pub susceptible: u64,
    pub infected:    u64,
    pub recovered:   u64,
    pub dead:        u64,
}

impl TallyRow {
    pub fn new(time: f64, tally: &Tally) -> Self {
        Self {
            time,
            day:         time.max(0.0).floor() as u64,
            susceptible: tally.susceptible as u64,
            infected:    tally.infected as u64,
            recovered:   tally.recovered as u64,
            dead:        tally.dead as u64,
        }
    }
}

/// One agent in a position snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentRow {
    pub time:     f64,
    pub agent_id: u32,
    pub x:        f64,
    pub y:        f64,
    pub radius:   f64,
    pub state:    HealthState,
}

impl AgentRow {
    pub fn new(time: f64, view: &AgentView) -> Self {
        Self {
            time,
            agent_id: view.id.0,
            x:        view.x,
            y:        view.y,
            radius:   view.radius,
            state:    view.state,
        }
    }
}
