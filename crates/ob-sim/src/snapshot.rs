//! Immutable read-outs of the population for renderers and statistics.

use std::fmt;

use ob_agent::{Agent, HealthState};
use ob_core::AgentId;

// ── Tally ─────────────────────────────────────────────────────────────────────

/// Head count per [`HealthState`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub susceptible: usize,
    pub infected:    usize,
    pub recovered:   usize,
    pub dead:        usize,
}

impl Tally {
    pub fn from_agents(agents: &[Agent]) -> Self {
        let mut tally = Tally::default();
        for agent in agents {
            *tally.get_mut(agent.state) += 1;
        }
        tally
    }

    pub fn get(&self, state: HealthState) -> usize {
        match state {
            HealthState::Susceptible => self.susceptible,
            HealthState::Infected    => self.infected,
            HealthState::Recovered   => self.recovered,
            HealthState::Dead        => self.dead,
        }
    }

    fn get_mut(&mut self, state: HealthState) -> &mut usize {
        match state {
            HealthState::Susceptible => &mut self.susceptible,
            HealthState::Infected    => &mut self.infected,
            HealthState::Recovered   => &mut self.recovered,
            HealthState::Dead        => &mut self.dead,
        }
    }

    /// `|S| + |I| + |R| + |D|`.
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered + self.dead
    }

    /// Share of the population in `state`; `0.0` for an empty population.
    pub fn fraction(&self, state: HealthState) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.get(state) as f64 / n as f64,
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={} I={} R={} D={}",
            self.susceptible, self.infected, self.recovered, self.dead,
        )
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// What a front-end draws for one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentView {
    pub id:     AgentId,
    pub x:      f64,
    pub y:      f64,
    pub radius: f64,
    pub state:  HealthState,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id:     agent.id,
            x:      agent.pos.x,
            y:      agent.pos.y,
            radius: agent.radius,
            state:  agent.state,
        }
    }
}

/// The population at one instant, copied out of the simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub time:   f64,
    pub agents: Vec<AgentView>,
}

impl Snapshot {
    pub fn new(time: f64, agents: &[Agent]) -> Self {
        Self {
            time,
            agents: agents.iter().map(AgentView::from).collect(),
        }
    }

    /// Whole simulated days elapsed (one simulated second is one day on the
    /// front-end's counter).
    pub fn day(&self) -> u64 {
        self.time.max(0.0).floor() as u64
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for view in &self.agents {
            *tally.get_mut(view.state) += 1;
        }
        tally
    }
}
