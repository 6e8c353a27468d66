//! A single disc in the arena.

use ob_core::{AgentId, Vec2};

use crate::HealthState;

/// One individual: a disc of radius `radius` moving at constant velocity
/// between collisions.
///
/// Invariants maintained by the simulator (not by this type):
///
/// - `radius <= pos.x <= W - radius` and likewise for `y` at every exact
///   simulation time;
/// - `state == Dead` or `locked` implies `vel == Vec2::ZERO`.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    /// Stable index into the population.
    pub id: AgentId,

    pub pos: Vec2,

    pub vel: Vec2,

    pub radius: f64,

    pub state: HealthState,

    /// Simulated seconds spent `Infected`.  Meaningless in any other state.
    pub infection_elapsed: f64,

    /// Forced stationary by lockdown.
    pub locked: bool,
}

impl Agent {
    /// A stationary, susceptible, unlocked agent.
    pub fn new(id: AgentId, pos: Vec2, radius: f64) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            state: HealthState::Susceptible,
            infection_elapsed: 0.0,
            locked: false,
        }
    }

    /// Builder-style velocity setter for hand-built populations.
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Builder-style state setter; applies the same side effects as
    /// [`set_state`](Self::set_state).
    pub fn with_state(mut self, state: HealthState) -> Self {
        self.set_state(state);
        self
    }

    // ── Geometric primitives ──────────────────────────────────────────────

    /// Drift by `vel * dt`.  No bounds check; the collision system keeps the
    /// agent inside the arena.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    /// Reflect the velocity across the line perpendicular to
    /// `sign * normal`: `v ← v − 2 (v·n′) n′` with `n′ = sign · normal`.
    ///
    /// A zero velocity stays zero, so reflecting a dead or locked agent is a
    /// no-op.
    #[inline]
    pub fn reflect(&mut self, normal: Vec2, sign: f64) {
        let n = normal * sign;
        let along = 2.0 * n.dot(self.vel);
        self.vel = self.vel - n * along;
    }

    /// Squared centre-to-centre distance.
    #[inline]
    pub fn dist2(&self, other: &Agent) -> f64 {
        (other.pos - self.pos).norm2()
    }

    /// Squared speed; the agent's kinetic-energy contribution.
    #[inline]
    pub fn speed2(&self) -> f64 {
        self.vel.norm2()
    }

    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.vel.is_zero()
    }

    // ── Epidemic state ────────────────────────────────────────────────────

    /// Enter `state`.
    ///
    /// Entering `Infected` restarts the infection timer; entering `Dead`
    /// zeroes the velocity.
    pub fn set_state(&mut self, state: HealthState) {
        self.state = state;
        match state {
            HealthState::Infected => self.infection_elapsed = 0.0,
            HealthState::Dead     => self.vel = Vec2::ZERO,
            _ => {}
        }
    }

    // ── Lockdown ──────────────────────────────────────────────────────────

    /// Freeze the agent in place.
    pub fn lock(&mut self) {
        self.locked = true;
        self.vel = Vec2::ZERO;
    }

    /// Release the agent with velocity `vel`.  Dead agents stay put.
    pub fn unlock(&mut self, vel: Vec2) {
        self.locked = false;
        if self.state != HealthState::Dead {
            self.vel = vel;
        }
    }
}
