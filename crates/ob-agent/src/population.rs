//! Population placement: rejection-sampled positions, lockdown split, and
//! patient-zero selection.
//!
//! # Sizing
//!
//! For `n` requested agents in a `W × H` arena:
//!
//! ```text
//! r         = radius_factor · √(W·H / n)        (default factor 0.1)
//! max_speed = speed_factor · r                  (default factor 10)
//! ```
//!
//! Each slot tries `attempts` uniform positions in `[2r, W−2r] × [2r, H−2r]`
//! and keeps the first lying at least `spacing_factor · r` from every agent
//! already placed.  When a slot exhausts its attempts placement stops: the
//! population is shorter than requested, which callers observe through
//! [`Population::is_short`] rather than as an error.

use ob_core::{AgentId, SimRng, Vec2};

use crate::Agent;

// ── PlacementConfig ───────────────────────────────────────────────────────────

/// Knobs for [`PopulationBuilder`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Random positions tried per slot before giving up.
    pub attempts: u32,

    /// Minimum centre distance between placed agents, in radii.
    pub spacing_factor: f64,

    /// `r = radius_factor · √(W·H / n)`.
    pub radius_factor: f64,

    /// `max_speed = speed_factor · r`.
    pub speed_factor: f64,

    /// Use this radius instead of the area-derived one.  Lets callers pack an
    /// arena beyond what the default sizing would ever produce.
    pub radius: Option<f64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            attempts:       20,
            spacing_factor: 2.1,
            radius_factor:  0.1,
            speed_factor:   10.0,
            radius:         None,
        }
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// Result of a placement run.
#[derive(Clone, Debug)]
pub struct Population {
    /// Placed agents, `agents[i].id == AgentId(i)`.
    pub agents: Vec<Agent>,

    /// How many agents were asked for.
    pub requested: usize,

    /// Common radius of every placed agent.
    pub radius: f64,

    /// Per-axis velocity bound; fresh velocities are drawn in `[−v, v]²`.
    pub max_speed: f64,
}

impl Population {
    /// `true` when the arena was too crowded to place every requested agent.
    pub fn is_short(&self) -> bool {
        self.agents.len() < self.requested
    }
}

// ── PopulationBuilder ─────────────────────────────────────────────────────────

/// Fluent builder for a [`Population`].
///
/// ```rust
/// use ob_agent::PopulationBuilder;
/// use ob_core::SimRng;
///
/// let mut rng = SimRng::new(42);
/// let pop = PopulationBuilder::new(100, 400.0, 400.0)
///     .lockdown(0.5)
///     .build(&mut rng);
///
/// assert_eq!(pop.agents.len(), 100);
/// assert!(pop.agents[0].locked);
/// assert!(!pop.agents[99].locked);
/// ```
pub struct PopulationBuilder {
    count:    usize,
    width:    f64,
    height:   f64,
    lockdown: f64,
    config:   PlacementConfig,
}

impl PopulationBuilder {
    /// Place up to `count` agents in a `width × height` arena.
    pub fn new(count: usize, width: f64, height: f64) -> Self {
        Self {
            count,
            width,
            height,
            lockdown: 0.0,
            config: PlacementConfig::default(),
        }
    }

    /// Fraction of slots (lowest indices first) that start locked.
    pub fn lockdown(mut self, fraction: f64) -> Self {
        self.lockdown = fraction;
        self
    }

    pub fn config(mut self, config: PlacementConfig) -> Self {
        self.config = config;
        self
    }

    /// Run rejection sampling and draw velocities.
    ///
    /// Slot `i` is locked iff `i < count · lockdown`, computed against the
    /// *requested* count.  Unlocked agents draw `(vx, vy)` uniformly in
    /// `[−max_speed, max_speed]²` right after their position is accepted.
    pub fn build(self, rng: &mut SimRng) -> Population {
        let cfg = &self.config;
        if self.count == 0 {
            return Population {
                agents: Vec::new(),
                requested: 0,
                radius: cfg.radius.unwrap_or(0.0),
                max_speed: 0.0,
            };
        }

        let r = cfg
            .radius
            .unwrap_or_else(|| cfg.radius_factor * (self.width * self.height / self.count as f64).sqrt());
        let max_speed = cfg.speed_factor * r;

        let (x0, y0) = (2.0 * r, 2.0 * r);
        let (x1, y1) = (self.width - x0, self.height - y0);
        let d2_min = (cfg.spacing_factor * r).powi(2);
        let locked_below = self.count as f64 * self.lockdown;

        let mut agents: Vec<Agent> = Vec::with_capacity(self.count);
        if x1 < x0 || y1 < y0 {
            log::warn!(
                "arena {}x{} cannot hold discs of radius {r:.4}; population is empty",
                self.width, self.height,
            );
            return Population { agents, requested: self.count, radius: r, max_speed };
        }

        for i in 0..self.count {
            let Some(pos) = sample_position(&agents, (x0, x1), (y0, y1), d2_min, cfg.attempts, rng) else {
                break;
            };

            let id = AgentId(i as u32);
            let mut agent = Agent::new(id, pos, r);
            if (i as f64) < locked_below {
                agent.lock();
            } else {
                agent.vel = random_velocity(max_speed, rng);
            }
            agents.push(agent);
        }

        if agents.len() < self.count {
            log::warn!(
                "placed {} of {} agents: slot {} found no free position in {} attempts",
                agents.len(),
                self.count,
                agents.len(),
                cfg.attempts,
            );
        }

        Population { agents, requested: self.count, radius: r, max_speed }
    }
}

/// Try up to `attempts` positions; return the first far enough from `placed`.
fn sample_position(
    placed:   &[Agent],
    xs:       (f64, f64),
    ys:       (f64, f64),
    d2_min:   f64,
    attempts: u32,
    rng:      &mut SimRng,
) -> Option<Vec2> {
    for _ in 0..attempts {
        let x = rng.uniform(xs.0, xs.1);
        let y = rng.uniform(ys.0, ys.1);
        let candidate = Vec2::new(x, y);
        if placed.iter().all(|other| (other.pos - candidate).norm2() >= d2_min) {
            return Some(candidate);
        }
    }
    None
}

/// A velocity drawn uniformly from `[−max_speed, max_speed]²`.
pub fn random_velocity(max_speed: f64, rng: &mut SimRng) -> Vec2 {
    let vx = rng.symmetric(max_speed);
    let vy = rng.symmetric(max_speed);
    Vec2::new(vx, vy)
}

/// The agent whose centre is nearest `center` (first one wins ties), or
/// `None` for an empty population.
pub fn patient_zero(agents: &[Agent], center: Vec2) -> Option<AgentId> {
    let mut best: Option<(AgentId, f64)> = None;
    for agent in agents {
        let d2 = (agent.pos - center).norm2();
        match best {
            Some((_, best_d2)) if d2 >= best_d2 => {}
            _ => best = Some((agent.id, d2)),
        }
    }
    best.map(|(id, _)| id)
}
