//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR ((agent_id + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.  The
//! `+ 1` keeps agent 0 off the stream [`SimRng::new`] produces for the same
//! global seed.
//!
//! Epidemic draws (infection on contact, recovery vs. death) come from the
//! agent's own stream, so the outcome for an agent depends only on the
//! sequence of things that happened *to that agent*, not on the order in
//! which the simulator visited the whole population.  Placement and fresh
//! velocities come from the single [`SimRng`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    ///
    /// `p = 0` never succeeds and `p = 1` always does, which the boundary
    /// behaviour of the epidemic rules depends on.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Build one [`AgentRng`] per agent, indexed by `AgentId`.
pub fn agent_rngs(count: usize, global_seed: u64) -> Vec<AgentRng> {
    (0..count as u32)
        .map(|i| AgentRng::new(global_seed, AgentId(i)))
        .collect()
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (placement, velocity draws).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// Uniform `f64` in `[lo, hi)`.  Callers guarantee `lo <= hi`.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// Uniform `f64` in `[-max, max)`.
    #[inline]
    pub fn symmetric(&mut self, max: f64) -> f64 {
        2.0 * (self.unit() - 0.5) * max
    }
}
