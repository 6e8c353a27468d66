//! `ob-sim`: event-driven step loop for the rust_outbreak arena simulator.
//!
//! # The step loop
//!
//! ```text
//! step(dt):
//!   target = current_time + dt
//!   while the earliest live event e has e.t <= target:
//!     ① Drift   : every agent moves by e.t − old_time.
//!     ② Resolve : reflect the agent (wall) or both agents (pair).
//!     ③ Evict   : every pending event of a reflected agent goes stale.
//!     ④ Predict : new wall + pair events for the reflected agents.
//!     ⑤ Contact : for a pair, the disease model sees both orderings.
//!     old_time = e.t
//!   Drift the remainder up to target.
//!   ⑥ Elapsed  : the disease model sees every agent with the full dt.
//!   ⑦ Deaths   : agents that died are stopped and re-predicted.
//! ```
//!
//! An event dated at or before `old_time` is a hard error, except for a tie
//! with another contact at `old_time` that shares no agent with it.  So are a
//! missed overlap and too many events in one step: the step returns it and the simulator refuses
//! further steps until `create_population`, `set_agents` or `start`.
//!
//! # Quick-start
//!
//! ```rust
//! use ob_core::RunConfig;
//! use ob_sim::{NoopObserver, SimBuilder};
//!
//! let config = RunConfig { population: 100, total_time: 5.0, ..RunConfig::default() };
//! let mut sim = SimBuilder::new().run_config(&config).build()?;
//! sim.run(&config, &mut NoopObserver)?;
//! assert_eq!(sim.tally().total(), sim.agent_count());
//! # Ok::<(), ob_sim::SimError>(())
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{DEFAULT_SEED, Simulator};
pub use snapshot::{AgentView, Snapshot, Tally};
