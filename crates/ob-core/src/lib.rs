//! `ob-core`: foundational types for the `rust_outbreak` arena simulator.
//!
//! This crate is a dependency of every other `ob-*` crate.  It has no `ob-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geometry`]    | `Vec2` (2-D vector arithmetic)                        |
//! | [`params`]      | `Params` (epidemic + arena knobs), `RunConfig`        |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `ParamError`, `ParamResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `Params` and `RunConfig`. |

pub mod error;
pub mod geometry;
pub mod ids;
pub mod params;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ParamError, ParamResult};
pub use geometry::Vec2;
pub use ids::AgentId;
pub use params::{Params, RunConfig};
pub use rng::{AgentRng, SimRng};
