//! `ob-event`: the geometric event machinery behind the simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`event`]     | `Event` (`Wall` / `Pair`), `Wall`, `Bounds`               |
//! | [`predict`]   | `predict_wall`, `predict_pair`: analytic next-contact times |
//! | [`queue`]     | `EventQueue` (`BinaryHeap` + per-agent epochs)            |
//! | [`resolve`]   | `resolve`, `Resolved`: elastic reflection along the normal |
//! | [`error`]     | `EventError`, `EventResult<T>`                            |
//!
//! # Event lifecycle (summary)
//!
//! ```text
//! predict_*(agent, now)  →  queue.insert(event)       stamped with agent epochs
//! queue.pop_min()        →  resolve(event, agents)    reflects 1 or 2 agents
//! queue.invalidate(R)    →  epochs of R bumped        older events now stale
//! predict_*(R, t)        →  queue.insert(..)          fresh events for R
//! ```
//!
//! Stale entries stay in the heap until they surface at the top, where
//! `peek_min` / `pop_min` discard them.

pub mod error;
pub mod event;
pub mod predict;
pub mod queue;
pub mod resolve;

#[cfg(test)]
mod tests;

pub use error::{EventError, EventResult};
pub use event::{Bounds, Event, Wall};
pub use predict::{CONTACT_RESIDUAL_TOLERANCE, OVERLAP_TOLERANCE_SECS, predict_pair, predict_wall};
pub use queue::EventQueue;
pub use resolve::{Resolved, resolve};
