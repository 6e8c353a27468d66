//! `ob-epidemic`: how contacts and elapsed time change agent health.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`context`]    | `DiseaseContext<'a>`: time and parameters for one callback |
//! | [`model`]      | `DiseaseModel` trait                                        |
//! | [`sird`]       | `Sird`: susceptible / infected / recovered / dead rules    |
//! | [`transition`] | `Transition` record returned by every state change          |
//! | [`apply`]      | `contact_pair`, `advance_infections`: population-level drivers |
//!
//! # Design notes
//!
//! The simulator calls into a `DiseaseModel` at exactly two points:
//!
//! 1. **Contact**: after a pair collision is resolved, once per ordering
//!    (`a` on `b`, then `b` on `a`).
//! 2. **Elapsed time**: at the end of every `step`, once per agent, with the
//!    step's full `dt`.
//!
//! Every random draw uses the affected agent's own `AgentRng`.

pub mod apply;
pub mod context;
pub mod model;
pub mod sird;
pub mod transition;


pub use apply::{advance_infections, contact_pair};
pub use context::DiseaseContext;
pub use model::DiseaseModel;
pub use sird::Sird;
pub use transition::Transition;
