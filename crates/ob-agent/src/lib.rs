//! `ob-agent`: the moving discs and how they are placed in the arena.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`state`]       | `HealthState` (`Susceptible`, `Infected`, `Recovered`, `Dead`) |
//! | [`agent`]       | `Agent` and its geometric primitives (`advance`, `reflect`, `dist2`) |
//! | [`population`]  | `PopulationBuilder`, `PlacementConfig`, `patient_zero`     |
//!
//! Agents are stored array-of-structs: a population is a few hundred discs and
//! every event touches whole agents (position, velocity, and state together).

pub mod agent;
pub mod population;
pub mod state;


pub use agent::Agent;
pub use population::{PlacementConfig, Population, PopulationBuilder, patient_zero, random_velocity};
pub use state::HealthState;
