//! `ob-output`: simulation output writers for the rust_outbreak simulator.
//!
//! | Backend | Files created                 |
//! |---------|-------------------------------|
//! | CSV     | `tally.csv`, `agents.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ob_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use ob_core::RunConfig;
//! use ob_output::{CsvWriter, SimOutputObserver};
//! use ob_sim::SimBuilder;
//!
//! let config = RunConfig { snapshot_interval_steps: 20, ..RunConfig::default() };
//! let mut sim = SimBuilder::new().run_config(&config).build().unwrap();
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&config, &mut obs).unwrap();
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentRow, TallyRow};
pub use writer::OutputWriter;
