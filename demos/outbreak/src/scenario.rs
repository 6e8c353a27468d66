//! JSON scenario files.
//!
//! Every section and every field is optional:
//!
//! ```json
//! {
//!   "params":    { "contagiousness": 0.8, "lockdown": 0.25 },
//!   "run":       { "population": 300, "total_time": 90.0 },
//!   "placement": { "attempts": 40 }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use ob_agent::PlacementConfig;
use ob_core::{Params, RunConfig};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub params:    Params,
    pub run:       RunConfig,
    pub placement: PlacementConfig,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let scenario: Scenario = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate().context("invalid params")?;
        self.run.validate().context("invalid run config")?;
        Ok(())
    }
}
