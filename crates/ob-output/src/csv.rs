//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tally.csv`: `time,day,susceptible,infected,recovered,dead`
//! - `agents.csv`: `time,agent_id,x,y,radius,state`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentRow, OutputResult, TallyRow};

pub const TALLY_FILE: &str = "tally.csv";
pub const AGENTS_FILE: &str = "agents.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    tally:    Writer<File>,
    agents:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut tally = Writer::from_path(dir.join(TALLY_FILE))?;
        tally.write_record(["time", "day", "susceptible", "infected", "recovered", "dead"])?;

        let mut agents = Writer::from_path(dir.join(AGENTS_FILE))?;
        agents.write_record(["time", "agent_id", "x", "y", "radius", "state"])?;

        Ok(Self { tally, agents, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agents(&mut self, rows: &[AgentRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.time.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.radius.to_string(),
                row.state.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tally(&mut self, row: &TallyRow) -> OutputResult<()> {
        self.tally.write_record(&[
            row.time.to_string(),
            row.day.to_string(),
            row.susceptible.to_string(),
            row.infected.to_string(),
            row.recovered.to_string(),
            row.dead.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.tally.flush()?;
        self.agents.flush()?;
        Ok(())
    }
}
