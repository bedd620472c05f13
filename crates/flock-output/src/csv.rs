//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `octant_counts.csv`
//! - `agent_snapshots.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;
use flock_stage::Octant;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OctantCountRow, OutputResult};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    octants:   Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut octants = Writer::from_path(dir.join("octant_counts.csv"))?;
        let mut header = vec!["tick".to_owned(), "population".to_owned()];
        header.extend(Octant::ALL.iter().map(|o| o.label().to_owned()));
        octants.write_record(&header)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "tick", "agent_id", "visual_id", "x", "y", "z", "vx", "vy", "vz",
        ])?;

        Ok(Self { octants, snapshots, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let [x, y, z] = row.position;
            let [vx, vy, vz] = row.velocity;
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.visual_id.to_string(),
                x.to_string(),
                y.to_string(),
                z.to_string(),
                vx.to_string(),
                vy.to_string(),
                vz.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_octant_counts(&mut self, row: &OctantCountRow) -> OutputResult<()> {
        let mut record = Vec::with_capacity(10);
        record.push(row.tick.to_string());
        record.push(row.population.to_string());
        record.extend(row.counts.iter().map(u32::to_string));
        self.octants.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.octants.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
