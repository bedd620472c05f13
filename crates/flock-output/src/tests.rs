//! Integration tests for flock-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{AgentSnapshotRow, OctantCountRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            tick,
            agent_id,
            visual_id: agent_id as u64 + 100,
            position:  [agent_id as f32, -1.5, 0.25],
            velocity:  [0.0, 1.0, 0.0],
        }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("octant_counts.csv").exists());
        assert!(dir.path().join("agent_snapshots.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("octant_counts.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("octant_counts.csv")),
            [
                "tick",
                "population",
                "left-down-back",
                "right-down-back",
                "left-top-back",
                "left-down-forward",
                "right-top-back",
                "right-down-forward",
                "left-top-forward",
                "right-top-forward",
            ]
        );
        assert_eq!(
            headers(dir.path().join("agent_snapshots.csv")),
            ["tick", "agent_id", "visual_id", "x", "y", "z", "vx", "vy", "vz"]
        );
    }

    #[test]
    fn csv_octant_row_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = OctantCountRow { tick: 4, population: 10, counts: [1, 2, 0, 0, 3, 0, 0, 4] };
        w.write_octant_counts(&row).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("octant_counts.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let fields: Vec<&str> = rows[0].iter().collect();
        assert_eq!(fields, ["4", "10", "1", "2", "0", "0", "3", "0", "0", "4"]);
    }

    #[test]
    fn csv_snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "5");   // tick
        assert_eq!(&rows[1][1], "1");   // agent_id
        assert_eq!(&rows[2][2], "102"); // visual_id
        assert_eq!(rows[2][3].parse::<f32>().unwrap(), 2.0);
        assert_eq!(rows[2][4].parse::<f32>().unwrap(), -1.5);
        assert_eq!(rows[2][7].parse::<f32>().unwrap(), 1.0);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use flock_core::FlockConfig;
    use flock_sim::{PopulationCommand, SimBuilder};
    use tempfile::TempDir;

    use crate::{CsvWriter, SimOutputObserver};

    fn config(total_ticks: u64, output_interval_ticks: u64) -> FlockConfig {
        FlockConfig {
            initial_population: 3,
            seed: 1,
            total_ticks,
            num_threads: Some(1),
            output_interval_ticks,
            ..FlockConfig::default()
        }
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn run_writes_both_files() {
        let mut sim = SimBuilder::new(config(6, 2)).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // One octant row per tick.
        let octants = records(&dir, "octant_counts.csv");
        assert_eq!(octants.len(), 6);
        assert_eq!(&octants[5][0], "5");
        assert_eq!(&octants[5][1], "3");

        // output_interval = 2 → snapshots at ticks 0, 2, 4 (3 ticks × 3 agents).
        let snapshots = records(&dir, "agent_snapshots.csv");
        assert_eq!(snapshots.len(), 9);
        assert_eq!(&snapshots[3][0], "2");
        assert_eq!(&snapshots[3][1], "0");
    }

    #[test]
    fn snapshots_follow_population_changes() {
        let mut sim = SimBuilder::new(config(2, 1)).build().unwrap();
        sim.request(PopulationCommand::AddAgent);

        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        // The add lands at the end of tick 0: 3 agents in its snapshot, 4 in tick 1's.
        let snapshots = records(&dir, "agent_snapshots.csv");
        assert_eq!(snapshots.len(), 7);
        assert_eq!(&snapshots[2][0], "0");
        assert_eq!(&snapshots[3][0], "1");
        assert_eq!(&snapshots[6][2], "3"); // the new agent's visual handle

        // Both files agree on the population of every tick.
        let octants = records(&dir, "octant_counts.csv");
        assert_eq!(&octants[0][1], "3");
        assert_eq!(&octants[1][1], "4");
    }
}
