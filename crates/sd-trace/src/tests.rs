//! Unit tests for sd-trace.

#[cfg(test)]
mod csv_writer {
    use tempfile::TempDir;

    use crate::csv::{CsvTraceWriter, DELIVERY_HEADERS, SUMMARY_HEADERS};
    use crate::row::{DeliveryRow, TickSummaryRow};
    use crate::writer::TraceWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(headers(&dir.path().join("deliveries.csv")), DELIVERY_HEADERS);
        assert_eq!(headers(&dir.path().join("tick_summaries.csv")), SUMMARY_HEADERS);
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("first");
        CsvTraceWriter::new(&nested).unwrap();
        assert!(nested.join("deliveries.csv").exists());
    }

    #[test]
    fn timer_deliveries_have_an_empty_stimulus() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        let row = DeliveryRow {
            tick:       12,
            elapsed_ms: 1200,
            entity:     3,
            component:  7,
            kind:       "Input Periodic Activation",
            stimulus:   String::new(),
            channel:    "periodic",
        };
        w.write_deliveries(&[row]).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:             12,
            elapsed_ms:       1200,
            timers_fired:     1,
            overlap_events:   0,
            deliveries:       1,
            commands_applied: 0,
            particles_alive:  0,
        })
        .unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("deliveries.csv")).unwrap();
        let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][4], "Input Periodic Activation");
        assert_eq!(&records[0][5], "");
        assert_eq!(&records[0][6], "periodic");
    }
}

#[cfg(test)]
mod observer {
    use sd_core::{SimConfig, Vec3};
    use sd_sense::{DirectInput, HandlerSet, Sense, StimulusBindings, VisionInput};
    use tempfile::TempDir;

    use sd_sim::{Sim, SimBuilder, WorldConfig};

    use crate::{CsvTraceWriter, DeliveryRow, TickSummaryRow, TraceObserver, TraceResult, TraceWriter};

    /// Keeps rows in memory.
    #[derive(Default)]
    struct Memory {
        deliveries: Vec<DeliveryRow>,
        summaries:  Vec<TickSummaryRow>,
        finished:   usize,
    }

    impl TraceWriter for Memory {
        fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> TraceResult<()> {
            self.deliveries.extend_from_slice(rows);
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> TraceResult<()> {
            self.summaries.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> TraceResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Fails every write.
    struct Broken;

    impl TraceWriter for Broken {
        fn write_deliveries(&mut self, _rows: &[DeliveryRow]) -> TraceResult<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> TraceResult<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn finish(&mut self) -> TraceResult<()> {
            Ok(())
        }
    }

    fn sim(total_ticks: u64, trace_interval_ticks: u64) -> Sim {
        let sim_config = SimConfig {
            tick_duration_ms: 100,
            total_ticks,
            trace_interval_ticks,
            ..SimConfig::default()
        };
        SimBuilder::new(WorldConfig::default()).sim_config(sim_config).build().unwrap()
    }

    /// A watcher staring at a beacon: one vision delivery per tick.
    fn staring(sim: &mut Sim) {
        use sd_geometry::Shape;
        use sd_sense::{PresenceOutput, TriggerMode};

        let root = sim.world.root();
        let beacon = sim.world.add_unit(root, "Beacon").unwrap();
        sim.world.set_position(beacon, Vec3::new(1.0, 0.0, 0.0));
        sim.world
            .attach(beacon, Sense::Presence(PresenceOutput::new("Light", Shape::sphere(0.5))))
            .unwrap();
        let watcher = sim.world.add_unit(root, "Watcher").unwrap();
        let vision = VisionInput::new(TriggerMode::Stay, Shape::sphere(1.0)).listen("Light", HandlerSet::new());
        sim.world.attach(watcher, Sense::Vision(vision)).unwrap();
    }

    #[test]
    fn summaries_follow_the_interval() {
        let mut sim = sim(10, 4);
        let cfg = sim.world.config.sim.clone();
        let mut obs = TraceObserver::new(Memory::default(), &cfg);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let memory = obs.into_writer();
        let ticks: Vec<u64> = memory.summaries.iter().map(|r| r.tick).collect();
        assert_eq!(ticks, [0, 4, 8]);
        assert_eq!(memory.summaries[1].elapsed_ms, 400);
        assert_eq!(memory.finished, 1);
    }

    #[test]
    fn zero_interval_disables_summaries() {
        let mut sim = sim(5, 0);
        let cfg = sim.world.config.sim.clone();
        let mut obs = TraceObserver::new(Memory::default(), &cfg);
        sim.run(&mut obs).unwrap();
        assert!(obs.into_writer().summaries.is_empty());
    }

    #[test]
    fn every_delivery_becomes_a_row() {
        let mut sim = sim(3, 1);
        staring(&mut sim);
        let cfg = sim.world.config.sim.clone();
        let mut obs = TraceObserver::new(Memory::default(), &cfg);
        sim.run(&mut obs).unwrap();

        let memory = obs.into_writer();
        assert_eq!(memory.deliveries.len(), 3);
        let row = &memory.deliveries[2];
        assert_eq!(row.tick, 2);
        assert_eq!(row.elapsed_ms, 200);
        assert_eq!(row.kind, "Input Vision Stay");
        assert_eq!(row.stimulus, "Light");
        assert_eq!(row.channel, "vision");
        assert!(memory.summaries.iter().all(|s| s.deliveries == 1));
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = sim(5, 1);
        let cfg = sim.world.config.sim.clone();
        let mut obs = TraceObserver::new(Broken, &cfg);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_some());
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn csv_trace_of_a_direct_delivery() {
        let dir: TempDir = tempfile::tempdir().expect("create temp dir");
        let mut sim = sim(2, 1);
        let deer = sim.world.add_unit(sim.world.root(), "Deer").unwrap();
        let bindings = StimulusBindings::new().listen("Food", HandlerSet::new());
        sim.world.attach(deer, Sense::DirectInput(DirectInput::new(bindings))).unwrap();
        assert!(sim.world.send_direct(deer, "Food"));

        let cfg = sim.world.config.sim.clone();
        let mut obs = TraceObserver::new(CsvTraceWriter::new(dir.path()).unwrap(), &cfg);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("deliveries.csv")).unwrap();
        let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][2], deer.0.to_string().as_str());
        assert_eq!(&records[0][5], "Food");
        assert_eq!(&records[0][6], "direct");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 2);
    }
}
