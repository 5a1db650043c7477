//! Unit tests for sd-schedule.

#[cfg(test)]
mod wheel {
    use sd_core::{ComponentId, Tick};

    use crate::{TimerEntry, TimerWheel};

    fn entry(c: u32, lane: u16, generation: u32) -> TimerEntry {
        TimerEntry { component: ComponentId(c), lane, generation }
    }

    #[test]
    fn drain_returns_due_entries_in_order() {
        let mut wheel = TimerWheel::new();
        wheel.push(Tick(5), entry(3, 0, 1));
        wheel.push(Tick(5), entry(1, 0, 1));
        wheel.push(Tick(2), entry(9, 0, 1));
        wheel.push(Tick(8), entry(0, 0, 1));
        assert_eq!(wheel.len(), 4);
        assert_eq!(wheel.next_tick(), Some(Tick(2)));

        let due = wheel.drain_due(Tick(5));
        let order: Vec<_> = due.iter().map(|(t, e)| (t.0, e.component.0)).collect();
        assert_eq!(order, vec![(2, 9), (5, 1), (5, 3)]);
        assert_eq!(wheel.len(), 1);
        assert_eq!(wheel.tick_count(), 1);
    }

    #[test]
    fn drain_of_empty_tick_is_empty() {
        let mut wheel = TimerWheel::new();
        wheel.push(Tick(10), entry(0, 0, 1));
        assert!(wheel.drain_due(Tick(9)).is_empty());
        assert_eq!(wheel.len(), 1);
    }

    #[test]
    fn lanes_sort_within_component() {
        let mut wheel = TimerWheel::new();
        wheel.push(Tick(1), entry(4, 2, 1));
        wheel.push(Tick(1), entry(4, 0, 1));
        let lanes: Vec<u16> = wheel.drain_due(Tick(1)).iter().map(|(_, e)| e.lane).collect();
        assert_eq!(lanes, vec![0, 2]);
    }

    #[test]
    fn purge_removes_only_that_component() {
        let mut wheel = TimerWheel::new();
        wheel.push(Tick(1), entry(1, 0, 1));
        wheel.push(Tick(2), entry(1, 1, 1));
        wheel.push(Tick(2), entry(2, 0, 1));
        assert_eq!(wheel.purge(ComponentId(1)), 2);
        assert_eq!(wheel.len(), 1);
        assert_eq!(wheel.next_tick(), Some(Tick(2)));
        assert!(!wheel.is_empty());
    }
}

#[cfg(test)]
mod slot {
    use crate::TimerSlot;

    #[test]
    fn cancel_invalidates_pending_generation() {
        let mut slot = TimerSlot::default();
        assert!(!slot.is_armed());
        let g = slot.arm();
        assert!(slot.is_current(g));
        slot.cancel();
        assert!(!slot.is_current(g));
        assert!(!slot.is_armed());
    }

    #[test]
    fn rearm_starts_a_new_generation() {
        let mut slot = TimerSlot::default();
        let g1 = slot.arm();
        slot.cancel();
        let g2 = slot.arm();
        assert_ne!(g1, g2);
        assert!(slot.is_current(g2));
        assert!(!slot.is_current(g1));
    }

    #[test]
    fn disarm_keeps_generation() {
        let mut slot = TimerSlot::default();
        let g = slot.arm();
        slot.disarm();
        assert_eq!(slot.generation(), g);
        assert!(!slot.is_current(g));
    }
}

#[cfg(test)]
mod period {
    use sd_core::{ComponentId, ComponentRng, SimClock};

    use crate::Period;

    #[test]
    fn fixed_period_is_exact() {
        let clock = SimClock::new(100);
        let mut rng = ComponentRng::new(1, ComponentId(0));
        let p = Period::fixed(1.5);
        assert_eq!(p.sample_ticks(&clock, &mut rng), 15);
    }

    #[test]
    fn jitter_stays_in_range() {
        let clock = SimClock::new(100);
        let mut rng = ComponentRng::new(1, ComponentId(0));
        let p = Period::new(1.0, 0.5);
        for _ in 0..100 {
            let secs = p.sample_secs(&mut rng);
            assert!((1.0..=1.5).contains(&secs));
            let ticks = p.sample_ticks(&clock, &mut rng);
            assert!((10..=15).contains(&ticks));
        }
    }

    #[test]
    fn zero_period_waits_one_tick() {
        let clock = SimClock::new(20);
        let mut rng = ComponentRng::new(1, ComponentId(0));
        assert_eq!(Period::default().sample_ticks(&clock, &mut rng), 1);
    }
}
