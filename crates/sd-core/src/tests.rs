//! Unit tests for sd-core primitives.

#[cfg(test)]
mod ids {
    use slotmap::{Key, SlotMap};

    use crate::{ComponentId, EntityId, ParticleId, VolumeId};

    #[test]
    fn index_roundtrip() {
        let id = EntityId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(EntityId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(EntityId::INVALID.0, u32::MAX);
        assert_eq!(ComponentId::INVALID.0, u32::MAX);
        assert!(ParticleId::default().is_null());
        assert!(VolumeId::null().is_null());
    }

    #[test]
    fn display() {
        assert_eq!(ComponentId(7).to_string(), "ComponentId(7)");
        let mut slots = SlotMap::<VolumeId, ()>::with_key();
        let id = slots.insert(());
        assert!(id.to_string().starts_with("VolumeId("));
    }

    #[test]
    fn reused_slot_gets_a_fresh_key() {
        let mut slots = SlotMap::<ParticleId, u8>::with_key();
        let old = slots.insert(1);
        slots.remove(old);
        let new = slots.insert(2);
        assert_ne!(old, new);
        assert!(slots.get(old).is_none());
        assert_eq!(slots.get(new), Some(&2));
    }
}

#[cfg(test)]
mod geo {
    use crate::Vec3;

    #[test]
    fn arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(b * 2.0, Vec3::ONE);
        assert_eq!(-b, Vec3::splat(-0.5));
    }

    #[test]
    fn distance_and_normalize() {
        let a = Vec3::new(3.0, 0.0, 4.0);
        assert!((a.length() - 5.0).abs() < 1e-6);
        assert!((a.normalized().length() - 1.0).abs() < 1e-6);
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        assert!((Vec3::ZERO.distance(a) - 5.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(100);
        assert_eq!(clock.elapsed_secs(), 0.0);
        for _ in 0..30 {
            clock.advance();
        }
        assert!((clock.elapsed_secs() - 3.0).abs() < 1e-9);
        assert!((clock.dt_secs() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn seconds_round_up_to_ticks_without_drift() {
        let clock = SimClock::new(100);
        assert_eq!(clock.ticks_for_secs(3.0), 30);
        assert_eq!(clock.ticks_for_secs(0.25), 3);
        assert_eq!(clock.ticks_for_secs(0.0), 0);
        assert_eq!(clock.ticks_for_secs(-1.0), 0);
        assert_eq!(clock.ticks_for_secs(f32::NAN), 0);
    }

    #[test]
    fn waits_are_at_least_one_tick() {
        let clock = SimClock::new(20);
        assert_eq!(clock.wait_ticks(0.0), 1);
        assert_eq!(clock.wait_ticks(0.001), 1);
        assert_eq!(clock.wait_ticks(1.0), 50);
    }

    #[test]
    fn zero_tick_duration_is_clamped() {
        let clock = SimClock::new(0);
        assert_eq!(clock.tick_duration_ms, 1);
    }

    #[test]
    fn config_end_tick() {
        let config = SimConfig { total_ticks: 12, ..SimConfig::default() };
        assert_eq!(config.end_tick(), Tick(12));
        assert_eq!(config.make_clock().tick_duration_ms, 20);
    }
}

#[cfg(test)]
mod rng {
    use crate::{ComponentId, ComponentRng, SimRng};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ComponentRng::new(7, ComponentId(3));
        let mut b = ComponentRng::new(7, ComponentId(3));
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_components_diverge() {
        let mut a = ComponentRng::new(7, ComponentId(3));
        let mut b = ComponentRng::new(7, ComponentId(4));
        let xs: Vec<u64> = (0..4).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn point_in_sphere_stays_inside() {
        let mut rng = ComponentRng::new(1, ComponentId(0));
        for _ in 0..200 {
            assert!(rng.point_in_sphere(2.0).length() <= 2.0 + 1e-5);
        }
        assert!(rng.point_in_sphere(0.0).is_zero());
    }

    #[test]
    fn up_to_bounds() {
        let mut rng = ComponentRng::new(1, ComponentId(0));
        for _ in 0..200 {
            let v = rng.up_to(0.5);
            assert!((0.0..=0.5).contains(&v));
        }
        assert_eq!(rng.up_to(0.0), 0.0);
    }

    #[test]
    fn sim_rng_children_are_deterministic() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        let x: u32 = a.child(1).gen_range(0..1000);
        let y: u32 = b.child(1).gen_range(0..1000);
        assert_eq!(x, y);
    }
}

#[cfg(test)]
mod stimulus {
    use crate::StimulusRegistry;

    #[test]
    fn tokens_are_unique_and_ordered() {
        let mut reg = StimulusRegistry::new();
        assert!(reg.add_stimulus("Food"));
        assert!(reg.add_stimulus("Danger"));
        assert!(!reg.add_stimulus("Food"));
        assert!(!reg.add_stimulus(""));
        assert_eq!(reg.values(), vec!["Food".to_owned(), "Danger".to_owned()]);
        assert_eq!(reg.index_of("Danger"), Some(1));
        assert_eq!(reg.value(0), Some("Food"));
    }

    #[test]
    fn validity() {
        let reg = StimulusRegistry::from_tokens(["Trail", "Trail", "", "Noise"]);
        assert_eq!(reg.len(), 2);
        assert!(reg.is_valid("Trail"));
        assert!(!reg.is_valid("trail"));
        assert!(!reg.is_valid(""));
    }
}
