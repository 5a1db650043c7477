//! Unit tests for sd-geometry.

#[cfg(test)]
mod shape {
    use sd_core::Vec3;

    use crate::Shape;

    #[test]
    fn collapse_zeroes_every_kind() {
        let shapes = [
            Shape::sphere(2.0),
            Shape::capsule(0.5, 2.0),
            Shape::cuboid(Vec3::new(1.0, 2.0, 3.0)),
            Shape::mesh(Vec3::ONE),
        ];
        for shape in shapes {
            assert!(!shape.is_degenerate(), "{shape:?}");
            assert!(shape.collapsed().is_degenerate(), "{shape:?}");
        }
    }

    #[test]
    fn capsule_core_never_negative() {
        let squat = Shape::capsule(1.0, 1.0);
        assert_eq!(squat.core_half_extents(), Vec3::ZERO);
        let tall = Shape::capsule(0.5, 3.0);
        assert_eq!(tall.core_half_extents(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tall.bounding_half_extents(), Vec3::new(0.5, 1.5, 0.5));
    }

    #[test]
    fn mesh_extent_follows_scale() {
        let shape = Shape::Mesh { bounds: Vec3::new(2.0, 4.0, 2.0), scale: 0.5 };
        assert_eq!(shape.core_half_extents(), Vec3::new(0.5, 1.0, 0.5));
    }

    #[test]
    fn validate_rejects_negative_dimensions() {
        assert!(Shape::sphere(1.0).validate().is_ok());
        assert!(Shape::sphere(-1.0).validate().is_err());
        assert!(Shape::cuboid(Vec3::new(1.0, f32::NAN, 1.0)).validate().is_err());
    }
}

#[cfg(test)]
mod collapse {
    use crate::{Shape, VolumeCollapse};

    #[test]
    fn collapse_then_restore() {
        let mut shape = Shape::capsule(0.5, 2.0);
        let mut hook = VolumeCollapse::default();
        assert!(hook.collapse(&mut shape));
        assert!(hook.is_collapsed());
        assert!(shape.is_degenerate());
        // A second collapse must not overwrite the saved extent.
        assert!(!hook.collapse(&mut shape));
        assert!(hook.restore(&mut shape));
        assert_eq!(shape, Shape::capsule(0.5, 2.0));
        assert!(!hook.restore(&mut shape));
    }
}

#[cfg(test)]
mod volume_set {
    use sd_core::{ComponentId, Vec3, VolumeId};

    use crate::{Shape, Volume, VolumeOwner, VolumeSet};

    #[test]
    fn removed_ids_never_resolve() {
        let mut set = VolumeSet::new();
        let owner = VolumeOwner::Component(ComponentId(0));
        let a = set.insert(Volume::new(owner, Vec3::ZERO, Shape::sphere(1.0)));
        assert!(set.remove(a).is_ok());
        let b = set.insert(Volume::new(owner, Vec3::ZERO, Shape::sphere(1.0)));
        assert_ne!(a, b);
        assert!(set.get(a).is_none());
        assert!(set.remove(a).is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut set = VolumeSet::new();
        let owner = VolumeOwner::Component(ComponentId(0));
        for _ in 0..1_000 {
            let id = set.insert(Volume::new(owner, Vec3::ZERO, Shape::sphere(1.0)));
            assert!(set.remove(id).is_ok());
        }
        assert!(set.is_empty());
        assert!(set.capacity() < 8, "capacity grew to {}", set.capacity());
    }

    #[test]
    fn set_enabled_reports_changes() {
        let mut set = VolumeSet::new();
        let id = set.insert(Volume::new(
            VolumeOwner::Component(ComponentId(1)),
            Vec3::ZERO,
            Shape::sphere(1.0),
        ));
        assert!(!set.set_enabled(id, true));
        assert!(set.set_enabled(id, false));
        assert!(!set.set_enabled(VolumeId::default(), false));
    }

    #[test]
    fn authored_shape_survives_collapse() {
        let mut v = Volume::new(
            VolumeOwner::Component(ComponentId(0)),
            Vec3::ZERO,
            Shape::sphere(3.0),
        );
        v.collapse();
        assert!(!v.is_live());
        assert_eq!(v.authored_shape(), Shape::sphere(3.0));
        v.restore();
        assert!(v.is_live());
    }
}

#[cfg(test)]
mod sweep {
    use slotmap::SlotMap;

    use sd_core::{ComponentId, ParticleId, Vec3, VolumeId};

    use crate::overlap::volumes_overlap;
    use crate::{OverlapDetector, OverlapPhase, Shape, SweepDetector, Volume, VolumeOwner, VolumeSet};

    fn comp(i: u32) -> VolumeOwner {
        VolumeOwner::Component(ComponentId(i))
    }

    fn phases_for(events: &[crate::OverlapEvent], observer: VolumeId) -> Vec<OverlapPhase> {
        events.iter().filter(|e| e.observer == observer).map(|e| e.phase).collect()
    }

    #[test]
    fn narrow_phase_shapes() {
        let s = Volume::new(comp(0), Vec3::ZERO, Shape::sphere(1.0));
        let near = Volume::new(comp(1), Vec3::new(1.9, 0.0, 0.0), Shape::sphere(1.0));
        let far = Volume::new(comp(2), Vec3::new(2.1, 0.0, 0.0), Shape::sphere(1.0));
        assert!(volumes_overlap(&s, &near));
        assert!(!volumes_overlap(&s, &far));

        let cap = Volume::new(comp(3), Vec3::new(0.0, 2.5, 0.0), Shape::capsule(0.5, 3.0));
        // Capsule core spans y ∈ [1.5, 3.5], so its lower tip touches the sphere at y = 1.
        assert!(volumes_overlap(&s, &cap));

        let cube = Volume::new(comp(4), Vec3::new(1.5, 1.5, 0.0), Shape::cuboid(Vec3::ONE));
        // Nearest box corner (1, 1, 0) is √2 away from the sphere center.
        assert!(!volumes_overlap(&s, &cube));
    }

    #[test]
    fn enter_stay_exit_sequence() {
        let mut set = VolumeSet::new();
        let a = set.insert(Volume::new(comp(0), Vec3::ZERO, Shape::sphere(1.0)));
        let b = set.insert(Volume::new(comp(1), Vec3::new(5.0, 0.0, 0.0), Shape::sphere(1.0)));
        let mut det = SweepDetector::new();

        assert!(det.detect(&set).is_empty());

        set.set_center(b, Vec3::new(1.5, 0.0, 0.0));
        let ev = det.detect(&set);
        assert_eq!(phases_for(&ev, a), vec![OverlapPhase::Enter]);
        assert_eq!(phases_for(&ev, b), vec![OverlapPhase::Enter]);
        assert_eq!(det.contact_count(), 1);

        let ev = det.detect(&set);
        assert_eq!(phases_for(&ev, a), vec![OverlapPhase::Stay]);

        set.set_center(b, Vec3::new(5.0, 0.0, 0.0));
        let ev = det.detect(&set);
        assert_eq!(phases_for(&ev, a), vec![OverlapPhase::Exit]);
        assert_eq!(phases_for(&ev, b), vec![OverlapPhase::Exit]);
        assert_eq!(det.contact_count(), 0);
    }

    #[test]
    fn reenabling_a_touching_volume_is_not_a_new_enter() {
        let mut set = VolumeSet::new();
        let a = set.insert(Volume::new(comp(0), Vec3::ZERO, Shape::sphere(1.0)));
        let b = set.insert(Volume::new(comp(1), Vec3::ZERO, Shape::sphere(1.0)));
        let mut det = SweepDetector::new();
        assert_eq!(phases_for(&det.detect(&set), a), vec![OverlapPhase::Enter]);

        set.set_enabled(a, false);
        assert!(det.detect(&set).is_empty());
        assert!(det.detect(&set).is_empty());
        assert_eq!(det.contact_count(), 1);

        set.set_enabled(a, true);
        let ev = det.detect(&set);
        assert_eq!(phases_for(&ev, a), vec![OverlapPhase::Stay]);
        assert_eq!(phases_for(&ev, b), vec![OverlapPhase::Stay]);
    }

    #[test]
    fn separation_while_disabled_exits_on_reenable() {
        let mut set = VolumeSet::new();
        let a = set.insert(Volume::new(comp(0), Vec3::ZERO, Shape::sphere(1.0)));
        let b = set.insert(Volume::new(comp(1), Vec3::ZERO, Shape::sphere(1.0)));
        let mut det = SweepDetector::new();
        det.detect(&set);

        set.set_enabled(a, false);
        set.set_center(b, Vec3::new(10.0, 0.0, 0.0));
        assert!(det.detect(&set).is_empty());

        set.set_enabled(a, true);
        let ev = det.detect(&set);
        assert_eq!(phases_for(&ev, a), vec![OverlapPhase::Exit]);
        assert_eq!(phases_for(&ev, b), vec![OverlapPhase::Exit]);
        assert_eq!(det.contact_count(), 0);

        // The pair is fresh again once it touches.
        set.set_center(b, Vec3::ZERO);
        assert_eq!(phases_for(&det.detect(&set), a), vec![OverlapPhase::Enter]);
    }

    #[test]
    fn removing_a_suspended_volume_is_silent() {
        let mut set = VolumeSet::new();
        let a = set.insert(Volume::new(comp(0), Vec3::ZERO, Shape::sphere(1.0)));
        let b = set.insert(Volume::new(comp(1), Vec3::ZERO, Shape::sphere(1.0)));
        let mut det = SweepDetector::new();
        det.detect(&set);

        set.set_enabled(b, false);
        det.detect(&set);
        assert!(set.remove(b).is_ok());
        assert!(phases_for(&det.detect(&set), a).is_empty());
        assert_eq!(det.contact_count(), 0);
    }

    #[test]
    fn collapsing_produces_exactly_one_exit() {
        let mut set = VolumeSet::new();
        let a = set.insert(Volume::new(comp(0), Vec3::ZERO, Shape::sphere(1.0)));
        let b = set.insert(Volume::new(comp(1), Vec3::ZERO, Shape::cuboid(Vec3::ONE)));
        let mut det = SweepDetector::new();
        det.detect(&set);

        if let Some(v) = set.get_mut(b) {
            v.collapse();
        }
        let ev = det.detect(&set);
        assert_eq!(phases_for(&ev, a), vec![OverlapPhase::Exit]);

        if let Some(v) = set.get_mut(b) {
            v.restore();
            v.enabled = false;
        }
        assert!(det.detect(&set).is_empty());
    }

    #[test]
    fn particle_pairs_are_ignored() {
        let mut set = VolumeSet::new();
        let mut particles = SlotMap::<ParticleId, ()>::with_key();
        let mut p = || VolumeOwner::Particle(particles.insert(()));
        set.insert(Volume::new(p(), Vec3::ZERO, Shape::sphere(0.5)));
        set.insert(Volume::new(p(), Vec3::ZERO, Shape::sphere(0.5)));
        let mut det = SweepDetector::new();
        assert!(det.detect(&set).is_empty());

        set.insert(Volume::new(comp(0), Vec3::ZERO, Shape::sphere(2.0)));
        assert_eq!(det.detect(&set).len(), 4);
    }

    #[test]
    fn removed_volumes_are_forgotten() {
        let mut set = VolumeSet::new();
        let a = set.insert(Volume::new(comp(0), Vec3::ZERO, Shape::sphere(1.0)));
        let b = set.insert(Volume::new(comp(1), Vec3::ZERO, Shape::sphere(1.0)));
        let mut det = SweepDetector::new();
        det.detect(&set);
        assert!(set.remove(b).is_ok());
        det.forget(b);
        assert_eq!(det.contact_count(), 0);
        assert!(phases_for(&det.detect(&set), a).is_empty());
    }

    #[test]
    fn event_order_is_deterministic() {
        let build = || {
            let mut set = VolumeSet::new();
            for i in 0..6 {
                set.insert(Volume::new(
                    comp(i),
                    Vec3::new(i as f32 * 0.5, 0.0, 0.0),
                    Shape::sphere(1.0),
                ));
            }
            set
        };
        let a = SweepDetector::new().detect(&build());
        let b = SweepDetector::new().detect(&build());
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
