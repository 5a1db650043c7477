//! Unit tests for sd-hierarchy.

#[cfg(test)]
mod construction {
    use crate::{EntityKind, Hierarchy, HierarchyError, ROOT_SYSTEM_ID, SMELL_SYSTEM_ID};

    #[test]
    fn new_has_root_and_smell() {
        let h = Hierarchy::new();
        assert_eq!(h.kind(h.root()), Some(EntityKind::Root));
        assert_eq!(h.kind(h.smell()), Some(EntityKind::Smell));
        assert_eq!(h.parent(h.smell()), Some(h.root()));
        assert_eq!(h.all_systems(), &[h.smell()]);
        assert_eq!(h.lookup_system(ROOT_SYSTEM_ID), Some(h.root()));
        assert_eq!(h.lookup_system(SMELL_SYSTEM_ID), Some(h.smell()));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn system_ids_are_validated() {
        let mut h = Hierarchy::new();
        let root = h.root();
        assert!(matches!(h.add_system(root, "x", ""), Err(HierarchyError::EmptySystemId)));
        assert!(matches!(
            h.add_system(root, "x", ROOT_SYSTEM_ID),
            Err(HierarchyError::ReservedSystemId(_))
        ));
        assert!(matches!(
            h.add_system(root, "x", SMELL_SYSTEM_ID),
            Err(HierarchyError::ReservedSystemId(_))
        ));
        let herd = h.add_system(root, "Herd", "herd").unwrap();
        assert!(matches!(
            h.add_system(root, "Other", "herd"),
            Err(HierarchyError::DuplicateSystemId(_))
        ));
        assert!(h.is_id_in_use("herd"));
        assert!(h.is_id_in_use(ROOT_SYSTEM_ID));
        assert!(!h.is_id_in_use("pack"));
        assert_eq!(h.lookup_system("herd"), Some(herd));
    }

    #[test]
    fn units_cannot_own_children() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let unit = h.add_unit(root, "deer").unwrap();
        assert!(matches!(h.add_unit(unit, "fawn"), Err(HierarchyError::NotASystem(_))));
        assert!(matches!(h.add_system(unit, "s", "s"), Err(HierarchyError::NotASystem(_))));
    }

    #[test]
    fn parent_child_links_agree() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let herd = h.add_system(root, "Herd", "herd").unwrap();
        let a = h.add_unit(herd, "a").unwrap();
        let b = h.add_unit(herd, "b").unwrap();
        assert_eq!(h.children(herd), &[a, b]);
        for child in [a, b] {
            assert_eq!(h.parent(child), Some(herd));
        }
        assert_eq!(h.all_units(), &[a, b]);
    }
}

#[cfg(test)]
mod init_entity {
    use crate::Hierarchy;

    #[test]
    fn spawned_unit_joins_named_system() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let pack = h.add_system(root, "Pack", "pack").unwrap();
        let wolf = h.spawn_unit("wolf");
        assert_eq!(h.parent(wolf), None);
        assert_eq!(h.all_units(), &[wolf]);

        assert!(h.init_entity(wolf, "pack"));
        assert_eq!(h.parent(wolf), Some(pack));
        assert_eq!(h.children(pack), &[wolf]);
    }

    #[test]
    fn unknown_system_is_rejected() {
        let mut h = Hierarchy::new();
        let wolf = h.spawn_unit("wolf");
        assert!(!h.init_entity(wolf, "nowhere"));
        assert_eq!(h.parent(wolf), None);
    }

    #[test]
    fn moving_keeps_links_consistent() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let a = h.add_system(root, "A", "a").unwrap();
        let b = h.add_system(root, "B", "b").unwrap();
        let u = h.add_unit(a, "u").unwrap();
        assert!(h.init_entity(u, "b"));
        assert!(h.children(a).is_empty());
        assert_eq!(h.children(b), &[u]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let a = h.add_system(root, "A", "a").unwrap();
        let _b = h.add_system(a, "B", "b").unwrap();
        assert!(!h.init_entity(a, "b"));
        assert_eq!(h.parent(a), Some(root));
    }
}

#[cfg(test)]
mod removal {
    use crate::{Hierarchy, HierarchyError};

    #[test]
    fn removes_whole_subtree_and_registrations() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let herd = h.add_system(root, "Herd", "herd").unwrap();
        let sub = h.add_system(herd, "Calves", "calves").unwrap();
        let a = h.add_unit(herd, "a").unwrap();
        let c = h.add_unit(sub, "c").unwrap();
        let other = h.add_unit(root, "other").unwrap();

        let removed = h.remove(herd).unwrap();
        assert_eq!(removed[0], herd);
        assert_eq!(removed.len(), 4);
        for id in [herd, sub, a, c] {
            assert!(!h.contains(id));
        }
        assert_eq!(h.all_units(), &[other]);
        assert_eq!(h.all_systems(), &[h.smell()]);
        assert!(!h.is_id_in_use("herd"));
        assert!(!h.is_id_in_use("calves"));
        assert!(!h.children(root).contains(&herd));
    }

    #[test]
    fn root_and_smell_are_protected() {
        let mut h = Hierarchy::new();
        let (root, smell) = (h.root(), h.smell());
        assert!(matches!(h.remove(root), Err(HierarchyError::Protected(_))));
        assert!(matches!(h.remove(smell), Err(HierarchyError::Protected(_))));
    }

    #[test]
    fn ids_are_reusable_after_removal() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let s = h.add_system(root, "S", "s").unwrap();
        h.remove(s).unwrap();
        let again = h.add_system(root, "S", "s").unwrap();
        assert_ne!(s, again);
        assert_eq!(h.lookup_system("s"), Some(again));
    }
}

#[cfg(test)]
mod registries {
    use crate::Hierarchy;

    #[test]
    fn names_and_top_level() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let a = h.add_system(root, "Forest", "forest").unwrap();
        let b = h.add_system(a, "Den", "den").unwrap();
        let _u = h.add_unit(root, "loner").unwrap();
        assert_eq!(h.system_names(), vec!["Root", "Smell", "Forest", "Den"]);
        assert_eq!(h.top_level_systems(), vec![h.smell(), a]);
        assert!(!h.top_level_systems().contains(&b));
    }

    #[test]
    fn explicit_register_calls_are_idempotent() {
        let mut h = Hierarchy::new();
        let root = h.root();
        let s = h.add_system(root, "S", "s").unwrap();
        let u = h.add_unit(root, "u").unwrap();

        assert!(!h.register_unit(u));
        assert!(h.unregister_unit(u));
        assert!(!h.unregister_unit(u));
        assert!(h.register_unit(u));
        assert!(!h.register_unit(s));

        assert!(h.unregister_system(s));
        assert_eq!(h.lookup_system("s"), None);
        assert!(h.register_system(s).is_ok());
        assert!(h.register_system(s).is_ok());
        assert_eq!(h.lookup_system("s"), Some(s));
        assert!(h.register_system(u).is_err());
    }
}
