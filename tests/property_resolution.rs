/// Property-based tests for resolution
///
/// These verify alias, lifetime and removal behavior for arbitrary
/// identifiers and chain lengths.

use ferrous_container::{Container, ContainerConfig, Target};
use proptest::prelude::*;
use std::sync::Arc;

fn container() -> Container {
    Container::with_config(ContainerConfig::default().with_register_as_current(false))
}

// Property: any alias chain resolves to the value at its end
proptest! {
    #[test]
    fn alias_chain_resolves_to_source(length in 1usize..64, value in any::<u64>()) {
        let c = container();
        c.add("node-0", Target::factory(move |_| value));
        for i in 1..length {
            c.add(format!("node-{}", i), format!("node-{}", i - 1));
        }

        let resolved = c.get_as::<u64>(&format!("node-{}", length - 1)).unwrap();
        prop_assert_eq!(*resolved, value);
    }
}

// Property: shared bindings always return the same instance, transient never do
proptest! {
    #[test]
    fn lifetime_controls_identity(shared in any::<bool>(), id in "[a-z]{1,12}") {
        let c = container();
        if shared {
            c.singleton(id.clone(), Target::factory(|_| String::from("value")));
        } else {
            c.add(id.clone(), Target::factory(|_| String::from("value")));
        }

        let a = c.get(&id).unwrap();
        let b = c.get(&id).unwrap();
        prop_assert_eq!(Arc::ptr_eq(&a, &b), shared);
    }
}

// Property: after remove, an identifier neither exists nor resolves
proptest! {
    #[test]
    fn remove_clears_everything(ids in prop::collection::hash_set("[a-z]{1,8}", 1..10)) {
        let c = container();
        for id in &ids {
            c.singleton(id.clone(), Target::factory(|_| 1u8));
            prop_assert!(c.has(id));
        }
        for id in &ids {
            c.remove(id);
            prop_assert!(!c.exist(id));
            prop_assert!(c.get(id).unwrap_err().is_not_found());
        }
    }
}

// Property: exist is true exactly for registered identifiers
proptest! {
    #[test]
    fn exist_matches_registration(registered in "[a-z]{1,8}", queried in "[a-z]{1,8}") {
        let c = container();
        c.add(registered.clone(), Target::factory(|_| ()));
        prop_assert_eq!(c.exist(&queried), queried == registered);
    }
}
