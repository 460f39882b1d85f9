/// Process-wide current container tests
///
/// Every test touches the shared pointer, so they run serially.

use ferrous_container::{Container, ContainerConfig, CONTAINER};
use serial_test::serial;

#[test]
#[serial]
fn test_last_constructed_container_wins() {
    let first = Container::new();
    assert!(Container::ptr_eq(&Container::instance().unwrap(), &first));

    let second = Container::new();
    let current = Container::instance().unwrap();
    assert!(Container::ptr_eq(&current, &second));
    assert!(!Container::ptr_eq(&current, &first));
}

#[test]
#[serial]
fn test_opt_out_leaves_current_untouched() {
    let registered = Container::new();
    let _quiet = Container::with_config(ContainerConfig::default().with_register_as_current(false));

    assert!(Container::ptr_eq(&Container::instance().unwrap(), &registered));
}

#[test]
#[serial]
fn test_dropped_container_is_not_current() {
    let c = Container::new();
    drop(c);
    assert!(Container::instance().is_none());
}

#[test]
#[serial]
fn test_set_and_unset_current() {
    let a = Container::new();
    let b = Container::new();

    a.set_as_current();
    assert!(Container::ptr_eq(&Container::instance().unwrap(), &a));

    // Unsetting a container that is not current is a no-op
    b.unset_as_current();
    assert!(Container::ptr_eq(&Container::instance().unwrap(), &a));

    a.unset_as_current();
    assert!(Container::instance().is_none());
}

#[test]
#[serial]
fn test_current_resolves_itself() {
    let c = Container::new();
    let current = Container::instance().unwrap();
    let resolved = current.get_as::<Container>(CONTAINER).unwrap();
    assert!(Container::ptr_eq(&resolved, &c));
}
