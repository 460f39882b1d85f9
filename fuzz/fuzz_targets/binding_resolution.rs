#![no_main]

use ferrous_container::{Container, ContainerConfig, DiError, Target};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

// Small identifier space so aliases collide and form chains and cycles
fn ident(byte: u8) -> String {
    format!("id-{}", byte % 8)
}

fuzz_target!(|data: &[u8]| {
    let container = Container::with_config(
        ContainerConfig::default()
            .with_max_depth(64)
            .with_register_as_current(false),
    );

    for chunk in data.chunks(3) {
        let [op, a, b] = match *chunk {
            [op, a, b] => [op, a, b],
            _ => return,
        };
        let id = ident(a);

        match op % 6 {
            0 => container.add(id, ident(b)),
            1 => container.singleton(id, ident(b)),
            2 => container.add(id, Target::factory(move |_| b)),
            3 => container.singleton(id, Target::factory(move |_| b)),
            4 => {
                container.remove(&id);
                assert!(!container.exist(&id));
            }
            _ => match container.get(&id) {
                Ok(first) => {
                    let shared = container
                        .descriptors()
                        .into_iter()
                        .any(|d| d.identifier == id && d.is_shared());
                    if shared {
                        let second = container.get(&id).unwrap();
                        assert!(Arc::ptr_eq(&first, &second));
                    }
                }
                Err(DiError::NotFound(_))
                | Err(DiError::Circular(_))
                | Err(DiError::DepthExceeded(_))
                | Err(DiError::BindingResolution(_)) => {
                    assert!(!container.has(&id));
                }
                Err(other) => panic!("unexpected error: {}", other),
            },
        }
    }
});
