use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_container::*;
use std::sync::Arc;

// ===== Fixtures =====

#[derive(Default)]
struct Leaf;

struct Branch {
    _left: Arc<Leaf>,
    _right: Arc<Leaf>,
}

impl Injectable for Branch {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::of::<Leaf>("left"), Parameter::of::<Leaf>("right")]
    }

    fn construct(args: &mut Arguments) -> DiResult<Self> {
        Ok(Self {
            _left: args.required("left")?,
            _right: args.required("right")?,
        })
    }
}

struct Root {
    _branch: Arc<Branch>,
    _label: Arc<String>,
}

impl Injectable for Root {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::of::<Branch>("branch"),
            Parameter::new("label").default_value(String::from("root")),
        ]
    }

    fn construct(args: &mut Arguments) -> DiResult<Self> {
        Ok(Self {
            _branch: args.required("branch")?,
            _label: args.required("label")?,
        })
    }
}

fn container(cache_plans: bool) -> Container {
    let c = Container::with_config(
        ContainerConfig::default()
            .with_plan_cache(cache_plans)
            .with_register_as_current(false),
    );
    c.declare_default::<Leaf>();
    c.declare_type::<Branch>();
    c.declare_type::<Root>();
    c
}

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let container = container(true);
    container.singleton("value", Target::factory(|_| 42u64));

    // Prime the singleton
    let _ = container.get("value").unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = container.get_as::<u64>(black_box("value")).unwrap();
            black_box(v);
        })
    });
}

fn bench_transient_factory(c: &mut Criterion) {
    let container = container(true);
    container.add("value", Target::factory(|_| [0u8; 64]));

    c.bench_function("transient_factory", |b| {
        b.iter(|| {
            let v = container.get(black_box("value")).unwrap();
            black_box(v);
        })
    });
}

fn bench_alias_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_chain");

    for depth in [1usize, 8, 32] {
        let container = container(true);
        container.add("link-0", Target::factory(|_| 1u32));
        for i in 1..depth {
            container.add(format!("link-{}", i), format!("link-{}", i - 1));
        }
        let head = format!("link-{}", depth - 1);

        group.bench_with_input(BenchmarkId::from_parameter(depth), &head, |b, head| {
            b.iter(|| {
                let v = container.get(head).unwrap();
                black_box(v);
            })
        });
    }

    group.finish();
}

fn bench_autowire(c: &mut Criterion) {
    let mut group = c.benchmark_group("autowire_root");

    for cache_plans in [true, false] {
        let container = container(cache_plans);
        let label = if cache_plans { "plan_cache" } else { "no_plan_cache" };

        group.bench_function(label, |b| {
            b.iter(|| {
                let root = container.make::<Root>().unwrap();
                black_box(root);
            })
        });
    }

    group.finish();
}

fn bench_container_self_resolution(c: &mut Criterion) {
    let container = container(true);

    c.bench_function("container_self_resolution", |b| {
        b.iter(|| {
            let me = container.get(black_box(CONTAINER)).unwrap();
            black_box(me);
        })
    });
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_transient_factory,
    bench_alias_chain,
    bench_autowire,
    bench_container_self_resolution
);
criterion_main!(benches);
