use actor_interfaces::{
    InterfaceDescriptor, InterfaceId, InterfaceRegistry, MethodBodyTypes, MethodDescriptor,
    MethodId, TypeDescriptor,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn descriptor(id: u32) -> InterfaceDescriptor {
    let mut descriptor = InterfaceDescriptor::new(
        InterfaceId::new(id),
        TypeDescriptor::named(format!("bench.Interface{id}")),
    );
    for method in 0..8u32 {
        descriptor = descriptor.method(
            MethodDescriptor::new(format!("method{method}"), MethodId::new(method))
                .params([TypeDescriptor::of::<u64>(), TypeDescriptor::of::<String>()])
                .returns(TypeDescriptor::deferred(Some(TypeDescriptor::of::<Vec<u8>>()))),
        );
    }
    descriptor
}

fn registry_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("InterfaceRegistry");

    let registry = InterfaceRegistry::with_capacity(1024);
    for id in 0..1024 {
        let descriptor = descriptor(id);
        registry.register(&descriptor, MethodBodyTypes::derive(&descriptor));
    }

    group.bench_function("lookup_by_id", |b| {
        b.iter(|| registry.lookup_by_id(black_box(InterfaceId::new(512))))
    });

    group.bench_function("lookup_by_name", |b| {
        b.iter(|| registry.lookup_by_name(black_box("bench.Interface512")))
    });

    group.bench_function("build_details", |b| {
        let descriptor = descriptor(4096);
        b.iter(|| {
            let registry = InterfaceRegistry::new();
            registry.register(black_box(&descriptor), MethodBodyTypes::derive(&descriptor))
        })
    });

    group.finish();
}

criterion_group!(benches, registry_benchmarks);
criterion_main!(benches);
