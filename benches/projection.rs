//! Benchmarks for type resolution and interface closure.
//!
//! Measures the projection core against a synthetic store shaped like the Windows collection
//! interfaces:
//! - Resolving nested generic instantiations, cached and uncached
//! - Walking the interface closure of a runtime class
//! - Projecting every type of the store in parallel

extern crate projscope;

use criterion::{criterion_group, criterion_main, Criterion};
use projscope::{
    prelude::*,
    projection::closure::{all_members, required_interfaces},
};
use std::hint::black_box;

const COLLECTIONS: &str = "Windows.Foundation.Collections";

/// Collection interfaces plus `count` runtime classes implementing `IMap`2<String, Object>`.
fn build_store(count: usize) -> (InMemoryStore, TypeDef, TypeDef) {
    let store = InMemoryStore::new();
    let t0 = TypeSignature::GenericParamType(0);
    let t1 = TypeSignature::GenericParamType(1);

    let iterable = TypeDefBuilder::new(COLLECTIONS, "IIterable`1")
        .interface()
        .generic_param("T")
        .method("First", |m| m.returns(TypeSignature::Object))
        .build(&store)
        .unwrap();
    let pair = TypeDefBuilder::new(COLLECTIONS, "IKeyValuePair`2")
        .interface()
        .generic_param("K")
        .generic_param("V")
        .simple_property("Key", t0.clone(), false)
        .simple_property("Value", t1.clone(), false)
        .build(&store)
        .unwrap();
    let iterable_pairs = store.add_type_spec(TypeSignature::generic_class(
        iterable.token(),
        vec![TypeSignature::generic_class(
            pair.token(),
            vec![t0.clone(), t1.clone()],
        )],
    ));
    let map = TypeDefBuilder::new(COLLECTIONS, "IMap`2")
        .interface()
        .generic_param("K")
        .generic_param("V")
        .implements(iterable_pairs)
        .method("Lookup", |m| m.param("key", t0.clone()).returns(t1.clone()))
        .simple_property("Size", TypeSignature::U4, false)
        .method("Insert", |m| {
            m.param("key", t0.clone())
                .param("value", t1.clone())
                .returns(TypeSignature::Boolean)
        })
        .build(&store)
        .unwrap();
    let string_map = store.add_type_spec(TypeSignature::generic_class(
        map.token(),
        vec![TypeSignature::String, TypeSignature::Object],
    ));

    let mut last = map;
    for index in 0..count {
        last = TypeDefBuilder::new("Bench", &format!("PropertySet{index}"))
            .class()
            .implements(string_map)
            .constructor(|c| c)
            .build(&store)
            .unwrap();
    }

    (store, map, last)
}

/// Nested generic signature `IMap<String, IMap<String, ... Object>>` of the given depth.
fn nested_signature(map: TypeDef, depth: usize) -> TypeSignature {
    let mut signature = TypeSignature::Object;
    for _ in 0..depth {
        signature =
            TypeSignature::generic_class(map.token(), vec![TypeSignature::String, signature]);
    }
    signature
}

fn bench_resolve_nested_generic(c: &mut Criterion) {
    let (store, map, _) = build_store(0);
    let signature = nested_signature(map, 16);
    let resolver = TypeResolver::new(&store);

    c.bench_function("resolve_nested_generic", |b| {
        b.iter(|| {
            let semantics = resolver.resolve(black_box(&signature)).unwrap();
            black_box(semantics)
        });
    });
}

fn bench_resolve_type_spec(c: &mut Criterion) {
    let (store, map, _) = build_store(0);
    let spec = store.add_type_spec(nested_signature(map, 4));
    let cached = TypeResolver::new(&store);
    let uncached = TypeResolver::with_config(&store, ProjectionConfig::uncached());

    c.bench_function("resolve_type_spec_cached", |b| {
        b.iter(|| {
            let semantics = cached.resolve_reference(black_box(spec.into())).unwrap();
            black_box(semantics)
        });
    });
    c.bench_function("resolve_type_spec_uncached", |b| {
        b.iter(|| {
            let semantics = uncached.resolve_reference(black_box(spec.into())).unwrap();
            black_box(semantics)
        });
    });
}

fn bench_closure(c: &mut Criterion) {
    let (store, map, class) = build_store(1);
    let resolver = TypeResolver::new(&store);

    c.bench_function("required_interfaces_class", |b| {
        b.iter(|| {
            let interfaces = required_interfaces(&resolver, black_box(class)).unwrap();
            black_box(interfaces)
        });
    });
    c.bench_function("all_members_interface", |b| {
        b.iter(|| {
            let members = all_members(&resolver, black_box(map)).unwrap();
            black_box(members)
        });
    });
}

fn bench_project_all(c: &mut Criterion) {
    let (store, _, _) = build_store(256);
    let projector = TypeProjector::new(&store);

    c.bench_function("project_all_256", |b| {
        b.iter(|| {
            let (projections, diagnostics) = projector.project_all();
            black_box((projections, diagnostics))
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_nested_generic,
    bench_resolve_type_spec,
    bench_closure,
    bench_project_all,
);
criterion_main!(benches);
