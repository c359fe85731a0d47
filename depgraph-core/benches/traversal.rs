//! Benchmark for reachability queries
//!
//! Measures:
//! - Long operation chains (chain-following fast path)
//! - Wide fan-out (worklist path)
//! - Layered graphs with heavy fan-in

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use depgraph_core::graph::{ComponentKind, Graph, GraphBuilder};

/// `entities` entities, each holding a chain of `ops` operations, with the
/// tail of one entity feeding the head of the next.
fn chained_entities(entities: usize, ops: usize) -> Graph<usize> {
    let mut builder = GraphBuilder::new();
    let mut previous = None;
    for entity in 0..entities {
        builder.add_entity(entity).unwrap();
        for n in 0..ops {
            let op = builder
                .add_operation(&entity, ComponentKind::Transform, format!("step{n}"))
                .unwrap();
            if let Some(prev) = previous {
                builder.add_relation(prev, op).unwrap();
            }
            previous = Some(op);
        }
    }
    builder.build()
}

/// One root feeding `width` leaf entities directly.
fn fan_out(width: usize) -> Graph<usize> {
    let mut builder = GraphBuilder::new();
    builder.add_entity(0).unwrap();
    let root = builder
        .add_operation(&0, ComponentKind::Parameters, "value")
        .unwrap();
    for entity in 1..=width {
        builder.add_entity(entity).unwrap();
        let op = builder
            .add_operation(&entity, ComponentKind::Geometry, "eval")
            .unwrap();
        builder.add_relation(root, op).unwrap();
    }
    builder.build()
}

/// `layers` layers of `width` entities; every entity depends on every entity
/// of the previous layer.
fn layered(layers: usize, width: usize) -> Graph<usize> {
    let mut builder = GraphBuilder::new();
    let mut previous: Vec<_> = Vec::new();
    for layer in 0..layers {
        let mut current = Vec::with_capacity(width);
        for slot in 0..width {
            let entity = layer * width + slot;
            builder.add_entity(entity).unwrap();
            let op = builder
                .add_operation(&entity, ComponentKind::Transform, "eval")
                .unwrap();
            for &parent in &previous {
                builder.add_relation(parent, op).unwrap();
            }
            current.push(op);
        }
        previous = current;
    }
    builder.build()
}

fn bench_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    for entities in [10, 100, 1000] {
        let graph = chained_entities(entities, 16);
        group.bench_with_input(BenchmarkId::new("dependents", entities), &graph, |b, graph| {
            b.iter(|| {
                let mut count = 0;
                graph.for_each_dependent(&0, |_| count += 1).unwrap();
                black_box(count)
            });
        });
        group.bench_with_input(BenchmarkId::new("ancestors", entities), &graph, |b, graph| {
            b.iter(|| {
                let mut count = 0;
                graph
                    .for_each_ancestor(&(entities - 1), |_| count += 1)
                    .unwrap();
                black_box(count)
            });
        });
    }
    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    for width in [100, 1000, 10_000] {
        let graph = fan_out(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &graph, |b, graph| {
            b.iter(|| {
                let mut count = 0;
                graph.for_each_dependent(&0, |_| count += 1).unwrap();
                black_box(count)
            });
        });
    }
    group.finish();
}

fn bench_layered(c: &mut Criterion) {
    let graph = layered(8, 32);
    c.bench_function("layered/ancestors", |b| {
        b.iter(|| {
            let mut count = 0;
            graph.for_each_ancestor(&(8 * 32 - 1), |_| count += 1).unwrap();
            black_box(count)
        });
    });
    c.bench_function("layered/all_entities", |b| {
        b.iter(|| {
            let mut count = 0;
            graph.for_each_entity(|_| count += 1);
            black_box(count)
        });
    });
}

criterion_group!(benches, bench_chains, bench_fan_out, bench_layered);
criterion_main!(benches);
