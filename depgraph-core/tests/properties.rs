//! Property-based tests for reachability queries
//!
//! Tests invariants that should hold for ALL generated graphs:
//! - Completeness: reported set == naive operation-level reachability
//! - At-most-once: no entity is reported twice
//! - No self-report: the start entity is never reported
//! - Resettability: repeating a query gives the same answer

use std::collections::{HashSet, VecDeque};

use depgraph_core::graph::{ComponentKind, Graph, GraphBuilder, NodeRef, OperationId};
use proptest::prelude::*;

/// Shape of a generated graph: operations per entity and relations given as
/// indices into the flat operation list. `None` as a source is the time
/// source.
#[derive(Debug, Clone)]
struct Shape {
    ops_per_entity: Vec<usize>,
    relations: Vec<(Option<usize>, usize)>,
}

fn shape() -> impl Strategy<Value = Shape> {
    prop::collection::vec(0usize..4, 1..10).prop_flat_map(|ops_per_entity| {
        let total: usize = ops_per_entity.iter().sum();
        let relations = if total == 0 {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec(
                (prop::option::weighted(0.9, 0..total), 0..total),
                0..total * 3,
            )
            .boxed()
        };
        (Just(ops_per_entity), relations).prop_map(|(ops_per_entity, relations)| Shape {
            ops_per_entity,
            relations,
        })
    })
}

const KINDS: [ComponentKind; 3] = [
    ComponentKind::Transform,
    ComponentKind::Geometry,
    ComponentKind::Shading,
];

fn build(shape: &Shape) -> Graph<usize> {
    let mut builder = GraphBuilder::new();
    let mut ops = Vec::new();
    for (entity, &count) in shape.ops_per_entity.iter().enumerate() {
        builder.add_entity(entity).unwrap();
        for n in 0..count {
            let kind = KINDS[n % KINDS.len()].clone();
            ops.push(builder.add_operation(&entity, kind, format!("op{n}")).unwrap());
        }
    }
    for &(from, to) in &shape.relations {
        let from = from.map_or(NodeRef::TimeSource, |i| NodeRef::Operation(ops[i]));
        builder.add_relation(from, ops[to]).unwrap();
    }
    builder.build()
}

/// Plain BFS over operations, then project onto owning entities.
fn reference(graph: &Graph<usize>, start: usize, forward: bool) -> HashSet<usize> {
    let Some(start_node) = graph.find_entity(&start) else {
        return HashSet::new();
    };
    let mut seen: HashSet<OperationId> = start_node.operations().collect();
    let mut queue: VecDeque<OperationId> = seen.iter().copied().collect();
    let mut entities = HashSet::new();

    while let Some(id) = queue.pop_front() {
        let op = graph.operation(id);
        let links = if forward { op.outlinks() } else { op.inlinks() };
        for &rel in links {
            let relation = graph.relation(rel);
            let far = if forward { relation.to() } else { relation.from() };
            let Some(next) = far.as_operation() else {
                continue;
            };
            entities.insert(*graph.owner_of(next).identity());
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    entities.remove(&start);
    entities
}

fn collect(graph: &Graph<usize>, start: usize, forward: bool) -> Vec<usize> {
    let mut found = Vec::new();
    let result = if forward {
        graph.for_each_dependent(&start, |id| found.push(*id))
    } else {
        graph.for_each_ancestor(&start, |id| found.push(*id))
    };
    let reported = result.unwrap();
    assert_eq!(reported, found.len());
    found
}

proptest! {
    #[test]
    fn prop_matches_reference_reachability(shape in shape(), forward in any::<bool>()) {
        let graph = build(&shape);
        for start in 0..shape.ops_per_entity.len() {
            let found = collect(&graph, start, forward);
            let unique: HashSet<_> = found.iter().copied().collect();

            prop_assert_eq!(unique.len(), found.len(), "duplicate report from {}", start);
            prop_assert!(!unique.contains(&start));
            prop_assert_eq!(unique, reference(&graph, start, forward));
        }
    }

    #[test]
    fn prop_repeated_queries_agree(shape in shape(), start in 0usize..10) {
        let graph = build(&shape);
        let start = start % shape.ops_per_entity.len();

        let dependents = collect(&graph, start, true);
        let ancestors = collect(&graph, start, false);
        prop_assert_eq!(collect(&graph, start, true), dependents);
        prop_assert_eq!(collect(&graph, start, false), ancestors);
    }

    #[test]
    fn prop_full_enumeration_matches_membership(shape in shape()) {
        let graph = build(&shape);
        let mut seen = Vec::new();
        graph.for_each_entity(|id| seen.push(*id));
        prop_assert_eq!(seen, (0..shape.ops_per_entity.len()).collect::<Vec<_>>());
    }
}
