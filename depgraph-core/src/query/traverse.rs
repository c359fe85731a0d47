//! Directed Traversal
//!
//! The walk shared by the dependent and ancestor queries. Relations exist
//! between operations, but results are reported per entity, once each.
//!
//! # Algorithm
//!
//! 1. Every operation of the start entity is marked scheduled and pushed to
//!    the back of a double-ended worklist. The start entity is marked reported
//!    without invoking the callback, which is what keeps it out of the result.
//! 2. The front of the worklist becomes the visit root of an inner loop:
//!    - the owning entity is reported if it has not been yet;
//!    - relations in the walk direction are filtered down to those whose far
//!      end is an operation;
//!    - with exactly one such relation, its unscheduled target is followed
//!      in place (no worklist traffic for straight chains), and an already
//!      scheduled target ends the chain;
//!    - with zero or several, every unscheduled target is pushed to the
//!      *front* of the worklist and the chain ends.
//! 3. Repeat until the worklist is empty.
//!
//! The scheduled marker guarantees each operation enters the walk at most
//! once, so the whole pass is linear in the reachable part of the graph.

use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

use crate::graph::{EntityNode, Graph, OperationId, OperationNode, Relation, RelationId};

/// Which way relations are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From an operation to the operations that depend on it.
    Forward,

    /// From an operation to the operations it depends on.
    Backward,
}

impl Direction {
    /// Relations leaving `operation` in this direction.
    fn links(self, operation: &OperationNode) -> &[RelationId] {
        match self {
            Self::Forward => operation.outlinks(),
            Self::Backward => operation.inlinks(),
        }
    }

    /// The far end of `relation`, if it is an operation.
    fn far_end(self, relation: &Relation) -> Option<OperationId> {
        match self {
            Self::Forward => relation.to().as_operation(),
            Self::Backward => relation.from().as_operation(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("dependents"),
            Self::Backward => f.write_str("ancestors"),
        }
    }
}

/// Counters gathered during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WalkStats {
    /// Number of callback invocations.
    pub reported: usize,

    /// Number of operations visited, seeds included.
    pub visited: usize,

    /// Number of worklist pushes, seeds included.
    pub queued: usize,
}

/// Walk from every operation of `start` in `direction`, reporting each newly
/// reached entity to `callback`.
///
/// Markers must have been cleared beforehand.
pub(crate) fn walk<K, F>(
    graph: &Graph<K>,
    start: &EntityNode<K>,
    direction: Direction,
    mut callback: F,
) -> WalkStats
where
    F: FnMut(&K),
{
    let mut stats = WalkStats::default();
    let mut queue: VecDeque<OperationId> = VecDeque::new();

    for id in start.operations() {
        graph.operation(id).set_scheduled(true);
        queue.push_back(id);
        stats.queued += 1;
    }
    start.set_reported(true);

    while let Some(root) = queue.pop_front() {
        let mut current = root;
        loop {
            stats.visited += 1;
            let operation = graph.operation(current);

            let owner = graph.entity(operation.owner());
            if !owner.is_reported() {
                owner.set_reported(true);
                stats.reported += 1;
                callback(owner.identity());
            }

            let mut followable = direction
                .links(operation)
                .iter()
                .filter_map(|&rel| direction.far_end(graph.relation(rel)));

            match (followable.next(), followable.next()) {
                (Some(next), None) => {
                    let next_node = graph.operation(next);
                    if next_node.is_scheduled() {
                        break;
                    }
                    next_node.set_scheduled(true);
                    trace!(from = current.index(), to = next.index(), "following chain");
                    current = next;
                }
                (first, second) => {
                    for next in first.into_iter().chain(second).chain(followable) {
                        let next_node = graph.operation(next);
                        if !next_node.is_scheduled() {
                            next_node.set_scheduled(true);
                            queue.push_front(next);
                            stats.queued += 1;
                        }
                    }
                    break;
                }
            }
        }
    }

    stats
}
