//! Marker reset.
//!
//! Both directional queries start here. The pass is linear in the number of
//! nodes and touches nothing but the two transient markers.

use crate::graph::Graph;

/// Clear the `scheduled` marker of every operation and the `reported` marker
/// of every entity.
pub(crate) fn clear<K>(graph: &Graph<K>) {
    for operation in graph.operations() {
        operation.set_scheduled(false);
    }
    for entity in graph.entities() {
        entity.set_reported(false);
    }
}
