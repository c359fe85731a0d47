//! Dependency Graph
//!
//! This module implements the read-only graph model that queries walk.
//!
//! # Overview
//!
//! The graph has three tiers of ownership:
//!
//! - Entity nodes, one per data entity
//! - Component nodes, logical groupings owned by one entity
//! - Operation nodes, owned by one component; these are the actual vertices
//!
//! Relations connect operations. A relation may also start at the graph-wide
//! time source, but an operation never feeds anything that is not an
//! operation; the builder rejects such relations.
//!
//! # Design Decisions
//!
//! 1. All nodes live in flat arenas indexed by small `Copy` ids, so ownership
//!    is a tree of indices rather than a web of references.
//!
//! 2. Entities are looked up by their canonical identity in O(1).
//!
//! 3. Each operation keeps both its outgoing and incoming relations so it can
//!    be walked in either direction without building extra indices.
//!
//! 4. The per-query markers live on the nodes themselves, which keeps the
//!    walk free of side tables but makes a graph usable by one query at a
//!    time. `Graph` is therefore not `Sync`.

mod builder;
mod description;
mod node;

use std::cell::Cell;
use std::collections::HashMap;
use std::hash::Hash;

pub use builder::GraphBuilder;
pub use description::{EntityDescription, GraphDescription, RelationDescription, TIME_SOURCE};
pub use node::{
    ComponentKind, ComponentNode, EntityIndex, EntityNode, NodeClass, NodeRef, OperationId,
    OperationNode, Relation, RelationId,
};

use crate::error::QueryError;

/// A built dependency graph, keyed by entity identity `K`.
#[derive(Debug)]
pub struct Graph<K> {
    /// All entity nodes, in insertion order.
    entities: Vec<EntityNode<K>>,

    /// Identity to entity lookup.
    lookup: HashMap<K, EntityIndex>,

    /// Flat index of every operation in the graph.
    operations: Vec<OperationNode>,

    relations: Vec<Relation>,

    /// Set while a query is walking this graph.
    busy: Cell<bool>,
}

impl<K> Graph<K> {
    pub(crate) fn empty() -> Self {
        Self {
            entities: Vec::new(),
            lookup: HashMap::new(),
            operations: Vec::new(),
            relations: Vec::new(),
            busy: Cell::new(false),
        }
    }

    /// Iterate over every entity node in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityNode<K>> {
        self.entities.iter()
    }

    /// Iterate over every operation node.
    pub fn operations(&self) -> impl Iterator<Item = &OperationNode> {
        self.operations.iter()
    }

    /// Get an entity node by index.
    ///
    /// Indices handed out by this graph's builder are always valid.
    pub fn entity(&self, index: EntityIndex) -> &EntityNode<K> {
        &self.entities[index.index()]
    }

    /// Get an operation node by id.
    pub fn operation(&self, id: OperationId) -> &OperationNode {
        &self.operations[id.index()]
    }

    /// Get a relation by id.
    pub fn relation(&self, id: RelationId) -> &Relation {
        &self.relations[id.index()]
    }

    /// Get the entity owning an operation.
    pub fn owner_of(&self, id: OperationId) -> &EntityNode<K> {
        self.entity(self.operation(id).owner())
    }

    /// Get the total number of entities in the graph.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get the total number of operations in the graph.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Get the total number of relations in the graph.
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Mark the graph as being walked until the returned guard is dropped.
    ///
    /// Fails if another query on this graph is still in progress, which can
    /// only happen when a query callback calls back into the graph.
    pub(crate) fn enter_query(&self) -> Result<QueryGuard<'_>, QueryError> {
        if self.busy.replace(true) {
            return Err(QueryError::Reentrant);
        }
        Ok(QueryGuard { busy: &self.busy })
    }
}

impl<K> Graph<K>
where
    K: Eq + Hash,
{
    /// Look up the node for an entity identity.
    pub fn find_entity(&self, identity: &K) -> Option<&EntityNode<K>> {
        self.lookup.get(identity).map(|&index| self.entity(index))
    }

    /// Check whether an entity is part of the graph.
    pub fn contains(&self, identity: &K) -> bool {
        self.lookup.contains_key(identity)
    }
}

/// Clears the graph's busy flag when dropped, including on unwind out of a
/// query callback.
pub(crate) struct QueryGuard<'a> {
    busy: &'a Cell<bool>,
}

impl Drop for QueryGuard<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_guard_blocks_nested_entry() {
        let graph: Graph<u32> = Graph::empty();

        let guard = graph.enter_query().unwrap();
        assert_eq!(graph.enter_query().err(), Some(QueryError::Reentrant));

        drop(guard);
        assert!(graph.enter_query().is_ok());
    }

    #[test]
    fn lookup_by_identity() {
        let mut builder = GraphBuilder::new();
        builder.add_entity("camera").unwrap();
        builder
            .add_operation(&"camera", ComponentKind::Transform, "local")
            .unwrap();
        let graph = builder.build();

        assert!(graph.contains(&"camera"));
        assert!(!graph.contains(&"light"));

        let camera = graph.find_entity(&"camera").unwrap();
        assert_eq!(*camera.identity(), "camera");
        assert_eq!(camera.operations().count(), 1);
        assert!(graph.find_entity(&"light").is_none());
    }
}
