//! Graph Builder
//!
//! The builder is the only way to create or modify a graph. Once `build` is
//! called the topology is frozen; queries only ever flip the transient
//! markers.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use super::node::{
    ComponentKind, EntityIndex, EntityNode, NodeRef, OperationId, OperationNode, Relation,
    RelationId,
};
use super::Graph;
use crate::error::{GraphError, Result};

/// Incrementally assembles a [`Graph`].
#[derive(Debug)]
pub struct GraphBuilder<K> {
    graph: Graph<K>,
}

impl<K> GraphBuilder<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            graph: Graph::empty(),
        }
    }

    /// Add an entity node.
    ///
    /// Each identity may only be added once.
    pub fn add_entity(&mut self, identity: K) -> Result<EntityIndex> {
        if self.graph.lookup.contains_key(&identity) {
            return Err(GraphError::DuplicateEntity(format!("{identity:?}")));
        }

        let index = EntityIndex::new(self.graph.entities.len());
        self.graph.lookup.insert(identity.clone(), index);
        self.graph.entities.push(EntityNode::new(identity));
        Ok(index)
    }

    /// Make sure `entity` has a component of the given kind, even if it never
    /// gets any operations.
    pub fn add_component(&mut self, entity: &K, kind: ComponentKind) -> Result<()> {
        let index = self.entity_index(entity)?;
        self.graph.entities[index.index()].component_mut(kind);
        Ok(())
    }

    /// Add an operation to a component of `entity`, creating the component on
    /// first use.
    pub fn add_operation(
        &mut self,
        entity: &K,
        kind: ComponentKind,
        name: impl Into<String>,
    ) -> Result<OperationId> {
        let owner = self.entity_index(entity)?;
        let id = OperationId::new(self.graph.operations.len());

        self.graph.entities[owner.index()]
            .component_mut(kind.clone())
            .push_operation(id);
        self.graph
            .operations
            .push(OperationNode::new(owner, kind, name.into()));
        Ok(id)
    }

    /// Add an unnamed relation: `to` must be recomputed after `from`.
    pub fn add_relation(
        &mut self,
        from: impl Into<NodeRef>,
        to: impl Into<NodeRef>,
    ) -> Result<RelationId> {
        self.add_named_relation(from, to, None)
    }

    /// Add a relation with an optional label.
    ///
    /// Rejects relations that reference unknown operations, relations that
    /// touch no operation at all, and relations from an operation to
    /// anything other than an operation.
    ///
    /// Operation ids are positions in this builder's arena. Only pass ids
    /// returned by this builder's [`add_operation`](Self::add_operation): an
    /// id issued by another builder is indistinguishable from a local one
    /// when it is in range, and silently names a different operation.
    pub fn add_named_relation(
        &mut self,
        from: impl Into<NodeRef>,
        to: impl Into<NodeRef>,
        name: Option<String>,
    ) -> Result<RelationId> {
        let from = from.into();
        let to = to.into();

        for endpoint in [from, to] {
            if let Some(id) = endpoint.as_operation() {
                if id.index() >= self.graph.operations.len() {
                    return Err(GraphError::UnknownOperation(id));
                }
            }
        }

        match (from.as_operation(), to.as_operation()) {
            (None, None) => return Err(GraphError::DetachedRelation),
            (Some(from_op), None) => {
                return Err(GraphError::NonOperationTarget {
                    from: from_op,
                    to: to.class(),
                })
            }
            _ => {}
        }

        let id = RelationId::new(self.graph.relations.len());
        if let Some(from_op) = from.as_operation() {
            self.graph.operations[from_op.index()].push_outlink(id);
        }
        if let Some(to_op) = to.as_operation() {
            self.graph.operations[to_op.index()].push_inlink(id);
        }
        trace!(?from, ?to, relation = id.index(), "added relation");

        self.graph.relations.push(Relation::new(from, to, name));
        Ok(id)
    }

    /// Freeze the topology and hand out the graph.
    pub fn build(self) -> Graph<K> {
        self.graph
    }

    fn entity_index(&self, entity: &K) -> Result<EntityIndex> {
        self.graph
            .lookup
            .get(entity)
            .copied()
            .ok_or_else(|| GraphError::UnknownEntity(format!("{entity:?}")))
    }
}

impl<K> Default for GraphBuilder<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
