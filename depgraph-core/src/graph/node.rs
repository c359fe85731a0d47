//! Graph Nodes
//!
//! This module defines the three tiers of nodes that live in the dependency
//! graph (entities, components, operations) together with the relations that
//! connect operations.
//!
//! Entities and operations carry one transient marker each. The markers are
//! stored in `Cell`s so a query can flip them through a shared reference;
//! they mean nothing outside of a single query call.

use std::cell::Cell;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index of an entity node inside its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityIndex(usize);

impl EntityIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Unique identifier for an operation node in the dependency graph.
///
/// An id is a position in the arena of the builder that issued it and only
/// names the same operation in that builder's graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(usize);

impl OperationId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Unique identifier for a relation in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(usize);

impl RelationId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Logical grouping of operations within one entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Driven properties and custom parameters.
    Parameters,

    /// Animation data evaluation.
    Animation,

    /// Local and world transform.
    Transform,

    /// Geometry evaluation (modifiers, constraints on shape data).
    Geometry,

    /// Material and shading evaluation.
    Shading,

    /// Bookkeeping around evaluation of the whole entity (init, done).
    Evaluation,

    /// Point caches and baked results.
    Cache,

    /// Creation of the evaluated copy of the entity.
    CopyOnWrite,

    /// Any grouping not covered above, identified by name.
    Custom(String),
}

impl ComponentKind {
    /// Name used for this kind in graph descriptions and logs.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Parameters => "parameters",
            Self::Animation => "animation",
            Self::Transform => "transform",
            Self::Geometry => "geometry",
            Self::Shading => "shading",
            Self::Evaluation => "evaluation",
            Self::Cache => "cache",
            Self::CopyOnWrite => "copy_on_write",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl From<&str> for ComponentKind {
    fn from(name: &str) -> Self {
        match name {
            "parameters" => Self::Parameters,
            "animation" => Self::Animation,
            "transform" => Self::Transform,
            "geometry" => Self::Geometry,
            "shading" => Self::Shading,
            "evaluation" => Self::Evaluation,
            "cache" => Self::Cache,
            "copy_on_write" => Self::CopyOnWrite,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The class of a node that a relation can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// An operation node, the actual vertex of the dependency graph.
    Operation,

    /// The graph-wide time source. Relations may start here, but it owns no
    /// operations and is never traversed.
    TimeSource,
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operation => f.write_str("operation"),
            Self::TimeSource => f.write_str("time source"),
        }
    }
}

/// An endpoint of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// An operation node.
    Operation(OperationId),

    /// The graph-wide time source.
    TimeSource,
}

impl NodeRef {
    /// Get the class of the referenced node.
    pub fn class(&self) -> NodeClass {
        match self {
            Self::Operation(_) => NodeClass::Operation,
            Self::TimeSource => NodeClass::TimeSource,
        }
    }

    /// Returns the operation this endpoint refers to, or `None` when the
    /// endpoint is not an operation node.
    pub fn as_operation(&self) -> Option<OperationId> {
        match self {
            Self::Operation(id) => Some(*id),
            Self::TimeSource => None,
        }
    }
}

impl From<OperationId> for NodeRef {
    fn from(id: OperationId) -> Self {
        Self::Operation(id)
    }
}

/// A directed edge: `to` must be recomputed after `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    from: NodeRef,
    to: NodeRef,
    name: Option<String>,
}

impl Relation {
    pub(crate) fn new(from: NodeRef, to: NodeRef, name: Option<String>) -> Self {
        Self { from, to, name }
    }

    /// The node this relation starts from.
    pub fn from(&self) -> NodeRef {
        self.from
    }

    /// The node this relation points to.
    pub fn to(&self) -> NodeRef {
        self.to
    }

    /// Optional human-readable label.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A named group of operations, owned by one entity.
#[derive(Debug, Clone)]
pub struct ComponentNode {
    kind: ComponentKind,
    operations: Vec<OperationId>,
}

impl ComponentNode {
    pub(crate) fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            operations: Vec::new(),
        }
    }

    /// Get the component's kind.
    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// Operations of this component, in insertion order.
    pub fn operations(&self) -> &[OperationId] {
        &self.operations
    }

    pub(crate) fn push_operation(&mut self, id: OperationId) {
        self.operations.push(id);
    }
}

/// A node representing one whole data entity.
#[derive(Debug)]
pub struct EntityNode<K> {
    /// Canonical identity, the value handed to query callbacks.
    identity: K,

    /// Components keyed by kind, enumerated in insertion order.
    components: IndexMap<ComponentKind, ComponentNode>,

    /// Set once the entity has been reported during the current query.
    reported: Cell<bool>,
}

impl<K> EntityNode<K> {
    pub(crate) fn new(identity: K) -> Self {
        Self {
            identity,
            components: IndexMap::new(),
            reported: Cell::new(false),
        }
    }

    /// Get the canonical identity of this entity.
    pub fn identity(&self) -> &K {
        &self.identity
    }

    /// Iterate over the entity's components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentNode> {
        self.components.values()
    }

    /// Get a component by kind.
    pub fn component(&self, kind: &ComponentKind) -> Option<&ComponentNode> {
        self.components.get(kind)
    }

    /// Iterate over every operation owned by this entity, component by
    /// component.
    pub fn operations(&self) -> impl Iterator<Item = OperationId> + '_ {
        self.components
            .values()
            .flat_map(|component| component.operations.iter().copied())
    }

    /// Whether the entity was reported by the last query that touched it.
    pub fn is_reported(&self) -> bool {
        self.reported.get()
    }

    pub(crate) fn set_reported(&self, reported: bool) {
        self.reported.set(reported);
    }

    pub(crate) fn component_mut(&mut self, kind: ComponentKind) -> &mut ComponentNode {
        self.components
            .entry(kind.clone())
            .or_insert_with(|| ComponentNode::new(kind))
    }
}

/// An operation node: the atomic vertex of the dependency graph.
#[derive(Debug)]
pub struct OperationNode {
    /// Entity owning the component this operation belongs to.
    owner: EntityIndex,

    /// Kind of the owning component.
    component: ComponentKind,

    name: String,

    /// Relations leaving this operation.
    outlinks: SmallVec<[RelationId; 2]>,

    /// Relations arriving at this operation.
    inlinks: SmallVec<[RelationId; 2]>,

    /// Set once the operation has been queued or followed during the
    /// current query.
    scheduled: Cell<bool>,
}

impl OperationNode {
    pub(crate) fn new(owner: EntityIndex, component: ComponentKind, name: String) -> Self {
        Self {
            owner,
            component,
            name,
            outlinks: SmallVec::new(),
            inlinks: SmallVec::new(),
            scheduled: Cell::new(false),
        }
    }

    /// Index of the owning entity.
    pub fn owner(&self) -> EntityIndex {
        self.owner
    }

    /// Kind of the owning component.
    pub fn component(&self) -> &ComponentKind {
        &self.component
    }

    /// Get the operation's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing relations, in insertion order.
    pub fn outlinks(&self) -> &[RelationId] {
        &self.outlinks
    }

    /// Incoming relations, in insertion order.
    pub fn inlinks(&self) -> &[RelationId] {
        &self.inlinks
    }

    /// Whether the operation was scheduled by the last query that touched it.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled.get()
    }

    pub(crate) fn set_scheduled(&self, scheduled: bool) {
        self.scheduled.set(scheduled);
    }

    pub(crate) fn push_outlink(&mut self, id: RelationId) {
        self.outlinks.push(id);
    }

    pub(crate) fn push_inlink(&mut self, id: RelationId) {
        self.inlinks.push(id);
    }
}
