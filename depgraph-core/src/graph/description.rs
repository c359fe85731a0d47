//! Serializable graph descriptions.
//!
//! A description lists entities with their component-grouped operations, and
//! relations between operations addressed by `entity/component/operation`
//! paths. The literal path `time_source` names the graph-wide time source.
//!
//! ```json
//! {
//!   "entities": [
//!     { "name": "cube", "components": { "transform": ["local", "world"] } },
//!     { "name": "lamp", "components": { "transform": ["local"] } }
//!   ],
//!   "relations": [
//!     { "from": "time_source", "to": "cube/transform/local" },
//!     { "from": "cube/transform/local", "to": "cube/transform/world" },
//!     { "from": "cube/transform/world", "to": "lamp/transform/local", "name": "parent" }
//!   ]
//! }
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::GraphBuilder;
use super::node::{ComponentKind, NodeRef, OperationId};
use super::Graph;
use crate::error::{GraphError, Result};

/// Path naming the graph-wide time source in relation descriptions.
pub const TIME_SOURCE: &str = "time_source";

/// A complete graph, as read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub entities: Vec<EntityDescription>,
    #[serde(default)]
    pub relations: Vec<RelationDescription>,
}

/// One entity and its operations, grouped by component name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescription {
    pub name: String,
    #[serde(default)]
    pub components: IndexMap<String, Vec<String>>,
}

/// A relation between two operation paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDescription {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GraphDescription {
    /// Parse a description from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the description to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a graph keyed by entity name.
    pub fn build(&self) -> Result<Graph<String>> {
        let mut builder = GraphBuilder::new();
        let mut paths: HashMap<String, OperationId> = HashMap::new();

        for entity in &self.entities {
            check_name(&entity.name)?;
            builder.add_entity(entity.name.clone())?;
            for (component, operations) in &entity.components {
                check_name(component)?;
                let kind = ComponentKind::from(component.as_str());
                builder.add_component(&entity.name, kind.clone())?;
                for operation in operations {
                    check_name(operation)?;
                    let path = format!("{}/{}/{}", entity.name, component, operation);
                    let Entry::Vacant(slot) = paths.entry(path) else {
                        return Err(GraphError::DuplicateOperation(format!(
                            "{}/{}/{}",
                            entity.name, component, operation
                        )));
                    };
                    let id = builder.add_operation(&entity.name, kind.clone(), operation.clone())?;
                    slot.insert(id);
                }
            }
        }

        for relation in &self.relations {
            let from = resolve(&paths, &relation.from)?;
            let to = resolve(&paths, &relation.to)?;
            builder.add_named_relation(from, to, relation.name.clone())?;
        }

        let graph = builder.build();
        debug!(
            entities = graph.entity_count(),
            operations = graph.operation_count(),
            relations = graph.relation_count(),
            "built graph from description"
        );
        Ok(graph)
    }
}

/// Names become path segments, so they must be non-empty and free of `/`.
fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') {
        return Err(GraphError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn resolve(paths: &HashMap<String, OperationId>, path: &str) -> Result<NodeRef> {
    if path == TIME_SOURCE {
        return Ok(NodeRef::TimeSource);
    }
    if path.split('/').count() != 3 {
        return Err(GraphError::MalformedPath(path.to_string()));
    }
    paths
        .get(path)
        .copied()
        .map(NodeRef::Operation)
        .ok_or_else(|| GraphError::UnresolvedPath(path.to_string()))
}
