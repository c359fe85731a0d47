//! Error types.
//!
//! Construction errors and query errors are kept apart: a built graph is
//! structurally valid, so the only thing a query can trip over is being
//! entered while another query on the same graph is still running.

use thiserror::Error;

use crate::graph::{NodeClass, OperationId};

/// Result type for graph construction.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while building a graph or loading a graph description.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("entity {0} is already in the graph")]
    DuplicateEntity(String),

    #[error("entity {0} is not in the graph")]
    UnknownEntity(String),

    #[error("operation {0:?} does not exist")]
    UnknownOperation(OperationId),

    /// An operation may only feed other operations.
    #[error("operation {from:?} cannot feed a {to} node")]
    NonOperationTarget { from: OperationId, to: NodeClass },

    /// Description names become path segments and may not contain `/`.
    #[error("invalid name `{0}`: names must be non-empty and must not contain `/`")]
    InvalidName(String),

    #[error("operation path `{0}` is defined more than once")]
    DuplicateOperation(String),

    #[error("relation does not touch any operation")]
    DetachedRelation,

    #[error("malformed operation path `{0}`, expected `entity/component/operation`")]
    MalformedPath(String),

    #[error("operation path `{0}` does not name a known operation")]
    UnresolvedPath(String),

    #[error("invalid graph description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by traversal queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A query callback tried to start another query on the same graph.
    #[error("a query is already walking this graph")]
    Reentrant,
}
