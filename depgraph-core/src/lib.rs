//! Depgraph Core
//!
//! This crate answers reachability queries over an evaluation dependency
//! graph. The graph records how computed attributes of data entities depend
//! on one another:
//!
//! - Entities own components ("transform", "geometry", ...)
//! - Components own an ordered list of operations
//! - Relations connect operations; `to` is recomputed after `from`
//!
//! Relations live at operation granularity, but queries report whole
//! entities, each at most once.
//!
//! # Architecture
//!
//! - `graph`: node model, builder and JSON graph descriptions
//! - `query`: the dependent, ancestor and full-enumeration queries
//! - `shared`: a lock-protected handle for querying from several threads
//! - `error`: construction and query errors
//!
//! # Example
//!
//! ```rust
//! use depgraph_core::graph::{ComponentKind, GraphBuilder};
//!
//! let mut builder = GraphBuilder::new();
//! for name in ["a", "b", "c"] {
//!     builder.add_entity(name).unwrap();
//! }
//! let a = builder.add_operation(&"a", ComponentKind::Transform, "eval").unwrap();
//! let b = builder.add_operation(&"b", ComponentKind::Transform, "eval").unwrap();
//! let c = builder.add_operation(&"c", ComponentKind::Transform, "eval").unwrap();
//! builder.add_relation(a, b).unwrap();
//! builder.add_relation(b, c).unwrap();
//! let graph = builder.build();
//!
//! let mut dependents = Vec::new();
//! graph.for_each_dependent(&"a", |id| dependents.push(*id)).unwrap();
//! assert_eq!(dependents, vec!["b", "c"]);
//!
//! assert_eq!(graph.ancestors_of(&"c").unwrap(), vec!["b", "a"]);
//! ```

pub mod error;
pub mod graph;
pub mod query;
pub mod shared;

pub use error::{GraphError, QueryError};
pub use graph::{Graph, GraphBuilder, GraphDescription};
pub use query::Direction;
pub use shared::SharedGraph;
