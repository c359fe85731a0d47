//! Reachability Queries
//!
//! This module answers three questions about a built graph:
//!
//! - which entities transitively depend on a given entity
//!   ([`Graph::for_each_dependent`])
//! - which entities a given entity transitively depends on
//!   ([`Graph::for_each_ancestor`])
//! - which entities exist at all ([`Graph::for_each_entity`])
//!
//! # Markers
//!
//! The directional queries keep their visitation state on the nodes
//! themselves: a `scheduled` bit per operation and a `reported` bit per
//! entity. Every query clears both before it starts and leaves them set when
//! it returns. A query callback must not start another directional query on
//! the same graph; doing so returns [`QueryError::Reentrant`].
//!
//! # Ordering
//!
//! Each reachable entity is reported exactly once. The order is deterministic
//! for a given graph but is not a topological order.
//!
//! [`QueryError::Reentrant`]: crate::error::QueryError::Reentrant

mod foreach;
mod markers;
mod traverse;

pub use foreach::{for_each_ancestor_entity, for_each_dependent_entity, for_each_entity};
pub use traverse::Direction;
