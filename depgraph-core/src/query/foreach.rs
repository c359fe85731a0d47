//! Query entry points.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use super::markers;
use super::traverse::{self, Direction};
use crate::error::QueryError;
use crate::graph::Graph;

impl<K> Graph<K>
where
    K: Eq + Hash + Debug,
{
    /// Invoke `callback` once for every entity that transitively depends on
    /// `start`, excluding `start` itself.
    ///
    /// Returns the number of callback invocations. An entity that is not in
    /// the graph yields `Ok(0)` without invoking the callback.
    pub fn for_each_dependent<F>(&self, start: &K, callback: F) -> Result<usize, QueryError>
    where
        F: FnMut(&K),
    {
        self.for_each_directed(start, Direction::Forward, callback)
    }

    /// Invoke `callback` once for every entity that `start` transitively
    /// depends on, excluding `start` itself.
    ///
    /// Relations arriving from the time source are not followed. Returns the
    /// number of callback invocations; an entity that is not in the graph
    /// yields `Ok(0)`.
    pub fn for_each_ancestor<F>(&self, start: &K, callback: F) -> Result<usize, QueryError>
    where
        F: FnMut(&K),
    {
        self.for_each_directed(start, Direction::Backward, callback)
    }

    /// Walk from `start` in the given direction.
    pub fn for_each_directed<F>(
        &self,
        start: &K,
        direction: Direction,
        callback: F,
    ) -> Result<usize, QueryError>
    where
        F: FnMut(&K),
    {
        let _guard = self.enter_query()?;

        let Some(start_node) = self.find_entity(start) else {
            // Entities outside the graph have nothing to report.
            debug!(%direction, ?start, "start entity is not in the graph");
            return Ok(0);
        };

        markers::clear(self);
        let stats = traverse::walk(self, start_node, direction, callback);
        debug!(
            %direction,
            ?start,
            reported = stats.reported,
            visited = stats.visited,
            queued = stats.queued,
            "query finished"
        );
        Ok(stats.reported)
    }

    /// Collect the entities depending on `start`, in reporting order.
    pub fn dependents_of(&self, start: &K) -> Result<Vec<K>, QueryError>
    where
        K: Clone,
    {
        let mut found = Vec::new();
        self.for_each_dependent(start, |id| found.push(id.clone()))?;
        Ok(found)
    }

    /// Collect the entities `start` depends on, in reporting order.
    pub fn ancestors_of(&self, start: &K) -> Result<Vec<K>, QueryError>
    where
        K: Clone,
    {
        let mut found = Vec::new();
        self.for_each_ancestor(start, |id| found.push(id.clone()))?;
        Ok(found)
    }
}

impl<K> Graph<K> {
    /// Invoke `callback` once for every entity in the graph, in insertion
    /// order.
    ///
    /// Uses no markers, so it may be called from inside another query's
    /// callback.
    pub fn for_each_entity<F>(&self, mut callback: F)
    where
        F: FnMut(&K),
    {
        for entity in self.entities() {
            callback(entity.identity());
        }
    }
}

/// Report every entity that transitively depends on `start`.
pub fn for_each_dependent_entity<K, F>(
    graph: &Graph<K>,
    start: &K,
    callback: F,
) -> Result<usize, QueryError>
where
    K: Eq + Hash + Debug,
    F: FnMut(&K),
{
    graph.for_each_dependent(start, callback)
}

/// Report every entity that `start` transitively depends on.
pub fn for_each_ancestor_entity<K, F>(
    graph: &Graph<K>,
    start: &K,
    callback: F,
) -> Result<usize, QueryError>
where
    K: Eq + Hash + Debug,
    F: FnMut(&K),
{
    graph.for_each_ancestor(start, callback)
}

/// Report every entity in the graph.
pub fn for_each_entity<K, F>(graph: &Graph<K>, callback: F)
where
    F: FnMut(&K),
{
    graph.for_each_entity(callback);
}
