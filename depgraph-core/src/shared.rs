//! Shared Graph
//!
//! Queries write their markers into the graph, so a [`Graph`] can be moved
//! between threads but never walked from two threads at once. `SharedGraph`
//! puts the graph behind a lock that is held for the full duration of each
//! query.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::error::QueryError;
use crate::graph::Graph;

/// A graph that can be queried from several threads.
#[derive(Debug)]
pub struct SharedGraph<K> {
    inner: Arc<Mutex<Graph<K>>>,
}

impl<K> SharedGraph<K> {
    /// Wrap a built graph.
    pub fn new(graph: Graph<K>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    /// Lock the graph for a sequence of queries.
    ///
    /// Calling a query method of this handle while the guard is alive
    /// deadlocks.
    pub fn lock(&self) -> MutexGuard<'_, Graph<K>> {
        self.inner.lock()
    }

    /// Invoke `callback` for every entity in the graph.
    pub fn for_each_entity<F>(&self, callback: F)
    where
        F: FnMut(&K),
    {
        self.inner.lock().for_each_entity(callback);
    }
}

impl<K> SharedGraph<K>
where
    K: Eq + Hash + Debug,
{
    /// See [`Graph::for_each_dependent`].
    pub fn for_each_dependent<F>(&self, start: &K, callback: F) -> Result<usize, QueryError>
    where
        F: FnMut(&K),
    {
        self.inner.lock().for_each_dependent(start, callback)
    }

    /// See [`Graph::for_each_ancestor`].
    pub fn for_each_ancestor<F>(&self, start: &K, callback: F) -> Result<usize, QueryError>
    where
        F: FnMut(&K),
    {
        self.inner.lock().for_each_ancestor(start, callback)
    }

    pub fn dependents_of(&self, start: &K) -> Result<Vec<K>, QueryError>
    where
        K: Clone,
    {
        self.inner.lock().dependents_of(start)
    }

    pub fn ancestors_of(&self, start: &K) -> Result<Vec<K>, QueryError>
    where
        K: Clone,
    {
        self.inner.lock().ancestors_of(start)
    }
}

impl<K> Clone for SharedGraph<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> From<Graph<K>> for SharedGraph<K> {
    fn from(graph: Graph<K>) -> Self {
        Self::new(graph)
    }
}
