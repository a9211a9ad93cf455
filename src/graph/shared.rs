use super::PlanningGraph;
use crate::error::SearchResult;
use crate::search::SearchAlgorithm;
use grid_util::point::Point;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A planning graph owned behind a mutex so that several agents, possibly on different threads,
/// can query it. Every query holds the lock for its whole admit, search and release sequence, so
/// temporary nodes of two queries never coexist.
#[derive(Debug)]
pub struct SharedPlanner<G> {
    graph: Arc<Mutex<G>>,
}

impl<G> Clone for SharedPlanner<G> {
    fn clone(&self) -> Self {
        SharedPlanner {
            graph: Arc::clone(&self.graph),
        }
    }
}

impl<G: PlanningGraph> SharedPlanner<G> {
    pub fn new(graph: G) -> SharedPlanner<G> {
        SharedPlanner {
            graph: Arc::new(Mutex::new(graph)),
        }
    }

    // The scope guard releases temporary nodes during unwinding, so a poisoned graph is still
    // consistent and can keep serving queries.
    fn lock(&self) -> MutexGuard<'_, G> {
        self.graph.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn find_path(&self, start: Point, goal: Point, algorithm: SearchAlgorithm) -> SearchResult {
        self.lock().find_path(start, goal, algorithm)
    }

    /// Read access to the static graph between queries.
    pub fn with_graph<R>(&self, f: impl FnOnce(&G) -> R) -> R {
        f(&self.lock())
    }

    /// Swaps in a graph rebuilt for a new level and returns the old one.
    pub fn replace(&self, graph: G) -> G {
        std::mem::replace(&mut *self.lock(), graph)
    }
}
