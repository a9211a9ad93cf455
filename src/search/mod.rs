//! Path searches over any [PlanningGraph].
//!
//! Every algorithm is a pure function of the graph as it is at call time. Missing endpoints fail
//! with [SearchError::NodeNotInGraph] before anything is expanded, and `start == goal` yields the
//! single point path.
mod astar;
mod bfs;
mod greedy;

pub use astar::astar;

use crate::error::{ParseAlgorithmError, SearchError, SearchResult};
use crate::graph::PlanningGraph;
use core::fmt;
use grid_util::point::Point;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchAlgorithm {
    /// Fewest edges.
    BreadthFirst,
    /// Always extends the frontier node closest to the goal. Fast, not optimal.
    Greedy,
    /// Least total Euclidean length.
    AStar,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 3] = [
        SearchAlgorithm::BreadthFirst,
        SearchAlgorithm::Greedy,
        SearchAlgorithm::AStar,
    ];

    pub fn search<G: PlanningGraph + ?Sized>(
        self,
        graph: &G,
        start: Point,
        goal: Point,
    ) -> SearchResult {
        match self {
            SearchAlgorithm::BreadthFirst => bfs::search(graph, start, goal),
            SearchAlgorithm::Greedy => greedy::search(graph, start, goal),
            SearchAlgorithm::AStar => astar::search(graph, start, goal),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchAlgorithm::BreadthFirst => "bfs",
            SearchAlgorithm::Greedy => "greedy",
            SearchAlgorithm::AStar => "a_star",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| ParseAlgorithmError(s.to_owned()))
    }
}

/// Decides queries that need no expansion: absent endpoints and `start == goal`.
fn settle_trivial<G: PlanningGraph + ?Sized>(
    graph: &G,
    start: Point,
    goal: Point,
) -> Option<SearchResult> {
    if !graph.contains(&start) {
        return Some(Err(SearchError::NodeNotInGraph(start)));
    }
    if !graph.contains(&goal) {
        return Some(Err(SearchError::NodeNotInGraph(goal)));
    }
    if start == goal {
        return Some(Ok(vec![start]));
    }
    None
}

/// Follows parent indices from `end` back to the root and returns the nodes root first. `lookup`
/// yields a node together with its parent index and returns [None] past the root.
fn reverse_path<N, F>(lookup: F, end: usize) -> Vec<N>
where
    F: Fn(usize) -> Option<(N, usize)>,
{
    let mut path: Vec<N> = itertools::unfold(end, |i| {
        lookup(*i).map(|(node, parent)| {
            *i = parent;
            node
        })
    })
    .collect();
    path.reverse();
    path
}


#[cfg(test)]
mod tests {
    use super::test_graphs::Wired;
    use super::*;

    #[test]
    fn names_round_trip() {
        for algorithm in SearchAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<SearchAlgorithm>(), Ok(algorithm));
        }
        assert_eq!("a_star".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::AStar));
        assert_eq!(
            "dijkstra".parse::<SearchAlgorithm>(),
            Err(ParseAlgorithmError("dijkstra".to_owned()))
        );
    }

    #[test]
    fn trivial_and_missing_endpoints() {
        let graph = Wired::new(&[((0, 0), (1, 0)), ((5, 5), (6, 5))]);
        let a = Point::new(0, 0);
        let missing = Point::new(3, 3);
        for algorithm in SearchAlgorithm::ALL {
            assert_eq!(graph.search(a, a, algorithm), Ok(vec![a]));
            assert_eq!(
                graph.search(missing, a, algorithm),
                Err(SearchError::NodeNotInGraph(missing))
            );
            assert_eq!(
                graph.search(a, missing, algorithm),
                Err(SearchError::NodeNotInGraph(missing))
            );
            assert_eq!(
                graph.search(a, Point::new(6, 5), algorithm),
                Err(SearchError::NoPathFound {
                    start: a,
                    goal: Point::new(6, 5)
                })
            );
        }
    }

    #[test]
    fn reverse_path_stops_at_root() {
        let arena = [(10, usize::MAX), (11, 0), (12, 1), (99, 0)];
        let path = reverse_path(|i| arena.get(i).copied(), 2);
        assert_eq!(path, vec![10, 11, 12]);
    }
}
