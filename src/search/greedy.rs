use super::{reverse_path, settle_trivial};
use crate::error::{SearchError, SearchResult};
use crate::geometry::euclidean;
use crate::graph::PlanningGraph;
use fxhash::FxHashSet;
use grid_util::point::Point;
use itertools::Itertools;
use log::{trace, warn};
use std::cmp::Ordering;

struct Candidate {
    /// Straight line distance to the goal.
    h: f64,
    node: Point,
    arena_index: usize,
}

impl Candidate {
    fn priority(&self, other: &Candidate) -> Ordering {
        self.h
            .partial_cmp(&other.h)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (self.node.x, self.node.y).cmp(&(other.node.x, other.node.y)))
    }
}

/// Greedy best-first search. Always extends the frontier entry closest to the goal, ignoring the
/// cost already travelled, and returns the first path to reach it.
///
/// A node may sit on the frontier several times; repeated entries are skipped when popped.
pub fn search<G: PlanningGraph + ?Sized>(graph: &G, start: Point, goal: Point) -> SearchResult {
    if let Some(settled) = settle_trivial(graph, start, goal) {
        return settled;
    }
    let mut arena: Vec<(Point, usize)> = vec![(start, usize::MAX)];
    let mut frontier = vec![Candidate {
        h: euclidean(&start, &goal),
        node: start,
        arena_index: 0,
    }];
    let mut visited = FxHashSet::default();

    // Linear scan for the first minimum keeps insertion order among full ties.
    while let Some(position) = frontier.iter().position_min_by(|a, b| a.priority(b)) {
        let Candidate {
            node, arena_index, ..
        } = frontier.remove(position);
        if node == goal {
            trace!("greedy: reached {} after {} expansions", goal, visited.len());
            return Ok(reverse_path(|i| arena.get(i).copied(), arena_index));
        }
        if !visited.insert(node) {
            continue;
        }
        for &next in graph.neighbors(&node) {
            if !visited.contains(&next) {
                arena.push((next, arena_index));
                frontier.push(Candidate {
                    h: euclidean(&next, &goal),
                    node: next,
                    arena_index: arena.len() - 1,
                });
            }
        }
    }
    warn!("greedy: frontier exhausted between {} and {}", start, goal);
    Err(SearchError::NoPathFound { start, goal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_graphs::Wired;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn follows_the_heuristic_not_the_cost() {
        // The hop to (6, 4) looks closer to the goal but the route through it is longer
        let graph = Wired::new(&[
            ((0, 0), (6, 4)),
            ((6, 4), (10, 0)),
            ((0, 0), (-1, 0)),
            ((-1, 0), (10, 0)),
        ]);
        let path = search(&graph, p(0, 0), p(10, 0)).unwrap();
        assert_eq!(path, vec![p(0, 0), p(6, 4), p(10, 0)]);
        assert!(crate::path_cost(&path) > 12.0);
    }

    #[test]
    fn equal_distances_break_on_coordinates() {
        let graph = Wired::new(&[
            ((0, 0), (1, 2)),
            ((0, 0), (-1, 2)),
            ((1, 2), (0, 4)),
            ((-1, 2), (0, 4)),
        ]);
        assert_eq!(
            search(&graph, p(0, 0), p(0, 4)),
            Ok(vec![p(0, 0), p(-1, 2), p(0, 4)])
        );
    }

    #[test]
    fn dead_end_backtracks() {
        let graph = Wired::new(&[((0, 0), (4, 0)), ((0, 0), (0, -3)), ((0, -3), (5, -1))]);
        assert_eq!(
            search(&graph, p(0, 0), p(5, -1)),
            Ok(vec![p(0, 0), p(0, -3), p(5, -1)])
        );
    }
}
