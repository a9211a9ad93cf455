use super::{reverse_path, settle_trivial};
use crate::error::{SearchError, SearchResult};
use crate::graph::PlanningGraph;
use fxhash::FxHashSet;
use grid_util::point::Point;
use log::{trace, warn};
use std::collections::VecDeque;

/// Breadth-first search. Returns a path with the fewest edges; among those, the one whose nodes
/// were discovered first in neighbour order.
pub fn search<G: PlanningGraph + ?Sized>(graph: &G, start: Point, goal: Point) -> SearchResult {
    if let Some(settled) = settle_trivial(graph, start, goal) {
        return settled;
    }
    // Every discovered node with the arena index of the node it was discovered from.
    let mut arena: Vec<(Point, usize)> = vec![(start, usize::MAX)];
    let mut queue = VecDeque::from([0]);
    let mut discovered = FxHashSet::default();
    discovered.insert(start);

    while let Some(index) = queue.pop_front() {
        let node = arena[index].0;
        if node == goal {
            trace!("bfs: reached {} after discovering {} nodes", goal, arena.len());
            return Ok(reverse_path(|i| arena.get(i).copied(), index));
        }
        for &next in graph.neighbors(&node) {
            if discovered.insert(next) {
                arena.push((next, index));
                queue.push_back(arena.len() - 1);
            }
        }
    }
    warn!("bfs: frontier exhausted between {} and {}", start, goal);
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
    fn fewest_edges_wins_over_length() {
        // Two hops through a far away node versus three short hops
        let graph = Wired::new(&[
            ((0, 0), (5, 9)),
            ((5, 9), (4, 0)),
            ((0, 0), (1, 0)),
            ((1, 0), (2, 0)),
            ((2, 0), (4, 0)),
        ]);
        assert_eq!(
            search(&graph, p(0, 0), p(4, 0)),
            Ok(vec![p(0, 0), p(5, 9), p(4, 0)])
        );
    }

    #[test]
    fn ties_follow_neighbour_order() {
        let graph = Wired::new(&[
            ((0, 0), (0, 1)),
            ((0, 0), (1, 0)),
            ((0, 1), (1, 1)),
            ((1, 0), (1, 1)),
        ]);
        assert_eq!(search(&graph, p(0, 0), p(1, 1)), Ok(vec![p(0, 0), p(0, 1), p(1, 1)]));
    }

    #[test]
    fn cycles_terminate() {
        let graph = Wired::new(&[
            ((0, 0), (1, 0)),
            ((1, 0), (1, 1)),
            ((1, 1), (0, 0)),
            ((7, 7), (8, 8)),
        ]);
        assert_eq!(
            search(&graph, p(0, 0), p(8, 8)),
            Err(SearchError::NoPathFound {
                start: p(0, 0),
                goal: p(8, 8)
            })
        );
    }
}
