use super::{reverse_path, settle_trivial};
use crate::error::{SearchError, SearchResult};
use crate::geometry::euclidean;
use crate::graph::{FxIndexMap, PlanningGraph};
use fxhash::FxHashSet;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use log::{trace, warn};
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

struct SmallestCostHolder<C, K> {
    estimated_cost: C,
    cost: C,
    key: K,
    index: usize,
}

impl<C: PartialOrd, K: Ord> Eq for SmallestCostHolder<C, K> {}

impl<C: PartialOrd, K: Ord> PartialEq for SmallestCostHolder<C, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: PartialOrd, K: Ord> PartialOrd for SmallestCostHolder<C, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PartialOrd, K: Ord> Ord for SmallestCostHolder<C, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimate first, then the deeper node, then the smaller key. Costs are never
        // NaN, incomparable values are treated as equal.
        match other.estimated_cost.partial_cmp(&self.estimated_cost) {
            Some(Ordering::Equal) | None => match self.cost.partial_cmp(&other.cost) {
                Some(Ordering::Equal) | None => other.key.cmp(&self.key),
                Some(s) => s,
            },
            Some(s) => s,
        }
    }
}

/// Generic A* core. Returns the path from `start` to the first node accepted by `success`
/// together with its cost.
///
/// `heuristic` must be consistent for the result to be optimal. Ties on the estimate go to the
/// node with the larger cost so far, remaining ties to the smallest `tie_key`. Expanded nodes are
/// closed and never expanded again.
pub fn astar<N, C, K, FN, IN, FH, FK, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut tie_key: FK,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
    K: Ord,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FK: FnMut(&N) -> K,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        key: tie_key(start),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut closed = FxHashSet::default();

    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, &(_, best))) = parents.get_index(index) else {
                continue;
            };
            if success(node) {
                trace!("A*: success after {} expansions", closed.len());
                let path = reverse_path(
                    |i| parents.get_index(i).map(|(n, &(p, _))| (n.clone(), p)),
                    index,
                );
                return Some((path, cost));
            }
            // A node is pushed again whenever a cheaper way to it is found, only the cheapest
            // entry gets expanded.
            if cost > best || !closed.insert(index) {
                continue;
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let (h, k, n) = match parents.entry(successor) {
                Vacant(e) => {
                    let h = heuristic(e.key());
                    let k = tie_key(e.key());
                    let n = e.index();
                    e.insert((index, new_cost));
                    (h, k, n)
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost && !closed.contains(&e.index()) {
                        let h = heuristic(e.key());
                        let k = tie_key(e.key());
                        let n = e.index();
                        e.insert((index, new_cost));
                        (h, k, n)
                    } else {
                        continue;
                    }
                }
            };
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                key: k,
                index: n,
            });
        }
    }
    trace!("A*: open set exhausted after {} expansions", closed.len());
    None
}

/// A* over a planning graph with Euclidean edge weights and the straight line heuristic.
pub fn search<G: PlanningGraph + ?Sized>(graph: &G, start: Point, goal: Point) -> SearchResult {
    if let Some(settled) = settle_trivial(graph, start, goal) {
        return settled;
    }
    let result = astar(
        &start,
        move |node| {
            let node = *node;
            graph
                .neighbors(&node)
                .iter()
                .map(move |next| (*next, euclidean(&node, next)))
        },
        |node| euclidean(node, &goal),
        |node| (node.x, node.y),
        |node| *node == goal,
    );
    match result {
        Some((path, _)) => Ok(path),
        None => {
            warn!("A*: open set exhausted between {} and {}", start, goal);
            Err(SearchError::NoPathFound { start, goal })
        }
    }
}
