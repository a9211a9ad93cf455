//! Connected components of a planning graph, for telling "no path" apart from "not searched".
use crate::graph::PlanningGraph;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;

/// Union-find snapshot of a graph. Later temporary nodes are not reflected; take a new snapshot
/// after admitting endpoints.
#[derive(Clone, Debug)]
pub struct Components {
    nodes: IndexSet<Point, FxBuildHasher>,
    union_find: UnionFind<usize>,
}

impl Components {
    pub fn new<G: PlanningGraph + ?Sized>(graph: &G) -> Components {
        let adjacency = graph.adjacency();
        let nodes = adjacency
            .nodes()
            .copied()
            .collect::<IndexSet<_, FxBuildHasher>>();
        let mut union_find = UnionFind::new(nodes.len());
        for (ix, (_, neighbours)) in adjacency.iter().enumerate() {
            for neighbour in neighbours {
                if let Some(other) = nodes.get_index_of(neighbour) {
                    if other > ix {
                        union_find.union(ix, other);
                    }
                }
            }
        }
        Components { nodes, union_find }
    }

    /// Representative of the component containing `point`.
    pub fn component(&self, point: &Point) -> Option<usize> {
        self.nodes
            .get_index_of(point)
            .map(|ix| self.union_find.find(ix))
    }

    pub fn equiv(&self, a: &Point, b: &Point) -> bool {
        match (self.nodes.get_index_of(a), self.nodes.get_index_of(b)) {
            (Some(a), Some(b)) => self.union_find.equiv(a, b),
            _ => false,
        }
    }

    pub fn count(&self) -> usize {
        (0..self.nodes.len())
            .map(|ix| self.union_find.find(ix))
            .unique()
            .count()
    }
}

/// Whether a path between `a` and `b` exists in the graph as it is now.
pub fn reachable<G: PlanningGraph + ?Sized>(graph: &G, a: &Point, b: &Point) -> bool {
    let reachable = Components::new(graph).equiv(a, b);
    if !reachable {
        info!("{} is not reachable from {}", b, a);
    }
    reachable
}

pub fn component_count<G: PlanningGraph + ?Sized>(graph: &G) -> usize {
    Components::new(graph).count()
}
