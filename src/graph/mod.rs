use crate::error::SearchResult;
use crate::search::SearchAlgorithm;
use crate::N_SMALLVEC_SIZE;
use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexMap;
use log::debug;
use smallvec::SmallVec;
use std::ops::Deref;

pub mod clearance;
pub mod shared;
pub mod visibility;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type Neighbours = SmallVec<[Point; N_SMALLVEC_SIZE]>;

/// Undirected adjacency store shared by every graph kind.
///
/// Edges are kept symmetric, free of self loops and free of duplicates by construction: the only
/// way to add an edge is [insert_edge](Self::insert_edge), which writes both directions or
/// neither. Nodes iterate in insertion order, which keeps builds and searches reproducible.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    nodes: FxIndexMap<Point, Neighbours>,
    temporary: FxHashSet<Point>,
}

impl Adjacency {
    /// Inserts an isolated node, returns false if it was already present.
    pub fn insert_node(&mut self, point: Point) -> bool {
        if self.nodes.contains_key(&point) {
            return false;
        }
        self.nodes.insert(point, Neighbours::new());
        true
    }

    /// Links two existing, distinct nodes. Returns whether a new edge was created.
    pub fn insert_edge(&mut self, a: Point, b: Point) -> bool {
        if a == b || !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return false;
        }
        if self.nodes[&a].contains(&b) {
            return false;
        }
        self.nodes[&a].push(b);
        self.nodes[&b].push(a);
        true
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.nodes.contains_key(point)
    }

    pub fn neighbours(&self, point: &Point) -> &[Point] {
        self.nodes.get(point).map(|n| n.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.len()).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Point> {
        self.nodes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point, &[Point])> {
        self.nodes.iter().map(|(p, n)| (p, n.as_slice()))
    }

    pub fn is_temporary(&self, point: &Point) -> bool {
        self.temporary.contains(point)
    }

    pub fn temporary_count(&self) -> usize {
        self.temporary.len()
    }

    /// Inserts `point` as a temporary node linked to `links`. No-op if the point already exists.
    pub fn insert_temporary(
        &mut self,
        point: Point,
        links: impl IntoIterator<Item = Point>,
    ) -> bool {
        if !self.insert_node(point) {
            return false;
        }
        self.temporary.insert(point);
        for link in links {
            self.insert_edge(point, link);
        }
        true
    }

    /// Removes a temporary node and every edge pointing at it. Static nodes are never removed.
    pub fn remove_temporary(&mut self, point: &Point) -> bool {
        if !self.temporary.remove(point) {
            return false;
        }
        if let Some(neighbours) = self.nodes.shift_remove(point) {
            for neighbour in neighbours {
                if let Some(list) = self.nodes.get_mut(&neighbour) {
                    list.retain(|p| p != point);
                }
            }
        }
        true
    }

    /// Checks that every edge is present in both directions, that no node links to itself and
    /// that no neighbour list holds a duplicate.
    pub fn is_consistent(&self) -> bool {
        self.nodes.iter().all(|(p, neighbours)| {
            neighbours.iter().enumerate().all(|(i, q)| {
                q != p
                    && !neighbours[..i].contains(q)
                    && self.nodes.get(q).map_or(false, |back| back.contains(p))
            })
        })
    }
}

/// Common interface of the planning graphs.
///
/// Implementors only describe their storage and the rule deciding which nodes a temporary point
/// connects to; admission, removal and search are written once here.
pub trait PlanningGraph {
    fn adjacency(&self) -> &Adjacency;
    fn adjacency_mut(&mut self) -> &mut Adjacency;

    /// The nodes `point` would be linked to if admitted as a temporary node, or [None] if the
    /// point cannot be part of this graph at all.
    fn temporary_links(&self, point: &Point) -> Option<Vec<Point>>;

    /// Short name used in log output.
    fn kind(&self) -> &'static str;

    fn neighbors(&self, point: &Point) -> &[Point] {
        self.adjacency().neighbours(point)
    }
    fn contains(&self, point: &Point) -> bool {
        self.adjacency().contains(point)
    }
    fn node_count(&self) -> usize {
        self.adjacency().len()
    }
    fn edge_count(&self) -> usize {
        self.adjacency().edge_count()
    }

    /// Splices `point` into the graph using the graph's own connectivity rule. Returns whether the
    /// point was newly inserted; existing nodes and refused points leave the graph untouched.
    fn add_temporary_node(&mut self, point: Point) -> bool {
        if self.contains(&point) {
            return false;
        }
        match self.temporary_links(&point) {
            Some(links) => {
                debug!(
                    "{}: admitting {} with {} links",
                    self.kind(),
                    point,
                    links.len()
                );
                self.adjacency_mut().insert_temporary(point, links)
            }
            None => {
                debug!("{}: refusing temporary node {}", self.kind(), point);
                false
            }
        }
    }

    /// Removes a node previously inserted by [add_temporary_node](Self::add_temporary_node).
    fn remove_temporary_node(&mut self, point: &Point) -> bool {
        let removed = self.adjacency_mut().remove_temporary(point);
        if removed {
            debug!("{}: released temporary node {}", self.kind(), point);
        }
        removed
    }

    /// Runs a single search on the graph as it currently is.
    fn search(&self, start: Point, goal: Point, algorithm: SearchAlgorithm) -> SearchResult {
        algorithm.search(self, start, goal)
    }

    /// Admits both endpoints, searches, and releases whatever was admitted, on every exit path.
    fn find_path(&mut self, start: Point, goal: Point, algorithm: SearchAlgorithm) -> SearchResult {
        let endpoints = TemporaryEndpoints::admit(self, &[start, goal]);
        endpoints.search(start, goal, algorithm)
    }
}

/// Scope guard over a graph with query endpoints spliced in. Dropping it removes exactly the
/// nodes it inserted, so the static graph is restored even if the search unwinds.
pub struct TemporaryEndpoints<'a, G: PlanningGraph + ?Sized> {
    graph: &'a mut G,
    inserted: SmallVec<[Point; 2]>,
}

impl<'a, G: PlanningGraph + ?Sized> TemporaryEndpoints<'a, G> {
    pub fn admit(graph: &'a mut G, points: &[Point]) -> Self {
        let mut inserted = SmallVec::new();
        for &point in points {
            if graph.add_temporary_node(point) {
                inserted.push(point);
            }
        }
        TemporaryEndpoints { graph, inserted }
    }

    /// Points that were not already part of the graph and will be removed on drop.
    pub fn inserted(&self) -> &[Point] {
        &self.inserted
    }
}

impl<G: PlanningGraph + ?Sized> Deref for TemporaryEndpoints<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.graph
    }
}

impl<G: PlanningGraph + ?Sized> Drop for TemporaryEndpoints<'_, G> {
    fn drop(&mut self) {
        for point in self.inserted.iter().rev() {
            self.graph.remove_temporary_node(point);
        }
    }
}
