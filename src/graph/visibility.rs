//! Corner-to-corner visibility graph.
//!
//! The shortest obstacle-avoiding path between two points only bends at obstacle corners, so a
//! graph over the corners, with an edge wherever two corners see each other, contains it.
use super::{Adjacency, PlanningGraph};
use crate::geometry::{crosses_interior, segments_intersect};
use crate::world::{CornerBox, Obstacle, WorldBounds};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;

#[derive(Clone, Debug)]
pub struct VisibilityGraph {
    adjacency: Adjacency,
    blockers: Vec<CornerBox>,
    bounds: WorldBounds,
}

impl VisibilityGraph {
    /// Builds the graph over every obstacle corner and the four world corners. Runs in
    /// O(V² · obstacles), which is fine as V is at most `4 · obstacles + 4`.
    pub fn build(obstacles: &[Obstacle], bounds: WorldBounds) -> VisibilityGraph {
        let blockers: Vec<CornerBox> = obstacles.iter().map(Obstacle::corner_box).collect();
        let mut adjacency = Adjacency::default();
        for corner in blockers
            .iter()
            .flat_map(CornerBox::corners)
            .chain(bounds.corners())
        {
            adjacency.insert_node(corner);
        }
        let mut graph = VisibilityGraph {
            adjacency,
            blockers,
            bounds,
        };

        let vertices = graph.adjacency.nodes().copied().collect::<Vec<Point>>();
        for (v1, v2) in vertices.iter().tuple_combinations() {
            if graph.is_visible(v1, v2) {
                graph.adjacency.insert_edge(*v1, *v2);
            }
        }
        info!(
            "Built visibility graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Whether the segment p1p2 is unobstructed. A point never sees itself.
    ///
    /// No segment may pass through an obstacle's interior. An endpoint sitting on an obstacle
    /// corner may additionally slide along that obstacle's edges.
    pub fn is_visible(&self, p1: &Point, p2: &Point) -> bool {
        p1 != p2 && !self.blockers.iter().any(|b| blocks(b, p1, p2))
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}

fn blocks(corner_box: &CornerBox, p1: &Point, p2: &Point) -> bool {
    if crosses_interior(p1, p2, corner_box) {
        return true;
    }
    // Touching the outline only blocks segments that do not start at one of its corners.
    !(corner_box.has_corner(p1) || corner_box.has_corner(p2))
        && corner_box
            .edges()
            .iter()
            .any(|(start, end)| segments_intersect(p1, p2, start, end))
}

impl PlanningGraph for VisibilityGraph {
    fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    fn adjacency_mut(&mut self) -> &mut Adjacency {
        &mut self.adjacency
    }

    fn temporary_links(&self, point: &Point) -> Option<Vec<Point>> {
        if !self.bounds.contains(point) {
            return None;
        }
        Some(
            self.adjacency
                .nodes()
                .filter(|v| self.is_visible(point, v))
                .copied()
                .collect(),
        )
    }

    fn kind(&self) -> &'static str {
        "visibility"
    }
}
