//! Voronoi-style clearance graph.
//!
//! Nodes are grid cells that sit roughly halfway between their two nearest obstacles, or far away
//! from all of them. Edges are short corridors whose every sample keeps a minimum distance to the
//! nearest obstacle. Paths on this graph are longer than on the visibility graph but keep away
//! from walls.
use super::{Adjacency, PlanningGraph};
use crate::config::ClearanceConfig;
use crate::geometry::corridor_samples;
use crate::world::{Obstacle, WorldBounds};
use core::fmt;
use grid_util::point::Point;
use log::info;

/// Distance to the nearest obstacle for every cell of the world, [None] for blocked cells.
#[derive(Clone, Debug)]
pub struct ClearanceField {
    bounds: WorldBounds,
    cells: Vec<Option<f64>>,
}

impl ClearanceField {
    fn index(&self, point: &Point) -> Option<usize> {
        if !self.bounds.contains(point) {
            return None;
        }
        let column = (point.x + self.bounds.half_width) as usize;
        let row = (point.y + self.bounds.half_height) as usize;
        Some(column * self.bounds.height() + row)
    }

    /// Clearance of a free cell inside the world. Infinite when there are no obstacles.
    pub fn clearance(&self, point: &Point) -> Option<f64> {
        self.index(point).and_then(|ix| self.cells[ix])
    }

    pub fn is_free(&self, point: &Point) -> bool {
        self.clearance(point).is_some()
    }

    /// Whether every sample of the corridor between `a` and `b` is a free cell with at least
    /// `min_clearance`.
    pub fn corridor_is_safe(&self, a: &Point, b: &Point, min_clearance: f64) -> bool {
        corridor_samples(a, b)
            .iter()
            .all(|s| self.clearance(s).map_or(false, |c| c >= min_clearance))
    }
}

#[derive(Clone, Debug)]
pub struct ClearanceGraph {
    adjacency: Adjacency,
    field: ClearanceField,
    config: ClearanceConfig,
}

/// The two smallest per-obstacle distances of a cell.
fn two_nearest(point: &Point, obstacles: &[Obstacle]) -> (f64, f64) {
    obstacles
        .iter()
        .map(|o| o.distance_to(point))
        .fold((f64::INFINITY, f64::INFINITY), |(first, second), d| {
            if d < first {
                (d, first)
            } else if d < second {
                (first, d)
            } else {
                (first, second)
            }
        })
}

/// Integer offsets no farther than `radius` from the origin, excluding the origin itself.
fn offsets_within(radius: f64) -> Vec<(i32, i32)> {
    let reach = radius.max(0.0).floor() as i32;
    let mut offsets = Vec::new();
    for dx in -reach..=reach {
        for dy in -reach..=reach {
            if (dx, dy) != (0, 0) && (dx as f64).hypot(dy as f64) <= radius {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

impl ClearanceGraph {
    pub fn build(obstacles: &[Obstacle], bounds: WorldBounds) -> ClearanceGraph {
        ClearanceGraph::build_with_config(obstacles, bounds, ClearanceConfig::default())
    }

    pub fn build_with_config(
        obstacles: &[Obstacle],
        bounds: WorldBounds,
        config: ClearanceConfig,
    ) -> ClearanceGraph {
        let mut cells = Vec::with_capacity(bounds.width() * bounds.height());
        let mut adjacency = Adjacency::default();
        for point in bounds.cells() {
            if obstacles.iter().any(|o| o.in_collision(point.x, point.y)) {
                cells.push(None);
                continue;
            }
            let (first, second) = two_nearest(&point, obstacles);
            cells.push(Some(first));

            let equidistant =
                obstacles.len() >= 2 && (second - first).abs() < config.equidistance_tolerance;
            let sparse = obstacles.len() < 2 && first > config.sparse_clearance;
            if equidistant || sparse || first > config.open_clearance {
                adjacency.insert_node(point);
            }
        }
        let field = ClearanceField { bounds, cells };

        // Half of the offsets suffice since every edge is inserted in both directions.
        let forward = offsets_within(config.connection_radius)
            .into_iter()
            .filter(|&offset| offset > (0, 0))
            .collect::<Vec<_>>();
        let nodes = adjacency.nodes().copied().collect::<Vec<Point>>();
        for node in &nodes {
            for &(dx, dy) in &forward {
                let other = Point::new(node.x + dx, node.y + dy);
                if adjacency.contains(&other)
                    && field.corridor_is_safe(node, &other, config.edge_min_clearance)
                {
                    adjacency.insert_edge(*node, other);
                }
            }
        }

        let graph = ClearanceGraph {
            adjacency,
            field,
            config,
        };
        info!(
            "Built clearance graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Cached clearance of a free cell, [None] for blocked or out of bounds cells.
    pub fn clearance(&self, point: &Point) -> Option<f64> {
        self.field.clearance(point)
    }

    pub fn field(&self) -> &ClearanceField {
        &self.field
    }

    pub fn config(&self) -> &ClearanceConfig {
        &self.config
    }

    pub fn bounds(&self) -> WorldBounds {
        self.field.bounds
    }
}

impl PlanningGraph for ClearanceGraph {
    fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    fn adjacency_mut(&mut self) -> &mut Adjacency {
        &mut self.adjacency
    }

    fn temporary_links(&self, point: &Point) -> Option<Vec<Point>> {
        if !self.field.is_free(point) {
            return None;
        }
        let min_clearance = self.config.temporary_min_clearance;
        Some(
            offsets_within(self.config.temporary_connection_radius)
                .into_iter()
                .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
                .filter(|other| {
                    self.adjacency.contains(other)
                        && self.field.corridor_is_safe(point, other, min_clearance)
                })
                .collect(),
        )
    }

    fn kind(&self) -> &'static str {
        "clearance"
    }
}

impl fmt::Display for ClearanceGraph {
    /// Top row first: `#` blocked, `o` node, `.` free cell.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bounds = self.bounds();
        for y in (-bounds.half_height..=bounds.half_height).rev() {
            let row = (-bounds.half_width..=bounds.half_width)
                .map(|x| {
                    let p = Point::new(x, y);
                    if !self.field.is_free(&p) {
                        '#'
                    } else if self.contains(&p) {
                        'o'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
