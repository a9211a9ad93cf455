//! # topo_planning
//!
//! Topological path planning among square obstacles. Two interchangeable graphs are built from the
//! same world description:
//!
//! - a [visibility graph](https://en.wikipedia.org/wiki/Visibility_graph) over obstacle corners,
//!   which yields the shortest obstacle-avoiding routes, and
//! - a clearance graph over grid cells roughly equidistant from their two nearest obstacles, a
//!   discrete stand-in for the
//!   [generalized Voronoi diagram](https://en.wikipedia.org/wiki/Voronoi_diagram), which keeps
//!   routes away from walls.
//!
//! Both implement [PlanningGraph] and answer queries with breadth-first, greedy best-first or
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search. Query endpoints are spliced in
//! as temporary nodes for the duration of one search; [PlanningGraph::find_path] takes care of
//! releasing them.
//!
//! ```
//! use topo_planning::{
//!     Obstacle, PlanningGraph, Point, SearchAlgorithm, VisibilityGraph, WorldBounds,
//! };
//!
//! let obstacle = Obstacle::new(Point::new(0, 0), 4).unwrap();
//! let mut graph = VisibilityGraph::build(&[obstacle], WorldBounds::square(10).unwrap());
//! let path = graph
//!     .find_path(Point::new(-9, 0), Point::new(9, 1), SearchAlgorithm::AStar)
//!     .unwrap();
//! assert_eq!(path.first(), Some(&Point::new(-9, 0)));
//! ```
pub mod config;
pub mod connectivity;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod search;
pub mod world;

pub use crate::config::ClearanceConfig;
pub use crate::error::{ParseAlgorithmError, SearchError, SearchResult, WorldError};
pub use crate::graph::clearance::{ClearanceField, ClearanceGraph};
pub use crate::graph::shared::SharedPlanner;
pub use crate::graph::visibility::VisibilityGraph;
pub use crate::graph::{Adjacency, PlanningGraph, TemporaryEndpoints};
pub use crate::search::SearchAlgorithm;
pub use crate::world::{CornerBox, Obstacle, WorldBounds};
pub use grid_util::point::Point;

use itertools::Itertools;

/// Maximum difference between the two smallest obstacle clearances of an equidistant cell.
pub const EQUIDISTANCE_TOLERANCE: f64 = 0.7;
/// Node threshold used when there are fewer than two obstacles.
pub const SPARSE_CLEARANCE: f64 = 2.0;
/// Node threshold applied regardless of equidistance.
pub const OPEN_CLEARANCE: f64 = 2.5;
pub const EDGE_MIN_CLEARANCE: f64 = 0.8;
pub const TEMPORARY_MIN_CLEARANCE: f64 = 0.5;
pub const CONNECTION_RADIUS: f64 = 2.0;
pub const TEMPORARY_CONNECTION_RADIUS: f64 = 5.0;
/// Fewest intervals a corridor is split into when checking clearance along it.
pub const MIN_CORRIDOR_SAMPLES: usize = 3;
/// Inline capacity of neighbour lists.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Total Euclidean length of a path.
pub fn path_cost(path: &[Point]) -> f64 {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| geometry::euclidean(a, b))
        .sum()
}
