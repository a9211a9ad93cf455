use grid_util::point::Point;
use thiserror::Error;

/// Failure of a single path query. Neither variant is fatal: callers are expected to treat it as
/// "no route this tick" and ask again later.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("{0} is not a node of the graph")]
    NodeNotInGraph(Point),

    #[error("no path from {start} to {goal}")]
    NoPathFound { start: Point, goal: Point },
}

/// Rejected world description.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    #[error("obstacle centered at {center} has zero side length")]
    ZeroSideLength { center: Point },

    #[error("world bounds ({half_width}, {half_height}) must not be negative")]
    EmptyBounds { half_width: i32, half_height: i32 },
}

/// Ordered points from start to goal inclusive, or the reason no such sequence was produced.
pub type SearchResult = Result<Vec<Point>, SearchError>;

/// Unrecognised algorithm name, see [SearchAlgorithm](crate::search::SearchAlgorithm).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown search algorithm `{0}`, expected one of bfs, greedy, a_star")]
pub struct ParseAlgorithmError(pub String);
