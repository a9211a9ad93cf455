//! Tuning knobs of the clearance graph.
use crate::{
    CONNECTION_RADIUS, EDGE_MIN_CLEARANCE, EQUIDISTANCE_TOLERANCE, OPEN_CLEARANCE,
    SPARSE_CLEARANCE, TEMPORARY_CONNECTION_RADIUS, TEMPORARY_MIN_CLEARANCE,
};

/// Configuration for clearance graph construction and temporary node admission.
///
/// Distances are in grid units. The defaults are the crate level constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClearanceConfig {
    /// A cell is equidistant when its two smallest per-obstacle clearances differ by less than
    /// this. Default: 0.7
    pub equidistance_tolerance: f64,

    /// With fewer than two obstacles, cells whose clearance exceeds this become nodes.
    /// Default: 2.0
    pub sparse_clearance: f64,

    /// Cells whose clearance exceeds this become nodes regardless of equidistance.
    /// Default: 2.5
    pub open_clearance: f64,

    /// Minimum clearance of every corridor sample on a permanent edge. Default: 0.8
    pub edge_min_clearance: f64,

    /// Minimum clearance of every corridor sample on a temporary edge. Default: 0.5
    pub temporary_min_clearance: f64,

    /// Maximum length of a permanent edge. Default: 2.0
    pub connection_radius: f64,

    /// Maximum length of an edge to a temporary node. Default: 5.0
    pub temporary_connection_radius: f64,
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self {
            equidistance_tolerance: EQUIDISTANCE_TOLERANCE,
            sparse_clearance: SPARSE_CLEARANCE,
            open_clearance: OPEN_CLEARANCE,
            edge_min_clearance: EDGE_MIN_CLEARANCE,
            temporary_min_clearance: TEMPORARY_MIN_CLEARANCE,
            connection_radius: CONNECTION_RADIUS,
            temporary_connection_radius: TEMPORARY_CONNECTION_RADIUS,
        }
    }
}

impl ClearanceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equidistance_tolerance(mut self, tolerance: f64) -> Self {
        self.equidistance_tolerance = tolerance;
        self
    }

    pub fn with_sparse_clearance(mut self, clearance: f64) -> Self {
        self.sparse_clearance = clearance;
        self
    }

    pub fn with_open_clearance(mut self, clearance: f64) -> Self {
        self.open_clearance = clearance;
        self
    }

    pub fn with_edge_min_clearance(mut self, clearance: f64) -> Self {
        self.edge_min_clearance = clearance;
        self
    }

    pub fn with_temporary_min_clearance(mut self, clearance: f64) -> Self {
        self.temporary_min_clearance = clearance;
        self
    }

    pub fn with_connection_radius(mut self, radius: f64) -> Self {
        self.connection_radius = radius;
        self
    }

    pub fn with_temporary_connection_radius(mut self, radius: f64) -> Self {
        self.temporary_connection_radius = radius;
        self
    }
}
