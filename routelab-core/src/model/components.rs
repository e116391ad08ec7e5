//! Synthetic graph components - nodes and edges

use geo::{Distance, Haversine, Point};
use serde::Serialize;

use crate::Meters;

/// Node sampled from the route polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteNode {
    /// Position along the sampled route, equal to the node index
    pub sequence: usize,
    /// Node coordinates (x = longitude, y = latitude)
    pub geometry: Point<f64>,
}

impl RouteNode {
    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lng(&self) -> f64 {
        self.geometry.x()
    }

    /// Coordinates as a `[lat, lng]` pair
    pub fn lat_lng(&self) -> [f64; 2] {
        [self.lat(), self.lng()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Connects two consecutive sampled nodes
    Primary,
    /// Synthetic jump added by the graph builder
    Shortcut,
}

/// Directed weighted edge of the synthetic graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEdge {
    pub weight: Meters,
    pub kind: EdgeKind,
}

impl RouteEdge {
    pub fn is_primary(&self) -> bool {
        self.kind == EdgeKind::Primary
    }
}

/// Great-circle distance between two points in meters
pub fn great_circle_distance(from: Point<f64>, to: Point<f64>) -> Meters {
    Haversine.distance(from, to)
}
