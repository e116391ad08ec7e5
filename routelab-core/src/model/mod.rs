//! Data model for the synthetic route graph
//!
//! Contains the node, edge and graph types searched by the routing algorithms.

pub mod components;
pub mod network;

pub use components::{EdgeKind, RouteEdge, RouteNode, great_circle_distance};
pub use network::{IndexedPoint, RouteGraph};
