//! Route computation engine for comparing shortest-path algorithms.
//!
//! A street-routing polyline is sampled down to a bounded node set, turned
//! into a synthetic weighted graph and searched with Dijkstra, A* or
//! bidirectional Dijkstra. Every search carries its own performance counters.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{AlgorithmFamily, EngineConfig, ShortcutPolicy, build_route_graph, sample_route};
pub use model::{EdgeKind, RouteEdge, RouteGraph, RouteNode};
pub use routing::{
    Algorithm, AlgorithmSelector, ComparisonResult, ComparisonSummary, EngineResponse,
    PathResult, PerformanceCounters, RouteRequest, RouteResult, astar_search, compare_algorithms,
    compute, find_route,
};

/// Node identifier inside a [`RouteGraph`], equal to the node's position along the sampled route
pub type RouteNodeId = petgraph::graph::NodeIndex;

/// Distances are kept in meters everywhere inside the engine
pub type Meters = f64;

/// Default maximum number of graph nodes sampled from a route
pub const DEFAULT_NODE_BUDGET: usize = 120;
