//! Instrumented shortest-path search over route graphs and assembly of the
//! externally visible results.

mod algorithm;
mod assembler;
mod astar;
mod bidirectional;
mod comparison;
mod counters;
mod dijkstra;
mod engine;
mod heuristic;
mod state;

pub use algorithm::{Algorithm, AlgorithmSelector, PathResult, astar_search};
pub use assembler::{
    BidirectionalTrace, PerformanceSummary, ResultAssembler, RouteResult, SourceRoute,
    efficiency_ratio,
};
pub use comparison::{ComparisonResult, ComparisonSummary};
pub use counters::PerformanceCounters;
pub use engine::{EngineResponse, RouteRequest, compare_algorithms, compute, find_route};
pub use heuristic::{AStarHeuristic, GreatCircleHeuristic, ZeroHeuristic};
pub use state::{ExplorationTrace, ExploredNode, SearchDirection};
