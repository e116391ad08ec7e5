pub use crate::DEFAULT_NODE_BUDGET;

// Request pipeline
pub use crate::loading::{AlgorithmFamily, EngineConfig, ShortcutPolicy, build_route_graph, sample_route};
pub use crate::routing::{
    Algorithm, AlgorithmSelector, ComparisonResult, EngineResponse, RouteRequest, RouteResult,
    compare_algorithms, compute, find_route,
};

// Graph and search internals
pub use crate::model::{EdgeKind, RouteGraph};
pub use crate::routing::{ExplorationTrace, PathResult, PerformanceCounters};
pub use crate::{Meters, RouteNodeId};

// Complexity analysis
pub use crate::algo::complexity::{ComplexityReport, complexity_report, synthetic_route};
