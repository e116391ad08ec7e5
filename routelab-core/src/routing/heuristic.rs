use super::counters::PerformanceCounters;
use crate::{Meters, RouteGraph, RouteNodeId, model::great_circle_distance};

/// Lower bound on the remaining distance between two nodes
pub trait AStarHeuristic {
    fn estimate(&self, graph: &RouteGraph, from: RouteNodeId, to: RouteNodeId) -> Meters;
}

/// Straight-line distance over the earth's surface.
///
/// Admissible on graphs built by this crate because no edge is lighter than
/// the great-circle distance between its endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircleHeuristic;

impl AStarHeuristic for GreatCircleHeuristic {
    fn estimate(&self, graph: &RouteGraph, from: RouteNodeId, to: RouteNodeId) -> Meters {
        great_circle_distance(graph.geometry(from), graph.geometry(to))
    }
}

/// Turns A* into plain Dijkstra
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl AStarHeuristic for ZeroHeuristic {
    fn estimate(&self, _graph: &RouteGraph, _from: RouteNodeId, _to: RouteNodeId) -> Meters {
        0.0
    }
}

/// Binds a heuristic to a graph and charges every evaluation to the run's counters
pub(crate) struct HeuristicProvider<'a, H = GreatCircleHeuristic> {
    graph: &'a RouteGraph,
    heuristic: H,
}

impl<'a, H: AStarHeuristic> HeuristicProvider<'a, H> {
    pub(crate) fn new(graph: &'a RouteGraph, heuristic: H) -> Self {
        Self { graph, heuristic }
    }

    pub(crate) fn estimate(
        &self,
        from: RouteNodeId,
        to: RouteNodeId,
        counters: &mut PerformanceCounters,
    ) -> Meters {
        counters.heuristic_calls += 1;
        self.heuristic.estimate(self.graph, from, to)
    }
}
