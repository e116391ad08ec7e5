use itertools::Itertools;
use log::warn;
use serde::Serialize;

use super::{algorithm::Algorithm, algorithm::PathResult, state::ExploredNode};
use crate::{Meters, RouteGraph, RouteNodeId};

/// Real-world length and travel time of the route the graph was sampled from
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourceRoute {
    pub distance: Meters,
    pub duration_seconds: f64,
}

/// Flattened counters as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub nodes_explored: usize,
    pub edges_relaxed: usize,
    pub heuristic_calls: usize,
    pub priority_queue_operations: usize,
    /// Reference nodes explored / nodes explored * 100. Relative pruning
    /// power against the reference run, not an absolute measure.
    pub efficiency_ratio: f64,
    pub forward_nodes_explored: usize,
    pub reverse_nodes_explored: usize,
    pub peak_frontier_size: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
}

/// Frontier traces of a bidirectional run, as `[lat, lng]` pairs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidirectionalTrace {
    pub forward_explored: Vec<[f64; 2]>,
    pub reverse_explored: Vec<[f64; 2]>,
    pub meeting_node: Option<[f64; 2]>,
}

/// Externally visible result of one algorithm run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub algorithm: Algorithm,
    /// `[lat, lng]` pairs along the path
    pub coordinates: Vec<[f64; 2]>,
    /// Kilometers, infinite when no path exists
    pub total_distance: f64,
    pub duration_minutes: f64,
    /// Milliseconds spent in the search loop
    pub execution_time: f64,
    pub performance: PerformanceSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidirectional: Option<BidirectionalTrace>,
}

impl RouteResult {
    pub fn is_reachable(&self) -> bool {
        !self.coordinates.is_empty()
    }
}

/// Efficiency of a run against a reference exploration count.
///
/// A run that explored nothing (start == goal) is reported at 100%.
pub fn efficiency_ratio(reference_nodes_explored: usize, nodes_explored: usize) -> f64 {
    if nodes_explored == 0 {
        return 100.0;
    }
    reference_nodes_explored as f64 / nodes_explored as f64 * 100.0
}

/// Turns node-level search output back into coordinates and display metrics
pub struct ResultAssembler<'a> {
    graph: &'a RouteGraph,
    source: SourceRoute,
    average_speed_kmh: f64,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(graph: &'a RouteGraph, source: SourceRoute, average_speed_kmh: f64) -> Self {
        Self {
            graph,
            source,
            average_speed_kmh,
        }
    }

    pub fn assemble(&self, result: &PathResult, reference_nodes_explored: usize) -> RouteResult {
        let counters = &result.counters;
        let distance = self.path_distance(&result.path);

        let bidirectional = (result.algorithm == Algorithm::Bidirectional).then(|| BidirectionalTrace {
            forward_explored: self.explored_coordinates(&result.trace.forward),
            reverse_explored: self.explored_coordinates(&result.trace.reverse),
            meeting_node: result.trace.meeting_node.map(|node| self.lat_lng(node)),
        });

        RouteResult {
            algorithm: result.algorithm,
            coordinates: result.path.iter().map(|&node| self.lat_lng(node)).collect(),
            total_distance: distance / 1000.0,
            duration_minutes: self.duration_minutes(distance),
            execution_time: counters.execution_time_ms(),
            performance: PerformanceSummary {
                nodes_explored: counters.nodes_explored,
                edges_relaxed: counters.edges_relaxed,
                heuristic_calls: counters.heuristic_calls,
                priority_queue_operations: counters.priority_queue_operations,
                efficiency_ratio: efficiency_ratio(reference_nodes_explored, counters.nodes_explored),
                forward_nodes_explored: counters.forward_nodes_explored,
                reverse_nodes_explored: counters.reverse_nodes_explored,
                peak_frontier_size: counters.peak_frontier_size,
                graph_nodes: self.graph.node_count(),
                graph_edges: self.graph.edge_count(),
            },
            bidirectional,
        }
    }

    /// Sum of the traversed edge weights, infinite for an empty path
    pub fn path_distance(&self, path: &[RouteNodeId]) -> Meters {
        if path.is_empty() {
            return f64::INFINITY;
        }
        path.iter()
            .tuple_windows()
            .map(|(&from, &to)| {
                self.graph
                    .edge_weight_between(from, to)
                    .unwrap_or(f64::INFINITY)
            })
            .sum()
    }

    /// Scales the source route's real duration by the share of its distance
    /// covered, falling back to the configured average speed
    pub fn duration_minutes(&self, distance: Meters) -> f64 {
        if !distance.is_finite() {
            return f64::INFINITY;
        }
        let SourceRoute {
            distance: source_distance,
            duration_seconds,
        } = self.source;

        let seconds = if source_distance > 0.0 && duration_seconds > 0.0 {
            duration_seconds * distance / source_distance
        } else {
            warn!("Source route has no usable distance/duration, using average speed");
            distance / (self.average_speed_kmh / 3.6)
        };
        seconds / 60.0
    }

    fn lat_lng(&self, node: RouteNodeId) -> [f64; 2] {
        self.graph
            .node(node)
            .map_or([f64::NAN, f64::NAN], |node| node.lat_lng())
    }

    fn explored_coordinates(&self, explored: &[ExploredNode]) -> Vec<[f64; 2]> {
        explored.iter().map(|entry| self.lat_lng(entry.node)).collect()
    }
}
