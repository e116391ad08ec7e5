use std::{fmt, str::FromStr, time::Instant};

use log::trace;
use serde::{Deserialize, Serialize};

use super::{
    astar::{astar, astar_with_heuristic},
    bidirectional::bidirectional_dijkstra,
    counters::PerformanceCounters,
    dijkstra::dijkstra,
    heuristic::AStarHeuristic,
    state::{ExplorationTrace, SearchPath},
};
use crate::{AlgorithmFamily, Error, Meters, RouteGraph, RouteNodeId};

/// Shortest-path strategy. All variants share the same [`Algorithm::search`]
/// contract so comparison mode can iterate over [`Algorithm::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "bidirectional")]
    Bidirectional,
}

impl Algorithm {
    /// Comparison order. The first entry is the efficiency reference.
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::Bidirectional];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Bidirectional => "bidirectional",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
            Algorithm::Bidirectional => "Bidirectional Dijkstra",
        }
    }

    /// Graph family whose shortcut policy this algorithm is run on
    pub fn family(self) -> AlgorithmFamily {
        match self {
            Algorithm::Dijkstra => AlgorithmFamily::Dijkstra,
            Algorithm::AStar => AlgorithmFamily::Astar,
            Algorithm::Bidirectional => AlgorithmFamily::Bidirectional,
        }
    }

    /// Runs the search from `start` to `goal` with fresh counters.
    ///
    /// An unreachable goal is not an error: the result has an empty path and
    /// an infinite distance.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` or `goal` is not a node of `graph`
    pub fn search(
        self,
        graph: &RouteGraph,
        start: RouteNodeId,
        goal: RouteNodeId,
    ) -> Result<PathResult, Error> {
        instrumented(self, graph, start, goal, |counters| match self {
            Algorithm::Dijkstra => dijkstra(graph, start, goal, counters),
            Algorithm::AStar => astar(graph, start, goal, counters),
            Algorithm::Bidirectional => bidirectional_dijkstra(graph, start, goal, counters),
        })
    }
}

/// A* with a caller-supplied heuristic, under the same contract as
/// [`Algorithm::search`].
///
/// The heuristic must be consistent for the returned distance to be optimal.
///
/// # Errors
///
/// Returns an error if `start` or `goal` is not a node of `graph`
pub fn astar_search<H: AStarHeuristic>(
    graph: &RouteGraph,
    start: RouteNodeId,
    goal: RouteNodeId,
    heuristic: H,
) -> Result<PathResult, Error> {
    instrumented(Algorithm::AStar, graph, start, goal, |counters| {
        astar_with_heuristic(graph, start, goal, heuristic, counters)
    })
}

fn instrumented(
    algorithm: Algorithm,
    graph: &RouteGraph,
    start: RouteNodeId,
    goal: RouteNodeId,
    run: impl FnOnce(&mut PerformanceCounters) -> SearchPath,
) -> Result<PathResult, Error> {
    if !graph.contains(start) || !graph.contains(goal) {
        return Err(Error::InvalidNodeIndex);
    }

    let mut counters = PerformanceCounters::new();
    let started = Instant::now();
    let SearchPath {
        nodes,
        distance,
        trace,
    } = run(&mut counters);
    counters.execution_time = started.elapsed();

    trace!(
        "{algorithm}: {} -> {} distance {distance:.1} m, {} nodes explored, {} edges relaxed, {} heuristic calls, {} queue operations",
        start.index(),
        goal.index(),
        counters.nodes_explored,
        counters.edges_relaxed,
        counters.heuristic_calls,
        counters.priority_queue_operations
    );

    Ok(PathResult {
        algorithm,
        path: nodes,
        total_distance: distance,
        counters,
        trace,
    })
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            "bidirectional" | "bidirectional_dijkstra" => Ok(Algorithm::Bidirectional),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// What a request asks for: one algorithm, or all of them side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmSelector {
    Single(Algorithm),
    Compare,
}

impl FromStr for AlgorithmSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("compare") {
            Ok(AlgorithmSelector::Compare)
        } else {
            s.parse().map(AlgorithmSelector::Single)
        }
    }
}

/// Outcome of one search: node path, distance and the run's counters
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub algorithm: Algorithm,
    /// Node ids from start to goal, empty if the goal is unreachable
    pub path: Vec<RouteNodeId>,
    /// `f64::INFINITY` if the goal is unreachable
    pub total_distance: Meters,
    pub counters: PerformanceCounters,
    pub trace: ExplorationTrace,
}

impl PathResult {
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }
}
