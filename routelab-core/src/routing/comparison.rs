use serde::Serialize;

use super::{algorithm::Algorithm, assembler::RouteResult};

/// Results of every algorithm on the same request, plus their summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub results: Vec<RouteResult>,
    pub summary: ComparisonSummary,
}

/// Head-to-head statistics over a set of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub faster_algorithm: Algorithm,
    pub shorter_path: Algorithm,
    /// Fewest nodes explored
    pub more_efficient: Algorithm,
    /// Slowest minus fastest execution time, ms
    pub time_difference: f64,
    /// Longest minus shortest path, km. Infinite if some but not all runs reached the goal.
    pub distance_difference: f64,
    /// Slowest / fastest execution time
    pub speedup_factor: f64,
    /// Percent fewer nodes explored by the most efficient run than by the least efficient
    pub exploration_reduction: f64,
}

impl ComparisonSummary {
    /// Summarizes `results`. Ties go to the earlier result. Returns `None`
    /// for an empty slice.
    pub fn from_results(results: &[RouteResult]) -> Option<Self> {
        let fastest = min_by_key(results, |result| result.execution_time)?;
        let slowest = max_by_key(results, |result| result.execution_time)?;
        let shortest = min_by_key(results, |result| result.total_distance)?;
        let longest = max_by_key(results, |result| result.total_distance)?;
        let leanest = results
            .iter()
            .min_by_key(|result| result.performance.nodes_explored)?;
        let heaviest = results
            .iter()
            .map(|result| result.performance.nodes_explored)
            .max()?;

        let speedup_factor = if fastest.execution_time > 0.0 {
            slowest.execution_time / fastest.execution_time
        } else {
            1.0
        };
        let exploration_reduction = if heaviest > 0 {
            (heaviest - leanest.performance.nodes_explored) as f64 / heaviest as f64 * 100.0
        } else {
            0.0
        };

        Some(Self {
            faster_algorithm: fastest.algorithm,
            shorter_path: shortest.algorithm,
            more_efficient: leanest.algorithm,
            time_difference: slowest.execution_time - fastest.execution_time,
            distance_difference: spread(shortest.total_distance, longest.total_distance),
            speedup_factor,
            exploration_reduction,
        })
    }
}

fn min_by_key(results: &[RouteResult], key: impl Fn(&RouteResult) -> f64) -> Option<&RouteResult> {
    results
        .iter()
        .reduce(|best, result| if key(result) < key(best) { result } else { best })
}

fn max_by_key(results: &[RouteResult], key: impl Fn(&RouteResult) -> f64) -> Option<&RouteResult> {
    results
        .iter()
        .reduce(|best, result| if key(result) > key(best) { result } else { best })
}

// inf - inf would be NaN when nothing was reachable
fn spread(low: f64, high: f64) -> f64 {
    if low == high { 0.0 } else { high - low }
}
