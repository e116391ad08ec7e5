use geo::Point;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use super::{
    algorithm::{Algorithm, AlgorithmSelector, PathResult},
    assembler::{ResultAssembler, RouteResult, SourceRoute},
    comparison::{ComparisonResult, ComparisonSummary},
};
use crate::{
    EngineConfig, Error, Meters, RouteGraph, RouteNodeId,
    loading::{build_route_graph, sample_route},
};

/// A route computation request: the street-routing polyline and what is
/// known about the real route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    /// Route geometry in `(lng, lat)` order
    pub polyline: Vec<Point<f64>>,
    /// Snapped to the nearest sampled node, first node when absent
    pub start: Option<Point<f64>>,
    /// Snapped to the nearest sampled node, last node when absent
    pub end: Option<Point<f64>>,
    /// Real route length in meters
    pub route_distance: Meters,
    /// Real route duration in seconds
    pub route_duration: f64,
}

impl RouteRequest {
    pub fn new(polyline: Vec<Point<f64>>) -> Self {
        Self {
            polyline,
            start: None,
            end: None,
            route_distance: 0.0,
            route_duration: 0.0,
        }
    }

    pub fn with_endpoints(mut self, start: Point<f64>, end: Point<f64>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_route_stats(mut self, distance: Meters, duration_seconds: f64) -> Self {
        self.route_distance = distance;
        self.route_duration = duration_seconds;
        self
    }

    fn source_route(&self) -> SourceRoute {
        SourceRoute {
            distance: self.route_distance,
            duration_seconds: self.route_duration,
        }
    }
}

/// Either a single run or a full comparison, depending on the selector
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EngineResponse {
    Single(RouteResult),
    Comparison(ComparisonResult),
}

/// A graph built for one algorithm and the search run on it
struct Run {
    graph: RouteGraph,
    path: PathResult,
}

fn run_algorithm(
    algorithm: Algorithm,
    sampled: &[Point<f64>],
    request: &RouteRequest,
    config: &EngineConfig,
) -> Result<Run, Error> {
    let family = algorithm.family();
    let graph = build_route_graph(sampled, family, config.shortcuts.policy(family))?;
    let (start, goal) = resolve_endpoints(&graph, request)?;
    let path = algorithm.search(&graph, start, goal)?;
    Ok(Run { graph, path })
}

/// Snaps the requested endpoints onto the graph
fn resolve_endpoints(graph: &RouteGraph, request: &RouteRequest) -> Result<(RouteNodeId, RouteNodeId), Error> {
    let last = graph
        .node_count()
        .checked_sub(1)
        .ok_or(Error::InsufficientGeometry(0))?;

    let snap = |point: Option<Point<f64>>, fallback: usize| {
        point
            .and_then(|point| graph.nearest_node(point))
            .unwrap_or(RouteNodeId::new(fallback))
    };

    Ok((snap(request.start, 0), snap(request.end, last)))
}

fn prepare(request: &RouteRequest, config: &EngineConfig) -> Result<Vec<Point<f64>>, Error> {
    config.validate()?;
    if let Some(point) = [request.start, request.end]
        .into_iter()
        .flatten()
        .find(|point| !(point.x().is_finite() && point.y().is_finite()))
    {
        return Err(Error::InvalidData(format!(
            "non-finite endpoint ({}, {})",
            point.y(),
            point.x()
        )));
    }
    sample_route(&request.polyline, config.node_budget)
}

/// Runs one algorithm over the request's route.
///
/// The efficiency ratio is reported against full exploration of the graph.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the polyline has fewer
/// than two usable points
pub fn find_route(
    request: &RouteRequest,
    algorithm: Algorithm,
    config: &EngineConfig,
) -> Result<RouteResult, Error> {
    let sampled = prepare(request, config)?;
    let Run { graph, path } = run_algorithm(algorithm, &sampled, request, config)?;

    let assembler = ResultAssembler::new(&graph, request.source_route(), config.average_speed_kmh);
    Ok(assembler.assemble(&path, graph.node_count()))
}

/// Runs every algorithm in parallel, each on its own graph, and summarizes
/// the results once all runs completed.
///
/// Efficiency ratios are reported against the Dijkstra run.
///
/// # Errors
///
/// Same conditions as [`find_route`]
pub fn compare_algorithms(request: &RouteRequest, config: &EngineConfig) -> Result<ComparisonResult, Error> {
    let sampled = prepare(request, config)?;

    let runs = Algorithm::ALL
        .par_iter()
        .map(|&algorithm| run_algorithm(algorithm, &sampled, request, config))
        .collect::<Result<Vec<_>, _>>()?;

    let reference = runs
        .first()
        .map_or(0, |run| run.path.counters.nodes_explored);
    let source = request.source_route();

    let results: Vec<_> = runs
        .iter()
        .map(|run| {
            ResultAssembler::new(&run.graph, source, config.average_speed_kmh).assemble(&run.path, reference)
        })
        .collect();

    let summary = ComparisonSummary::from_results(&results)
        .ok_or_else(|| Error::InvalidData("comparison produced no results".to_string()))?;

    info!(
        "Compared {} algorithms on {} nodes: fastest {}, most efficient {} ({:.1}% fewer nodes explored)",
        results.len(),
        sampled.len(),
        summary.faster_algorithm,
        summary.more_efficient,
        summary.exploration_reduction
    );

    Ok(ComparisonResult { results, summary })
}

/// Dispatches a request on its algorithm selector
///
/// # Errors
///
/// Same conditions as [`find_route`]
pub fn compute(
    request: &RouteRequest,
    selector: AlgorithmSelector,
    config: &EngineConfig,
) -> Result<EngineResponse, Error> {
    match selector {
        AlgorithmSelector::Single(algorithm) => find_route(request, algorithm, config).map(EngineResponse::Single),
        AlgorithmSelector::Compare => compare_algorithms(request, config).map(EngineResponse::Comparison),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polyline(len: usize) -> Vec<Point<f64>> {
        (0..len)
            .map(|i| {
                let t = i as f64;
                Point::new(-73.99 + t * 0.0004, 40.73 + (t * 0.25).sin() * 0.001)
            })
            .collect()
    }

    #[test]
    fn single_run_uses_graph_size_as_reference() {
        let request = RouteRequest::new(polyline(30)).with_route_stats(2_500.0, 300.0);
        let result = find_route(&request, Algorithm::Dijkstra, &EngineConfig::default()).unwrap();

        assert!(result.is_reachable());
        assert_eq!(result.performance.graph_nodes, 30);
        let expected = 30.0 / result.performance.nodes_explored as f64 * 100.0;
        assert!((result.performance.efficiency_ratio - expected).abs() < 1e-9);
        assert!(result.coordinates.len() >= 2);
    }

    #[test]
    fn endpoints_snap_to_nearest_nodes() {
        let points = polyline(20);
        let request = RouteRequest::new(points.clone()).with_endpoints(points[4], points[15]);
        let result = find_route(&request, Algorithm::AStar, &EngineConfig::default()).unwrap();

        assert_eq!(result.coordinates.first(), Some(&[points[4].y(), points[4].x()]));
        assert_eq!(result.coordinates.last(), Some(&[points[15].y(), points[15].x()]));
    }

    #[test]
    fn comparison_runs_every_algorithm() {
        let request = RouteRequest::new(polyline(80));
        let comparison = compare_algorithms(&request, &EngineConfig::default()).unwrap();

        let algorithms: Vec<_> = comparison.results.iter().map(|result| result.algorithm).collect();
        assert_eq!(algorithms, Algorithm::ALL.to_vec());
        assert_eq!(comparison.results[0].performance.efficiency_ratio, 100.0);
        assert!(comparison.results.iter().all(|result| result.is_reachable()));
        assert!(comparison.results[2].bidirectional.is_some());
    }

    #[test]
    fn compute_dispatches_on_selector() {
        let request = RouteRequest::new(polyline(10));
        let config = EngineConfig::default();
        assert!(matches!(
            compute(&request, AlgorithmSelector::Compare, &config),
            Ok(EngineResponse::Comparison(_))
        ));
        assert!(matches!(
            compute(&request, AlgorithmSelector::Single(Algorithm::Bidirectional), &config),
            Ok(EngineResponse::Single(_))
        ));
    }

    #[test]
    fn short_polyline_is_rejected() {
        let request = RouteRequest::new(polyline(1));
        assert_eq!(
            find_route(&request, Algorithm::Dijkstra, &EngineConfig::default()),
            Err(Error::InsufficientGeometry(1))
        );
    }

    #[test]
    fn non_finite_endpoints_are_rejected() {
        let points = polyline(40);
        let nan = Point::new(f64::NAN, f64::NAN);
        let config = EngineConfig::default();

        let request = RouteRequest::new(points.clone()).with_endpoints(nan, points[39]);
        assert!(matches!(
            find_route(&request, Algorithm::AStar, &config),
            Err(Error::InvalidData(_))
        ));

        let request = RouteRequest::new(points.clone()).with_endpoints(points[0], Point::new(f64::INFINITY, 40.7));
        assert!(matches!(
            compare_algorithms(&request, &config),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_sampling() {
        let request = RouteRequest::new(polyline(10));
        let config = EngineConfig::default().with_node_budget(0);
        assert_eq!(
            compare_algorithms(&request, &config),
            Err(Error::InvalidNodeBudget(0))
        );
    }
}
