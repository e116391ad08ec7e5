//! Empirical scaling of the search algorithms.
//!
//! Deterministic synthetic routes of increasing size are searched end to end
//! by every algorithm. Consecutive sizes are compared against the
//! `O(n log n)` growth expected from a binary-heap Dijkstra.

use geo::Point;
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::{
    Algorithm, EngineConfig, Error,
    routing::{ComparisonSummary, RouteRequest, compare_algorithms},
};

/// Route sizes analysed when none are given
pub const DEFAULT_SIZES: [usize; 5] = [10, 20, 30, 50, 100];

const ORIGIN: (f64, f64) = (-74.0060, 40.7128);

/// A winding route of `size` points around lower Manhattan.
///
/// The same size always yields the same route, so reports are comparable
/// between runs.
pub fn synthetic_route(size: usize) -> Vec<Point<f64>> {
    let (lng, lat) = ORIGIN;
    (0..size)
        .map(|i| {
            let t = i as f64;
            Point::new(
                lng + t * 0.0009 + (t * 0.7).sin() * 0.0004,
                lat + t * 0.0005 + (t * 0.45).cos() * 0.0006,
            )
        })
        .collect()
}

/// Measurements of one algorithm on one route size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmMeasurement {
    pub algorithm: Algorithm,
    /// ms
    pub execution_time: f64,
    pub nodes_explored: usize,
    pub edges_relaxed: usize,
    pub priority_queue_operations: usize,
    pub efficiency_ratio: f64,
    /// km
    pub total_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeReport {
    pub size: usize,
    pub graph_nodes: usize,
    pub measurements: Vec<AlgorithmMeasurement>,
    pub summary: ComparisonSummary,
}

/// Growth of one algorithm between two consecutive sizes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmScaling {
    pub algorithm: Algorithm,
    /// 1.0 when the smaller run was too fast to time
    pub time_ratio: f64,
    pub exploration_ratio: f64,
    /// Time grew slower than the `O(n log n)` expectation
    pub within_expectation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingStep {
    pub from: usize,
    pub to: usize,
    pub size_ratio: f64,
    /// `size_ratio * log2(to) / log2(from)`
    pub expected_ratio: f64,
    pub algorithms: Vec<AlgorithmScaling>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub sizes: Vec<SizeReport>,
    pub scaling: Vec<ScalingStep>,
}

/// Expected growth factor of an `O(n log n)` algorithm from `from` to `to` nodes
pub fn expected_scaling(from: usize, to: usize) -> f64 {
    let (from, to) = (from as f64, to as f64);
    to / from * to.log2() / from.log2()
}

fn ratio(current: f64, previous: f64) -> f64 {
    if previous > 0.0 { current / previous } else { 1.0 }
}

/// Compares every algorithm on synthetic routes of the given sizes.
///
/// Sizes are sorted and deduplicated. The node budget is raised where needed
/// so that each graph has exactly `size` nodes.
///
/// # Errors
///
/// Returns an error if no size is given, if a size is smaller than 2 or if
/// `config` is invalid
pub fn complexity_report(sizes: &[usize], config: &EngineConfig) -> Result<ComplexityReport, Error> {
    config.validate()?;
    let sizes: Vec<usize> = sizes.iter().copied().sorted_unstable().dedup().collect();
    match sizes.first() {
        None => return Err(Error::InvalidData("no route sizes to analyse".to_string())),
        Some(&smallest) if smallest < 2 => return Err(Error::InsufficientGeometry(smallest)),
        Some(_) => {}
    }

    let reports = sizes
        .iter()
        .map(|&size| analyse_size(size, config))
        .collect::<Result<Vec<_>, _>>()?;

    let scaling = reports
        .iter()
        .tuple_windows()
        .map(|(previous, current)| scaling_step(previous, current))
        .collect();

    Ok(ComplexityReport {
        sizes: reports,
        scaling,
    })
}

fn analyse_size(size: usize, config: &EngineConfig) -> Result<SizeReport, Error> {
    let config = config.clone().with_node_budget(config.node_budget.max(size));
    let request = RouteRequest::new(synthetic_route(size));
    let comparison = compare_algorithms(&request, &config)?;

    let measurements: Vec<_> = comparison
        .results
        .iter()
        .map(|result| AlgorithmMeasurement {
            algorithm: result.algorithm,
            execution_time: result.execution_time,
            nodes_explored: result.performance.nodes_explored,
            edges_relaxed: result.performance.edges_relaxed,
            priority_queue_operations: result.performance.priority_queue_operations,
            efficiency_ratio: result.performance.efficiency_ratio,
            total_distance: result.total_distance,
        })
        .collect();

    let graph_nodes = comparison
        .results
        .first()
        .map_or(0, |result| result.performance.graph_nodes);

    info!(
        "Size {size}: {}",
        measurements
            .iter()
            .map(|m| format!("{} {:.3} ms / {} nodes", m.algorithm, m.execution_time, m.nodes_explored))
            .join(", ")
    );

    Ok(SizeReport {
        size,
        graph_nodes,
        measurements,
        summary: comparison.summary,
    })
}

fn scaling_step(previous: &SizeReport, current: &SizeReport) -> ScalingStep {
    let expected_ratio = expected_scaling(previous.size, current.size);

    let algorithms = previous
        .measurements
        .iter()
        .zip(&current.measurements)
        .map(|(before, after)| {
            let time_ratio = ratio(after.execution_time, before.execution_time);
            AlgorithmScaling {
                algorithm: after.algorithm,
                time_ratio,
                exploration_ratio: ratio(after.nodes_explored as f64, before.nodes_explored as f64),
                within_expectation: time_ratio < expected_ratio,
            }
        })
        .collect();

    ScalingStep {
        from: previous.size,
        to: current.size,
        size_ratio: current.size as f64 / previous.size as f64,
        expected_ratio,
        algorithms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_routes_are_deterministic() {
        assert_eq!(synthetic_route(25), synthetic_route(25));
        assert_eq!(synthetic_route(25)[..10], synthetic_route(10)[..]);
    }

    #[test]
    fn expected_scaling_follows_n_log_n() {
        // 10 -> 20: 2 * log2(20) / log2(10)
        let expected = 2.0 * 20f64.log2() / 10f64.log2();
        assert!((expected_scaling(10, 20) - expected).abs() < 1e-12);
        assert!((expected_scaling(16, 16) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn report_covers_sorted_unique_sizes() {
        let report = complexity_report(&[30, 10, 20, 10], &EngineConfig::default()).unwrap();

        let sizes: Vec<_> = report.sizes.iter().map(|size| size.size).collect();
        assert_eq!(sizes, vec![10, 20, 30]);
        assert_eq!(report.scaling.len(), 2);
        assert_eq!((report.scaling[0].from, report.scaling[0].to), (10, 20));

        for size in &report.sizes {
            assert_eq!(size.graph_nodes, size.size);
            assert_eq!(size.measurements.len(), Algorithm::ALL.len());
            assert!(size.measurements.iter().all(|m| m.total_distance.is_finite()));
        }
    }

    #[test]
    fn budget_is_raised_to_fit_large_sizes() {
        let config = EngineConfig::default().with_node_budget(16);
        let report = complexity_report(&[40], &config).unwrap();
        assert_eq!(report.sizes[0].graph_nodes, 40);
        assert!(report.scaling.is_empty());
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        let config = EngineConfig::default();
        assert_eq!(
            complexity_report(&[1, 10], &config),
            Err(Error::InsufficientGeometry(1))
        );
        assert!(matches!(
            complexity_report(&[], &config),
            Err(Error::InvalidData(_))
        ));
        assert_eq!(
            complexity_report(&[10], &config.clone().with_node_budget(1)),
            Err(Error::InvalidNodeBudget(1))
        );
    }
}
