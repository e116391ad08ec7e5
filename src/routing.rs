use geo::Point;
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::gen_stub_pyfunction;
use routelab_core::{AlgorithmSelector, RouteRequest, compute};

use crate::config::{PyEngineConfig, engine_config};
use crate::convert::{to_py_err, to_python};

/// Builds an engine request from `(lat, lng)` tuples
pub(crate) fn route_request(
    polyline: Vec<(f64, f64)>,
    start: Option<(f64, f64)>,
    end: Option<(f64, f64)>,
    route_distance: f64,
    route_duration: f64,
) -> RouteRequest {
    let to_point = |(lat, lng): (f64, f64)| Point::new(lng, lat);

    let mut request = RouteRequest::new(polyline.into_iter().map(to_point).collect())
        .with_route_stats(route_distance, route_duration);
    request.start = start.map(to_point);
    request.end = end.map(to_point);
    request
}

/// Find a route over the synthetic graph of a street-routing polyline
///
/// The polyline is sampled down to the configured node budget, turned into a
/// weighted graph and searched with the selected algorithm.
///
/// Parameters
/// ----------
/// polyline : list[tuple[float, float]]
///     Route geometry as (lat, lng) pairs, at least two points
/// algorithm : str, default="dijkstra"
///     One of "dijkstra", "astar" (or "a*"), "bidirectional" or "compare"
/// start, end : tuple[float, float], optional
///     Endpoints, snapped to the nearest sampled node. Default to the first
///     and last point of the polyline.
/// route_distance : float, default=0.0
///     Real route length in meters, used to scale durations
/// route_duration : float, default=0.0
///     Real route duration in seconds
/// config : EngineConfig, optional
///
/// Returns
/// -------
/// dict
///     A single result, or ``{"results": [...], "summary": {...}}`` for "compare".
///     Distances of unreachable goals are None.
///
/// Raises
/// ------
/// ValueError
///     On an unknown algorithm, a polyline with fewer than two points or an
///     invalid configuration
///
/// Notes
/// -----
/// The function releases the GIL during the computation.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (polyline, algorithm="dijkstra", start=None, end=None, route_distance=0.0, route_duration=0.0, config=None))]
#[allow(clippy::too_many_arguments)]
pub fn find_route(
    py: Python<'_>,
    polyline: Vec<(f64, f64)>,
    algorithm: &str,
    start: Option<(f64, f64)>,
    end: Option<(f64, f64)>,
    route_distance: f64,
    route_duration: f64,
    config: Option<&PyEngineConfig>,
) -> PyResult<Py<PyAny>> {
    let selector: AlgorithmSelector = algorithm.parse().map_err(to_py_err)?;
    let request = route_request(polyline, start, end, route_distance, route_duration);
    let config = engine_config(config);

    let response = py
        .detach(|| compute(&request, selector, &config))
        .map_err(to_py_err)?;

    to_python(py, &response)
}

/// Run Dijkstra, A* and bidirectional Dijkstra on the same route
///
/// Each algorithm searches its own graph in parallel. Efficiency ratios are
/// relative to the Dijkstra run.
///
/// Returns
/// -------
/// dict
///     ``{"results": [...], "summary": {...}}``, see ``find_route``
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (polyline, start=None, end=None, route_distance=0.0, route_duration=0.0, config=None))]
pub fn compare_algorithms(
    py: Python<'_>,
    polyline: Vec<(f64, f64)>,
    start: Option<(f64, f64)>,
    end: Option<(f64, f64)>,
    route_distance: f64,
    route_duration: f64,
    config: Option<&PyEngineConfig>,
) -> PyResult<Py<PyAny>> {
    let request = route_request(polyline, start, end, route_distance, route_duration);
    let config = engine_config(config);

    let comparison = py
        .detach(|| routelab_core::compare_algorithms(&request, &config))
        .map_err(to_py_err)?;

    to_python(py, &comparison)
}
