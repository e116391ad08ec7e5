use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pymethods};
use routelab_core::{DEFAULT_NODE_BUDGET, EngineConfig};

use crate::convert::to_py_err;

/// EngineConfig
///
/// Settings shared by every route computation: the node budget used when
/// sampling the route polyline, the fallback average speed for durations and
/// the shortcut policy of each algorithm's graph.
///
/// Example:
///
/// .. code-block:: python
///
///     config = EngineConfig(node_budget=80)
///     result = find_route(polyline, "astar", config=config)
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "EngineConfig")]
#[derive(Clone)]
pub struct PyEngineConfig {
    pub(crate) inner: EngineConfig,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyEngineConfig {
    #[new]
    #[pyo3(signature = (node_budget=DEFAULT_NODE_BUDGET, average_speed_kmh=40.0))]
    pub fn new(node_budget: usize, average_speed_kmh: f64) -> PyResult<Self> {
        let inner = EngineConfig {
            node_budget,
            average_speed_kmh,
            ..EngineConfig::default()
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Builds a configuration from JSON, including per-algorithm shortcut
    /// policies. Missing fields keep their defaults.
    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        let inner: EngineConfig = serde_json::from_str(json)
            .map_err(|e| PyValueError::new_err(format!("Invalid engine config: {e}")))?;
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner)
            .map_err(|e| PyValueError::new_err(format!("Failed to serialize engine config: {e}")))
    }

    #[getter]
    fn node_budget(&self) -> usize {
        self.inner.node_budget
    }

    #[getter]
    fn average_speed_kmh(&self) -> f64 {
        self.inner.average_speed_kmh
    }

    fn __repr__(&self) -> String {
        format!(
            "EngineConfig(node_budget={}, average_speed_kmh={})",
            self.inner.node_budget, self.inner.average_speed_kmh
        )
    }
}

/// Configuration passed from Python, or the defaults
pub(crate) fn engine_config(config: Option<&PyEngineConfig>) -> EngineConfig {
    config.map_or_else(EngineConfig::default, |config| config.inner.clone())
}
