use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::gen_stub_pyfunction;
use routelab_core::algo::complexity::{self, DEFAULT_SIZES};

use crate::config::{PyEngineConfig, engine_config};
use crate::convert::{to_py_err, to_python};

/// Measure how the algorithms scale with route size
///
/// Every algorithm is run on deterministic synthetic routes of the given
/// sizes. Consecutive sizes are compared against O(n log n) growth.
///
/// Parameters
/// ----------
/// sizes : list[int], optional
///     Route sizes in nodes, default [10, 20, 30, 50, 100]
/// config : EngineConfig, optional
///
/// Returns
/// -------
/// dict
///     ``{"sizes": [...], "scaling": [...]}``
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (sizes=None, config=None))]
pub fn complexity_report(
    py: Python<'_>,
    sizes: Option<Vec<usize>>,
    config: Option<&PyEngineConfig>,
) -> PyResult<Py<PyAny>> {
    let sizes = sizes.unwrap_or_else(|| DEFAULT_SIZES.to_vec());
    let config = engine_config(config);

    let report = py
        .detach(|| complexity::complexity_report(&sizes, &config))
        .map_err(to_py_err)?;

    to_python(py, &report)
}
