use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::define_stub_info_gatherer;

use analysis::complexity_report;
use config::PyEngineConfig;
use routing::{compare_algorithms, find_route};

pub mod analysis;
pub mod config;
mod convert;
pub mod routing;

/// A Python module implemented in Rust.
#[pymodule]
fn routelab(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyEngineConfig>()?;

    m.add_function(wrap_pyfunction!(find_route, m)?)?;
    m.add_function(wrap_pyfunction!(compare_algorithms, m)?)?;

    m.add_function(wrap_pyfunction!(complexity_report, m)?)?;
    Ok(())
}

#[cfg(feature = "stubgen")]
define_stub_info_gatherer!(stub_info);
