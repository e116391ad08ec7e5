use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::IntoPyObjectExt;
use pyo3::types::{PyDict, PyList};
use routelab_core::Error;
use serde::Serialize;
use serde_json::Value;

/// Maps engine errors onto Python exceptions: bad input raises `ValueError`,
/// broken engine invariants raise `RuntimeError`
pub(crate) fn to_py_err(error: Error) -> PyErr {
    match error {
        Error::InvalidNodeIndex | Error::GraphInvariant(_) => {
            PyRuntimeError::new_err(format!("Route computation failed: {error}"))
        }
        _ => PyValueError::new_err(error.to_string()),
    }
}

/// Converts any serializable result into plain Python dicts and lists.
///
/// Infinite distances of unreachable routes become `None`.
pub(crate) fn to_python<T: Serialize>(py: Python<'_>, value: &T) -> PyResult<Py<PyAny>> {
    let value = serde_json::to_value(value)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to serialize result: {e}")))?;
    json_to_py(py, &value)
}

fn json_to_py(py: Python<'_>, value: &Value) -> PyResult<Py<PyAny>> {
    match value {
        Value::Null => Ok(py.None()),
        Value::Bool(flag) => (*flag).into_py_any(py),
        Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                int.into_py_any(py)
            } else if let Some(int) = number.as_i64() {
                int.into_py_any(py)
            } else {
                number.as_f64().unwrap_or(f64::NAN).into_py_any(py)
            }
        }
        Value::String(text) => text.as_str().into_py_any(py),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            Ok(list.into_any().unbind())
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (key, item) in map {
                dict.set_item(key, json_to_py(py, item)?)?;
            }
            Ok(dict.into_any().unbind())
        }
    }
}
