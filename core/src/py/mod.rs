// PyO3-modul: tynne innpakninger rundt JSON-ruten i json_api.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::json_api;

#[pyfunction]
fn analyze_json(json_in: &str) -> PyResult<String> {
    json_api::analyze_json(json_in).map_err(PyValueError::new_err)
}

#[pyfunction]
fn optimize_json(json_in: &str) -> PyResult<String> {
    json_api::optimize_json(json_in).map_err(PyValueError::new_err)
}

#[pyfunction]
fn generate_json(json_in: &str) -> PyResult<String> {
    json_api::generate_json(json_in).map_err(PyValueError::new_err)
}

#[pyfunction]
fn metrics_text() -> String {
    crate::metrics::gather_text()
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn flockweigh_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_json, m)?)?;
    m.add_function(wrap_pyfunction!(optimize_json, m)?)?;
    m.add_function(wrap_pyfunction!(generate_json, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}
