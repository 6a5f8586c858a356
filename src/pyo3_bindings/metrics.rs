use numpy::PyReadonlyArray1;
use pyo3::prelude::*;

use crate::metrics;

#[pyfunction]
fn rust_nse(
    observed: PyReadonlyArray1<'_, f64>,
    simulated: PyReadonlyArray1<'_, f64>,
) -> PyResult<f64> {
    Ok(metrics::nse(observed.as_slice()?, simulated.as_slice()?))
}

#[pyfunction]
fn rust_log_nse(
    observed: PyReadonlyArray1<'_, f64>,
    simulated: PyReadonlyArray1<'_, f64>,
) -> PyResult<f64> {
    Ok(metrics::log_nse(observed.as_slice()?, simulated.as_slice()?))
}

#[pyfunction]
fn rust_kge(
    observed: PyReadonlyArray1<'_, f64>,
    simulated: PyReadonlyArray1<'_, f64>,
) -> PyResult<f64> {
    Ok(metrics::kge(observed.as_slice()?, simulated.as_slice()?))
}

#[pyfunction]
fn rust_rmse(
    observed: PyReadonlyArray1<'_, f64>,
    simulated: PyReadonlyArray1<'_, f64>,
) -> PyResult<f64> {
    Ok(metrics::rmse(observed.as_slice()?, simulated.as_slice()?))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = parent.py();
    let m = PyModule::new(py, "metrics")?;
    m.add_function(wrap_pyfunction!(rust_nse, &m)?)?;
    m.add_function(wrap_pyfunction!(rust_log_nse, &m)?)?;
    m.add_function(wrap_pyfunction!(rust_kge, &m)?)?;
    m.add_function(wrap_pyfunction!(rust_rmse, &m)?)?;
    parent.add_submodule(&m)?;
    py.import("sys")?
        .getattr("modules")?
        .set_item("gr4j._core.metrics", &m)?;
    Ok(())
}
