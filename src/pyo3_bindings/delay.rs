use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::delay::Delay;

/// Sentinel-mode delay: a negative `d` gives all-infinity outflow
/// instead of raising.
#[pyfunction]
fn delay_run<'py>(
    py: Python<'py>,
    d: f64,
    inflow: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let op = Delay::new(d);
    Ok(PyArray1::from_vec(py, op.run(inflow.as_slice()?)))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = parent.py();
    let m = PyModule::new(py, "delay")?;
    m.add_function(wrap_pyfunction!(delay_run, &m)?)?;
    parent.add_submodule(&m)?;
    py.import("sys")?
        .getattr("modules")?
        .set_item("gr4j._core.delay", &m)?;
    Ok(())
}
