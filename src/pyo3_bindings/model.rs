use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::engine::Gr4j;
use crate::params::Parameters;
use crate::run;
use crate::state::State;

#[pyfunction]
#[pyo3(signature = (params, precip, pet, initial_state=None))]
fn gr4j_run<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    precip: PyReadonlyArray1<'py, f64>,
    pet: PyReadonlyArray1<'py, f64>,
    initial_state: Option<PyReadonlyArray1<'py, f64>>,
) -> PyResult<Bound<'py, PyDict>> {
    let p = Parameters::from_array(params.as_slice()?)
        .map_err(pyo3::exceptions::PyValueError::new_err)?;

    let precip_slice = precip.as_slice()?;
    let pet_slice = pet.as_slice()?;

    let state = match &initial_state {
        Some(s) => {
            let s = State::from_slice(s.as_slice()?)
                .map_err(pyo3::exceptions::PyValueError::new_err)?;
            let expected = (2.0 * p.x4).floor() as usize;
            if s.uh_memory.len() != expected {
                return Err(pyo3::exceptions::PyValueError::new_err(format!(
                    "initial state history length {} does not match x4 (expected {})",
                    s.uh_memory.len(),
                    expected
                )));
            }
            Some(s)
        }
        None => None,
    };

    let result = run::run(&p, precip_slice, pet_slice, state.as_ref());

    let dict = PyDict::new(py);
    dict.set_item("pet", PyArray1::from_vec(py, result.pet))?;
    dict.set_item("precip", PyArray1::from_vec(py, result.precip))?;
    dict.set_item(
        "production_store",
        PyArray1::from_vec(py, result.production_store),
    )?;
    dict.set_item("net_rainfall", PyArray1::from_vec(py, result.net_rainfall))?;
    dict.set_item(
        "storage_infiltration",
        PyArray1::from_vec(py, result.storage_infiltration),
    )?;
    dict.set_item("actual_et", PyArray1::from_vec(py, result.actual_et))?;
    dict.set_item("percolation", PyArray1::from_vec(py, result.percolation))?;
    dict.set_item(
        "effective_rainfall",
        PyArray1::from_vec(py, result.effective_rainfall),
    )?;
    dict.set_item("q9", PyArray1::from_vec(py, result.q9))?;
    dict.set_item("q1", PyArray1::from_vec(py, result.q1))?;
    dict.set_item(
        "routing_store",
        PyArray1::from_vec(py, result.routing_store),
    )?;
    dict.set_item("exchange", PyArray1::from_vec(py, result.exchange))?;
    dict.set_item(
        "actual_exchange_routing",
        PyArray1::from_vec(py, result.actual_exchange_routing),
    )?;
    dict.set_item(
        "actual_exchange_direct",
        PyArray1::from_vec(py, result.actual_exchange_direct),
    )?;
    dict.set_item("qr", PyArray1::from_vec(py, result.qr))?;
    dict.set_item("qd", PyArray1::from_vec(py, result.qd))?;
    dict.set_item("qt", PyArray1::from_vec(py, result.qt))?;
    dict.set_item("streamflow", PyArray1::from_vec(py, result.streamflow))?;
    Ok(dict)
}

#[pyfunction]
fn gr4j_step<'py>(
    py: Python<'py>,
    state: PyReadonlyArray1<'py, f64>,
    params: PyReadonlyArray1<'py, f64>,
    precip: f64,
    pet: f64,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyDict>)> {
    let p = Parameters::from_array(params.as_slice()?)
        .map_err(pyo3::exceptions::PyValueError::new_err)?;
    let s = State::from_slice(state.as_slice()?)
        .map_err(pyo3::exceptions::PyValueError::new_err)?;

    let (uh1, uh2) = crate::unit_hydrographs::compute_uh_ordinates(p.x4);
    let (new_state, fluxes) = run::step(&s, &p, precip, pet, &uh1, &uh2);

    let state_arr = PyArray1::from_vec(py, new_state.to_vec());

    let dict = PyDict::new(py);
    dict.set_item("pet", fluxes.pet)?;
    dict.set_item("precip", fluxes.precip)?;
    dict.set_item("production_store", fluxes.production_store)?;
    dict.set_item("net_rainfall", fluxes.net_rainfall)?;
    dict.set_item("storage_infiltration", fluxes.storage_infiltration)?;
    dict.set_item("actual_et", fluxes.actual_et)?;
    dict.set_item("percolation", fluxes.percolation)?;
    dict.set_item("effective_rainfall", fluxes.effective_rainfall)?;
    dict.set_item("q9", fluxes.q9)?;
    dict.set_item("q1", fluxes.q1)?;
    dict.set_item("routing_store", fluxes.routing_store)?;
    dict.set_item("exchange", fluxes.exchange)?;
    dict.set_item("actual_exchange_routing", fluxes.actual_exchange_routing)?;
    dict.set_item("actual_exchange_direct", fluxes.actual_exchange_direct)?;
    dict.set_item("qr", fluxes.qr)?;
    dict.set_item("qd", fluxes.qd)?;
    dict.set_item("qt", fluxes.qt)?;
    Ok((state_arr, dict))
}

/// Sentinel-mode run: invalid parameters give all-infinity flow instead
/// of raising, matching the calibration-loop convention.
#[pyfunction]
fn gr4j_flow<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    precip: PyReadonlyArray1<'py, f64>,
    pet: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let mut engine = Gr4j::new(params.as_slice()?);
    let flow = engine.run(precip.as_slice()?, pet.as_slice()?);
    Ok(PyArray1::from_vec(py, flow))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    parent.add_function(wrap_pyfunction!(gr4j_run, parent)?)?;
    parent.add_function(wrap_pyfunction!(gr4j_step, parent)?)?;
    parent.add_function(wrap_pyfunction!(gr4j_flow, parent)?)?;
    Ok(())
}
