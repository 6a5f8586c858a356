/// gr4j — GR4J daily rainfall-runoff model in Rust.
///
/// A port of the four-parameter GR4J model (Perrin et al., 2003) with the
/// optional fifth outlet-delay parameter, plus a standalone fractional
/// time-delay operator sharing the same lag arithmetic.
pub mod constants;
pub mod delay;
pub mod engine;
pub mod forcing;
pub mod metrics;
pub mod outputs;
pub mod params;
pub mod processes;
pub mod run;
pub mod state;
pub mod timelag;
pub mod unit_hydrographs;

#[cfg(feature = "python")]
mod pyo3_bindings;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_bindings::register(m)?;
    Ok(())
}
