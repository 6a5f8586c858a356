#[cfg(feature = "python")]
mod delay;
#[cfg(feature = "python")]
mod metrics;
#[cfg(feature = "python")]
mod model;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Register a submodule in sys.modules so `from parent.child import ...` works.
#[cfg(feature = "python")]
fn register_submodule(
    py: Python<'_>,
    parent_name: &str,
    child: &Bound<'_, PyModule>,
) -> PyResult<()> {
    let child_name = child.name()?;
    let full_name = format!("{}.{}", parent_name, child_name);
    let sys = py.import("sys")?;
    let modules = sys.getattr("modules")?;
    modules.set_item(full_name, child)?;
    Ok(())
}

/// Register the _core Python module.
#[cfg(feature = "python")]
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    let parent_name = m.name()?.to_string();

    m.add_function(wrap_pyfunction!(rust_version, m)?)?;

    // Model functions live directly on _core; delay and metrics get
    // their own submodules.
    model::register(m)?;
    delay::register(m)?;
    metrics::register(m)?;

    for name in &["delay", "metrics"] {
        let sub = m.getattr(*name)?;
        register_submodule(py, &parent_name, sub.downcast::<PyModule>()?)?;
    }

    Ok(())
}

#[cfg(feature = "python")]
#[pyfunction]
fn rust_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
