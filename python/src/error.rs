use optcalc::OptionsError;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::PyErr;

pub(crate) fn to_py_err(e: OptionsError) -> PyErr {
    match e.root() {
        OptionsError::InvalidParameter { .. } => PyValueError::new_err(e.to_string()),
        OptionsError::NoConvergence { .. } => PyRuntimeError::new_err(e.to_string()),
        _ => PyRuntimeError::new_err(format!("{}: {e}", e.kind())),
    }
}
