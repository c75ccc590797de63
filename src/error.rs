use thiserror::Error;

/// Failures raised while assembling or running a savings calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("missing parameters before calculator construction: {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    #[error("invalid parameter '{parameter}': {reason}")]
    Validation {
        parameter: &'static str,
        reason: &'static str,
    },

    #[error("{0}")]
    State(&'static str),
}

impl CalculatorError {
    pub(crate) fn validation(parameter: &'static str, reason: &'static str) -> Self {
        Self::Validation { parameter, reason }
    }
}
