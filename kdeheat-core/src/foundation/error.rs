/// Convenience result type used across kdeheat.
pub type HeatResult<T> = Result<T, HeatError>;

/// Top-level error taxonomy used by every public entry point.
#[derive(thiserror::Error, Debug)]
pub enum HeatError {
    /// A caller-supplied parameter is out of range or names an unsupported variant.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The input carries nothing to work with (no points, no frames).
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Input data is malformed or inconsistent (coordinate files, array lengths, frame sizes).
    #[error("data error: {0}")]
    Data(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeatError {
    /// Build a [`HeatError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`HeatError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`HeatError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
