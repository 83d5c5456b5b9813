pub type VoxloopResult<T> = Result<T, VoxloopError>;

#[derive(thiserror::Error, Debug)]
pub enum VoxloopError {
    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("unsupported volume shape: expected {expected} dims, got {actual:?}")]
    UnsupportedShape { expected: usize, actual: Vec<usize> },

    #[error("degenerate intensity: normalization reference maximum is zero")]
    DegenerateIntensity,

    #[error("encode failure: {0}")]
    Encode(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VoxloopError {
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    pub fn unsupported_shape(expected: usize, actual: &[usize]) -> Self {
        Self::UnsupportedShape {
            expected,
            actual: actual.to_vec(),
        }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
