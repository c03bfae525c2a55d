use thiserror::Error;

/// Simplified `Result` using [`GanError`](crate::GanError) as error type
pub type Result<T> = std::result::Result<T, GanError>;

#[derive(Error, Debug, Clone)]
pub enum GanError {
    #[error("number of sample dimensions must be bigger than 0")]
    InvalidNDims,
    #[error("number of latent dimensions must be bigger than 0")]
    InvalidNLatent,
    #[error("hidden layer size must be bigger than 0")]
    InvalidHiddenSize,
    #[error("Adam decay rates should lie in [0, 1), but are ({0}, {1})")]
    InvalidBetas(f32, f32),
    #[error("Adam epsilon should be positive and finite, but is {0}")]
    InvalidEpsilon(f32),
    #[error("learning rate should be positive and finite, but is {0}")]
    InvalidLearningRate(f32),
    #[error("batch must contain at least one sample")]
    EmptyBatch,
    #[error("optimizer expected {expected} parameter tensors, got {actual}")]
    ParameterMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    BaseCrate(#[from] eduml::Error),
}
