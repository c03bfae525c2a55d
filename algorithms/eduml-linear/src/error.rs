use thiserror::Error;

/// Simplified `Result` using [`LinearError`](crate::LinearError) as error type
pub type Result<T> = std::result::Result<T, LinearError>;

#[derive(Error, Debug, Clone)]
pub enum LinearError {
    #[error("learning rate should be positive and finite, but is {0}")]
    InvalidLearningRate(f32),
    #[error("weight decay factor should be non-negative and finite, but is {0}")]
    InvalidDecayFactor(f32),
    #[error("batch size must be bigger than 0")]
    InvalidBatchSize,
    #[error("number of steps must be bigger than 0")]
    InvalidNumSteps,
    #[error("labels must be either -1 or +1, but found {0}")]
    InvalidLabel(f32),
    #[error("weights must form a column vector of at least one entry, got shape {0:?}")]
    InvalidWeightShape((usize, usize)),
    #[error(transparent)]
    BaseCrate(#[from] eduml::Error),
}
