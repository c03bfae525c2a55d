//! Error types in eduml
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("expected shape {expected:?}, got {actual:?}")]
    MismatchedShapes {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("multiple targets not supported")]
    MultipleTargets,
    #[error("Not enough samples to compute the mean")]
    NotEnoughSamples,
}

/// Fails with `Error::MismatchedShapes` unless both shapes agree
pub fn check_shape(expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::MismatchedShapes { expected, actual })
    }
}
