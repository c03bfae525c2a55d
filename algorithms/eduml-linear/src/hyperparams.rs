use crate::error::LinearError;
use eduml::{Float, ParamGuard};
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Initial values of the weight vector
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightInit {
    /// All weights start at zero
    Zeros,
    /// All weights start at one
    Ones,
    /// Weights are drawn from `U[0, 1)`
    Uniform,
    /// Weights are drawn from the standard normal distribution
    Gaussian,
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Zeros
    }
}

/// A verified hyper-parameter set ready for gradient descent on a linear model
///
/// See [`LinearParams`](crate::LinearParams) for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearValidParams<F, O> {
    pub(crate) learning_rate: F,
    pub(crate) w_decay_factor: F,
    pub(crate) batch_size: usize,
    pub(crate) num_steps: usize,
    pub(crate) shuffle: bool,
    pub(crate) init: WeightInit,
    pub(crate) seed: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) objective: PhantomData<O>,
}

/// Linear model hyperparameters
///
/// The objective `O` decides which loss is minimised, for example the hinge loss of
/// `eduml_svm::SupportVectorMachine`. The remaining values steer mini-batch gradient descent.
///
/// ## Example
///
/// ```ignore
/// use eduml_svm::SupportVectorMachine;
/// let model = SupportVectorMachine::params()
///     .learning_rate(0.01)
///     .w_decay_factor(0.001)
///     .num_steps(500)
///     .fit(&dataset)?;
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearParams<F, O>(pub(crate) LinearValidParams<F, O>);

impl<F: Float, O> ParamGuard for LinearParams<F, O> {
    type Checked = LinearValidParams<F, O>;
    type Error = LinearError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if !self.0.learning_rate.is_finite() || self.0.learning_rate <= F::zero() {
            Err(LinearError::InvalidLearningRate(
                self.0.learning_rate.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !self.0.w_decay_factor.is_finite() || self.0.w_decay_factor.is_negative() {
            Err(LinearError::InvalidDecayFactor(
                self.0.w_decay_factor.to_f32().unwrap_or(f32::NAN),
            ))
        } else if self.0.batch_size == 0 {
            Err(LinearError::InvalidBatchSize)
        } else if self.0.num_steps == 0 {
            Err(LinearError::InvalidNumSteps)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, O> LinearValidParams<F, O> {
    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn w_decay_factor(&self) -> F {
        self.w_decay_factor
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn init(&self) -> WeightInit {
        self.init
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<F: Float, O> Default for LinearParams<F, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, O> LinearParams<F, O> {
    /// Create new hyperparameters with pre-defined values
    ///
    /// * learning rate of `0.001`
    /// * weight decay factor of `0.001`
    /// * batches of `16` samples
    /// * `1000` update steps
    /// * shuffled batches
    /// * zero-initialised weights
    pub fn new() -> Self {
        Self(LinearValidParams {
            learning_rate: F::cast(0.001),
            w_decay_factor: F::cast(0.001),
            batch_size: 16,
            num_steps: 1000,
            shuffle: true,
            init: WeightInit::Zeros,
            seed: 42,
            objective: PhantomData,
        })
    }

    /// Set the learning rate.
    ///
    /// Defaults to `0.001` if not set
    ///
    /// `learning_rate` must be positive and finite
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Set the strength of the L2 regularisation `w_decay_factor / 2 * ||w||^2`.
    ///
    /// Defaults to `0.001` if not set
    ///
    /// `w_decay_factor` must be non-negative and finite
    pub fn w_decay_factor(mut self, w_decay_factor: F) -> Self {
        self.0.w_decay_factor = w_decay_factor;
        self
    }

    /// Set the number of samples per gradient step.
    ///
    /// Defaults to `16` if not set. Batches are truncated to the dataset size.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.0.batch_size = batch_size;
        self
    }

    /// Set the number of gradient steps.
    ///
    /// Defaults to `1000` if not set
    pub fn num_steps(mut self, num_steps: usize) -> Self {
        self.0.num_steps = num_steps;
        self
    }

    /// Shuffle the dataset before every pass.
    ///
    /// Defaults to `true`. Without shuffling the batches walk through the dataset in order, the
    /// last batch of a pass holding the remaining samples.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.0.shuffle = shuffle;
        self
    }

    /// Set the initial weights.
    ///
    /// Defaults to [`WeightInit::Zeros`]
    pub fn init(mut self, init: WeightInit) -> Self {
        self.0.init = init;
        self
    }

    /// Seed of the random number generator used for initialisation and shuffling.
    ///
    /// Defaults to `42`
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let params = LinearParams::<f64, ()>::default().check().unwrap();
        assert_eq!(params.batch_size(), 16);
        assert_eq!(params.num_steps(), 1000);
        assert_eq!(params.init(), WeightInit::Zeros);
        assert!(params.shuffle());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = LinearParams::<f64, ()>::new();
        assert!(matches!(
            params.clone().learning_rate(0.0).check(),
            Err(LinearError::InvalidLearningRate(_))
        ));
        assert!(matches!(
            params.clone().learning_rate(f64::INFINITY).check(),
            Err(LinearError::InvalidLearningRate(_))
        ));
        assert!(matches!(
            params.clone().w_decay_factor(-0.1).check(),
            Err(LinearError::InvalidDecayFactor(_))
        ));
        assert!(matches!(
            params.clone().batch_size(0).check(),
            Err(LinearError::InvalidBatchSize)
        ));
        assert!(matches!(
            params.num_steps(0).check(),
            Err(LinearError::InvalidNumSteps)
        ));
    }
}
