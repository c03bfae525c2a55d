use crate::error::GanError;
use eduml::{Float, ParamGuard};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A verified hyper-parameter set ready for the construction of a GAN
///
/// See [`GanParams`](crate::GanParams) for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct GanValidParams<F> {
    pub(crate) ndims: usize,
    pub(crate) nlatent: usize,
    pub(crate) hidden: usize,
    pub(crate) beta1: F,
    pub(crate) beta2: F,
    pub(crate) epsilon: F,
    pub(crate) seed: u64,
}

/// GAN hyperparameters
///
/// Both networks have one hidden layer of rectified linear units. The generator maps
/// `nlatent`-dimensional noise to `ndims`-dimensional samples in `[0, 1]`, the discriminator maps
/// samples to a single raw logit.
///
/// ## Example
///
/// ```ignore
/// use eduml_gan::Gan;
/// let gan = Gan::<f32>::params().ndims(784).nlatent(10).build()?;
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct GanParams<F>(pub(crate) GanValidParams<F>);

impl<F: Float> ParamGuard for GanParams<F> {
    type Checked = GanValidParams<F>;
    type Error = GanError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        let in_unit = |beta: F| beta >= F::zero() && beta < F::one();

        if self.0.ndims == 0 {
            Err(GanError::InvalidNDims)
        } else if self.0.nlatent == 0 {
            Err(GanError::InvalidNLatent)
        } else if self.0.hidden == 0 {
            Err(GanError::InvalidHiddenSize)
        } else if !in_unit(self.0.beta1) || !in_unit(self.0.beta2) {
            Err(GanError::InvalidBetas(
                self.0.beta1.to_f32().unwrap_or(f32::NAN),
                self.0.beta2.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !self.0.epsilon.is_finite() || self.0.epsilon <= F::zero() {
            Err(GanError::InvalidEpsilon(
                self.0.epsilon.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float> GanValidParams<F> {
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    pub fn nlatent(&self) -> usize {
        self.nlatent
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn beta1(&self) -> F {
        self.beta1
    }

    pub fn beta2(&self) -> F {
        self.beta2
    }

    pub fn epsilon(&self) -> F {
        self.epsilon
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<F: Float> Default for GanParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> GanParams<F> {
    /// Create new hyperparameters with pre-defined values
    ///
    /// The defaults describe 28x28 grey-scale images generated from a two dimensional latent
    /// space, with 128 hidden units per network.
    pub fn new() -> Self {
        Self(GanValidParams {
            ndims: 784,
            nlatent: 2,
            hidden: 128,
            beta1: F::cast(0.9),
            beta2: F::cast(0.999),
            epsilon: F::cast(1e-8),
            seed: 42,
        })
    }

    /// Set the number of dimensions of a sample.
    ///
    /// Defaults to `784` if not set
    pub fn ndims(mut self, ndims: usize) -> Self {
        self.0.ndims = ndims;
        self
    }

    /// Set the number of dimensions of the latent space.
    ///
    /// Defaults to `2` if not set
    pub fn nlatent(mut self, nlatent: usize) -> Self {
        self.0.nlatent = nlatent;
        self
    }

    /// Set the number of hidden units in both networks.
    ///
    /// Defaults to `128` if not set
    pub fn hidden(mut self, hidden: usize) -> Self {
        self.0.hidden = hidden;
        self
    }

    /// Set the exponential decay rates of the generator's Adam moment estimates.
    ///
    /// Defaults to `(0.9, 0.999)`, both must lie in `[0, 1)`
    pub fn betas(mut self, beta1: F, beta2: F) -> Self {
        self.0.beta1 = beta1;
        self.0.beta2 = beta2;
        self
    }

    /// Set the denominator offset of the generator's Adam update.
    ///
    /// Defaults to `1e-8`, must be positive
    pub fn epsilon(mut self, epsilon: F) -> Self {
        self.0.epsilon = epsilon;
        self
    }

    /// Seed of the random number generator used for weight initialisation.
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
    fn defaults_describe_mnist_sized_gan() {
        let params = GanParams::<f64>::default().check().unwrap();
        assert_eq!(params.ndims(), 784);
        assert_eq!(params.nlatent(), 2);
        assert_eq!(params.hidden(), 128);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = GanParams::<f64>::new();
        assert!(matches!(params.clone().ndims(0).check(), Err(GanError::InvalidNDims)));
        assert!(matches!(
            params.clone().nlatent(0).check(),
            Err(GanError::InvalidNLatent)
        ));
        assert!(matches!(
            params.clone().hidden(0).check(),
            Err(GanError::InvalidHiddenSize)
        ));
        assert!(matches!(
            params.clone().betas(0.9, 1.0).check(),
            Err(GanError::InvalidBetas(_, _))
        ));
        assert!(matches!(
            params.epsilon(0.0).check(),
            Err(GanError::InvalidEpsilon(_))
        ));
    }
}
