//! # Generative Adversarial Network
//!
//! A GAN trains two networks against each other. The [`Generator`] maps latent noise `z` to
//! synthetic samples `x_hat`, the [`Discriminator`] assigns a raw logit to every sample. With
//! `y = D(x)` for real samples and `y_hat = D(G(z))` for generated ones, the two losses are
//!
//! ```text
//! L_D = mean(BCE(y, 1)) + mean(BCE(y_hat, 0))
//! L_G = mean(BCE(y_hat, 1))
//! ```
//!
//! where `BCE` is the binary cross-entropy on logits. Each training step performs two updates:
//! plain gradient descent on the discriminator's parameters minimising `L_D`, and Adam on the
//! generator's parameters minimising `L_G`. The gradient of `L_G` passes through the
//! discriminator without changing it.
//!
//! Both networks consist of two dense layers with a rectified hidden layer of 128 units. The
//! generator ends with a sigmoid, so its samples lie in `[0, 1]`, the discriminator ends with a
//! single linear unit.
//!
//! The training loop itself is left to the caller, which supplies real batches, latent batches
//! and the learning rate of every step.
//!
//! # Example
//!
//! ```ignore
//! use eduml_gan::{sample_latent, Gan};
//!
//! let mut gan = Gan::<f32>::params().ndims(784).nlatent(10).build()?;
//! for batch in batches {
//!     let z = sample_latent(batch.nrows(), 10, &mut rng);
//!     let (d_loss, g_loss) = gan.train_step(&batch, &z, 1e-3)?;
//! }
//! let samples = gan.generate(&sample_latent(16, 10, &mut rng))?;
//! ```
mod algorithm;
mod dense;
mod error;
mod hyperparams;
mod loss;
mod network;
mod optim;

use eduml::Float;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

pub use algorithm::sample_latent;
pub use dense::{Activation, Dense, DenseGradients};
pub use error::{GanError, Result};
pub use hyperparams::{GanParams, GanValidParams};
pub use loss::{discriminator_loss, generator_loss, sigmoid_cross_entropy_with_logits};
pub use network::{Discriminator, Generator, Mlp, MlpGradients};
pub use optim::{Adam, GradientDescent, Optimizer};

/// Generator and discriminator together with their optimizers
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Gan<F: Float> {
    params: GanValidParams<F>,
    generator: Generator<F>,
    discriminator: Discriminator<F>,
    discriminator_optimizer: GradientDescent,
    generator_optimizer: Adam<F>,
}

impl<F: Float> Gan<F> {
    /// Create default hyperparameters
    pub fn params() -> GanParams<F> {
        GanParams::new()
    }

    pub fn hyperparams(&self) -> &GanValidParams<F> {
        &self.params
    }

    pub fn generator(&self) -> &Generator<F> {
        &self.generator
    }

    pub fn discriminator(&self) -> &Discriminator<F> {
        &self.discriminator
    }

    pub fn generator_optimizer(&self) -> &Adam<F> {
        &self.generator_optimizer
    }
}
