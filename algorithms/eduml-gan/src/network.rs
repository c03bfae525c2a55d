//! Generator and discriminator networks
//!
//! Both networks are two layer perceptrons with a rectified hidden layer. Their forward passes
//! borrow the network immutably, so repeated evaluations always see the same weights.

use crate::dense::{Activation, Dense, DenseCache, DenseGradients};
use crate::error::Result;
use eduml::error::check_shape;
use eduml::Float;
use ndarray::{Array2, ArrayBase, ArrayViewD, ArrayViewMutD, Data, Ix2};
use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Two dense layers, `output(hidden(x))`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Mlp<F> {
    hidden: Dense<F>,
    output: Dense<F>,
}

#[derive(Clone, Debug)]
pub(crate) struct MlpCache<F> {
    hidden: DenseCache<F>,
    output: DenseCache<F>,
}

/// Parameter gradients of an [`Mlp`], in the order of [`Mlp::parameters_mut`]
#[derive(Clone, Debug, PartialEq)]
pub struct MlpGradients<F> {
    pub hidden: DenseGradients<F>,
    pub output: DenseGradients<F>,
}

impl<F: Float> MlpGradients<F> {
    pub fn accumulate(&mut self, other: &MlpGradients<F>) {
        self.hidden.accumulate(&other.hidden);
        self.output.accumulate(&other.output);
    }

    pub fn views(&self) -> Vec<ArrayViewD<'_, F>> {
        vec![
            self.hidden.weights.view().into_dyn(),
            self.hidden.bias.view().into_dyn(),
            self.output.weights.view().into_dyn(),
            self.output.bias.view().into_dyn(),
        ]
    }
}

impl<F: Float> Mlp<F> {
    pub fn new(hidden: Dense<F>, output: Dense<F>) -> Result<Self> {
        check_shape((hidden.n_outputs(), 1), (output.n_inputs(), 1))?;

        Ok(Mlp { hidden, output })
    }

    pub fn hidden(&self) -> &Dense<F> {
        &self.hidden
    }

    pub fn output(&self) -> &Dense<F> {
        &self.output
    }

    pub fn n_inputs(&self) -> usize {
        self.hidden.n_inputs()
    }

    pub fn n_outputs(&self) -> usize {
        self.output.n_outputs()
    }

    /// Views of all trainable tensors: hidden weights, hidden bias, output weights and output bias
    pub fn parameters(&self) -> Vec<ArrayViewD<'_, F>> {
        vec![
            self.hidden.weights.view().into_dyn(),
            self.hidden.bias.view().into_dyn(),
            self.output.weights.view().into_dyn(),
            self.output.bias.view().into_dyn(),
        ]
    }

    /// Mutable counterpart of [`Mlp::parameters`]
    pub fn parameters_mut(&mut self) -> Vec<ArrayViewMutD<'_, F>> {
        vec![
            self.hidden.weights.view_mut().into_dyn(),
            self.hidden.bias.view_mut().into_dyn(),
            self.output.weights.view_mut().into_dyn(),
            self.output.bias.view_mut().into_dyn(),
        ]
    }

    pub fn forward<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        let hidden = self.hidden.forward(x)?;
        self.output.forward(&hidden)
    }

    pub(crate) fn forward_cached<D: Data<Elem = F>>(
        &self,
        x: &ArrayBase<D, Ix2>,
    ) -> Result<(Array2<F>, MlpCache<F>)> {
        let (hidden_out, hidden) = self.hidden.forward_cached(x)?;
        let (out, output) = self.output.forward_cached(&hidden_out)?;

        Ok((out, MlpCache { hidden, output }))
    }

    /// Returns the parameter gradients and the gradient w.r.t. the network input
    pub(crate) fn backward(
        &self,
        cache: &MlpCache<F>,
        grad_output: &Array2<F>,
    ) -> Result<(MlpGradients<F>, Array2<F>)> {
        let (output, grad_hidden) = self.output.backward(&cache.output, grad_output)?;
        let (hidden, grad_input) = self.hidden.backward(&cache.hidden, &grad_hidden)?;

        Ok((MlpGradients { hidden, output }, grad_input))
    }
}

/// Maps latent noise `z` of shape `(batch, nlatent)` to samples of shape `(batch, ndims)` in `[0, 1]`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Generator<F>(pub(crate) Mlp<F>);

impl<F: Float> Generator<F> {
    pub(crate) fn new<R: Rng>(nlatent: usize, hidden: usize, ndims: usize, rng: &mut R) -> Self {
        Generator(Mlp {
            hidden: Dense::new(nlatent, hidden, Activation::Relu, rng),
            output: Dense::new(hidden, ndims, Activation::Sigmoid, rng),
        })
    }

    pub fn nlatent(&self) -> usize {
        self.0.n_inputs()
    }

    pub fn ndims(&self) -> usize {
        self.0.n_outputs()
    }

    pub fn network(&self) -> &Mlp<F> {
        &self.0
    }

    pub fn forward<D: Data<Elem = F>>(&self, z: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.0.forward(z)
    }
}

/// Maps samples of shape `(batch, ndims)` to raw logits of shape `(batch, 1)`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Discriminator<F>(pub(crate) Mlp<F>);

impl<F: Float> Discriminator<F> {
    pub(crate) fn new<R: Rng>(ndims: usize, hidden: usize, rng: &mut R) -> Self {
        Discriminator(Mlp {
            hidden: Dense::new(ndims, hidden, Activation::Relu, rng),
            output: Dense::new(hidden, 1, Activation::Identity, rng),
        })
    }

    pub fn ndims(&self) -> usize {
        self.0.n_inputs()
    }

    pub fn network(&self) -> &Mlp<F> {
        &self.0
    }

    pub fn forward<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.0.forward(x)
    }
}
