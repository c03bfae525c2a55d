//! Fully connected layers with explicit forward and backward passes

use crate::error::Result;
use eduml::error::check_shape;
use eduml::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Element-wise non-linearity applied after the affine map
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// No activation, the layer outputs raw values
    Identity,
    /// `max(0, z)`
    Relu,
    /// `1 / (1 + exp(-z))`
    Sigmoid,
}

impl Activation {
    fn apply<F: Float>(self, z: F) -> F {
        match self {
            Activation::Identity => z,
            Activation::Relu => F::max(z, F::zero()),
            Activation::Sigmoid => sigmoid(z),
        }
    }

    /// Derivative expressed through the pre-activation `z` and the activation `a`
    fn derivative<F: Float>(self, z: F, a: F) -> F {
        match self {
            Activation::Identity => F::one(),
            Activation::Relu => {
                if z > F::zero() {
                    F::one()
                } else {
                    F::zero()
                }
            }
            Activation::Sigmoid => a * (F::one() - a),
        }
    }
}

/// Numerically stable logistic function
pub(crate) fn sigmoid<F: Float>(z: F) -> F {
    if z >= F::zero() {
        F::one() / (F::one() + (-z).exp())
    } else {
        let e = z.exp();
        e / (F::one() + e)
    }
}

/// Dense layer `act(x · W + b)` with `W` of shape `(n_inputs, n_outputs)`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Dense<F> {
    pub(crate) weights: Array2<F>,
    pub(crate) bias: Array1<F>,
    activation: Activation,
}

/// Intermediate values of a forward pass, needed by the backward pass
#[derive(Clone, Debug)]
pub(crate) struct DenseCache<F> {
    input: Array2<F>,
    pre_activation: Array2<F>,
    output: Array2<F>,
}

/// Gradients of a loss with respect to the parameters of a [`Dense`] layer
#[derive(Clone, Debug, PartialEq)]
pub struct DenseGradients<F> {
    pub weights: Array2<F>,
    pub bias: Array1<F>,
}

impl<F: Float> DenseGradients<F> {
    /// Accumulate the gradients of another pass through the same layer
    pub fn accumulate(&mut self, other: &DenseGradients<F>) {
        self.weights += &other.weights;
        self.bias += &other.bias;
    }
}

impl<F: Float> Dense<F> {
    /// Create a layer with Glorot-uniform weights and zero bias
    ///
    /// Weights are drawn from `U(-l, l)` with `l = sqrt(6 / (n_inputs + n_outputs))`.
    pub(crate) fn new<R: Rng>(
        n_inputs: usize,
        n_outputs: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let limit = F::sqrt(F::cast(6.0) / F::cast(n_inputs + n_outputs));
        let weights = Array2::random_using((n_inputs, n_outputs), Uniform::new(-limit, limit), rng);

        Dense {
            weights,
            bias: Array1::zeros(n_outputs),
            activation,
        }
    }

    /// Create a layer from existing parameters
    pub fn from_parameters(
        weights: Array2<F>,
        bias: Array1<F>,
        activation: Activation,
    ) -> Result<Self> {
        check_shape((weights.ncols(), 1), (bias.len(), 1))?;

        Ok(Dense {
            weights,
            bias,
            activation,
        })
    }

    pub fn n_inputs(&self) -> usize {
        self.weights.nrows()
    }

    pub fn n_outputs(&self) -> usize {
        self.weights.ncols()
    }

    pub fn weights(&self) -> &Array2<F> {
        &self.weights
    }

    pub fn bias(&self) -> &Array1<F> {
        &self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Apply the layer to a batch of shape `(batch, n_inputs)`
    pub fn forward<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        Ok(self.forward_cached(x)?.0)
    }

    pub(crate) fn forward_cached<D: Data<Elem = F>>(
        &self,
        x: &ArrayBase<D, Ix2>,
    ) -> Result<(Array2<F>, DenseCache<F>)> {
        check_shape((x.nrows(), self.n_inputs()), x.dim())?;

        let pre_activation = x.dot(&self.weights) + &self.bias;
        let activation = self.activation;
        let output = pre_activation.mapv(|z| activation.apply(z));

        let cache = DenseCache {
            input: x.to_owned(),
            pre_activation,
            output: output.clone(),
        };
        Ok((output, cache))
    }

    /// Propagate `grad_output`, the loss gradient w.r.t. the layer output, back through the layer
    ///
    /// Returns the parameter gradients and the loss gradient w.r.t. the layer input.
    pub(crate) fn backward(
        &self,
        cache: &DenseCache<F>,
        grad_output: &Array2<F>,
    ) -> Result<(DenseGradients<F>, Array2<F>)> {
        check_shape(cache.output.dim(), grad_output.dim())?;

        let activation = self.activation;
        let grad_pre = Zip::from(grad_output)
            .and(&cache.pre_activation)
            .and(&cache.output)
            .map_collect(|g, z, a| *g * activation.derivative(*z, *a));

        let gradients = DenseGradients {
            weights: cache.input.t().dot(&grad_pre),
            bias: grad_pre.sum_axis(Axis(0)),
        };
        let grad_input = grad_pre.dot(&self.weights.t());

        Ok((gradients, grad_input))
    }
}
