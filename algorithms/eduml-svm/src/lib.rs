//! # Linear Support Vector Machine
//!
//! A support vector machine seeks a separating hyperplane which classifies the training samples
//! correctly and keeps them at least a unit margin away from it. This crate implements the
//! linear, primal formulation trained by sub-gradient descent on the regularised hinge loss
//!
//! ```text
//! L(w) = sum_i max(0, 1 - f_i * y_i) + w_decay_factor / 2 * ||w||^2,    f = x · w
//! ```
//!
//! with labels `y_i` in `{-1, +1}`. Its sub-gradient is
//!
//! ```text
//! dL/dw = w_decay_factor * w - sum_{i: f_i * y_i < 1} y_i * x_i
//! ```
//!
//! [`SupportVectorMachine`] builds on the generic linear model contract of `eduml-linear`: the
//! weights, the forward pass and the gradient-descent loop are shared, only `predict`,
//! `total_loss` and `backward` are hinge-specific.
//!
//! # Example
//!
//! ```ignore
//! use eduml::prelude::*;
//! use eduml_svm::SupportVectorMachine;
//!
//! let model = SupportVectorMachine::params()
//!     .learning_rate(0.01)
//!     .w_decay_factor(0.001)
//!     .num_steps(500)
//!     .fit(&train)?;
//!
//! let labels: Array1<f64> = Predict::predict(&model, valid.records());
//! ```
//!
//! The same model can be driven from an external loop, feeding records with a bias column:
//!
//! ```ignore
//! let x = augment_bias(&batch_records);
//! let loss = model.update_step(&x, &batch_labels, 0.01)?;
//! ```
use eduml::traits::PredictInplace;
use eduml::Float;
use eduml_linear::{augment_bias, LinearModel, LinearObjective, LinearParams};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

pub mod hinge;

pub use eduml_linear::{LinearError as SvmError, Result, WeightInit};

/// Linear support vector machine
///
/// Wraps the weights of a [`LinearModel`] and implements the hinge loss on top of them.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct SupportVectorMachine<F> {
    model: LinearModel<F>,
}

impl<F: Float> SupportVectorMachine<F> {
    /// Create default hyperparameters for fitting a support vector machine
    pub fn params() -> LinearParams<F, Self> {
        LinearParams::new()
    }

    /// Wrap an existing linear model
    pub fn new(model: LinearModel<F>) -> Self {
        SupportVectorMachine { model }
    }

    /// The weight vector, bias last
    pub fn weights(&self) -> &Array2<F> {
        self.model.weights()
    }

    /// Signed distance of the raw records `x` of shape `(N, ndims)` to the hyperplane
    pub fn decision_function<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.forward(&augment_bias(x))
    }
}

impl<F: Float> From<LinearModel<F>> for SupportVectorMachine<F> {
    fn from(model: LinearModel<F>) -> Self {
        SupportVectorMachine::new(model)
    }
}

impl<F: Float> LinearObjective<F> for SupportVectorMachine<F> {
    fn model(&self) -> &LinearModel<F> {
        &self.model
    }

    fn model_mut(&mut self) -> &mut LinearModel<F> {
        &mut self.model
    }

    /// Hard labels from scores, `+1` for `f_i >= 0` and `-1` otherwise
    fn predict<D: Data<Elem = F>>(&self, f: &ArrayBase<D, Ix2>) -> Array2<F> {
        hinge::sign(f)
    }

    /// Summed hinge loss plus `w_decay_factor / 2 * ||w||^2`
    fn total_loss<D1, D2>(&self, f: &ArrayBase<D1, Ix2>, y: &ArrayBase<D2, Ix2>) -> Result<F>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
    {
        let hinge = hinge::hinge_loss(f, y)?;
        let l2 = self.model.w_decay_factor() / F::cast(2.) * self.model.squared_norm();

        Ok(hinge + l2)
    }

    /// Sub-gradient `w_decay_factor * w - sum_{i: f_i * y_i < 1} y_i * x_i`
    fn backward<D1, D2, D3>(
        &self,
        x: &ArrayBase<D1, Ix2>,
        f: &ArrayBase<D2, Ix2>,
        y: &ArrayBase<D3, Ix2>,
    ) -> Result<Array2<F>>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
        D3: Data<Elem = F>,
    {
        eduml::error::check_shape((x.nrows(), self.model.weights().nrows()), x.dim())?;
        let loss_grad = hinge::hinge_gradient(x, f, y)?;
        let reg_grad = self.model.weights() * self.model.w_decay_factor();

        Ok(reg_grad + loss_grad)
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>>
    for SupportVectorMachine<F>
{
    /// Given raw records `x` with shape `(n_samples, n_features)`, without bias column,
    /// `predict` returns `-1` or `+1` for every sample.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<F>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );
        assert_eq!(
            x.ncols(),
            self.model.ndims(),
            "Number of data features must match the number of features the model was trained with."
        );

        let f = x.dot(&self.model.weights().slice(ndarray::s![..-1, ..]))
            + self.model.weights()[[self.model.ndims(), 0]];
        y.assign(&hinge::sign(&f).index_axis_move(Axis(1), 0));
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}
