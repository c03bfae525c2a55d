//! # Linear models trained with gradient descent
//!
//! ## The Big Picture
//!
//! `eduml-linear` is a crate in the `eduml` workspace. It provides the contract every linear
//! classifier in the workspace builds on:
//!
//! * [`LinearModel`] owns the weight vector `w` of shape `(ndims + 1, 1)`, the last entry being
//!   the bias, together with the L2 strength `w_decay_factor`. Its forward pass computes
//!   `f = x · w`.
//! * [`LinearObjective`] is implemented by concrete models and adds the loss-specific parts:
//!   `predict`, `total_loss` and `backward`.
//! * [`LinearParams`] configures mini-batch gradient descent and implements
//!   [`Fit`](eduml::traits::Fit) for every objective.
//!
//! An external training loop can also drive a model directly, calling
//! [`LinearObjective::update_step`] per batch.
//!
//! ## Bias handling
//!
//! Records passed to `forward`, `total_loss` and `backward` carry an explicit trailing column of
//! ones. [`augment_bias`] appends it, and `fit` does so internally.
mod algorithm;
mod error;
mod hyperparams;
mod model;
mod objective;

pub use error::{LinearError, Result};
pub use hyperparams::{LinearParams, LinearValidParams, WeightInit};
pub use model::{augment_bias, LinearModel};
pub use objective::LinearObjective;
