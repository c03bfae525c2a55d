//! `eduml` provides the shared building blocks of two classical teaching models, a linear support
//! vector machine and a generative adversarial network, implemented on top of `ndarray`.
//!
//! ## The Big Picture
//!
//! The root crate only holds what every model crate needs:
//!
//! * the [`Float`] bound for `f32`/`f64` parameters,
//! * the [`Dataset`] structure pairing records with targets,
//! * the [`Fit`](traits::Fit) and [`Predict`](traits::Predict) traits,
//! * the [`ParamGuard`] pattern separating unchecked from validated hyperparameters,
//! * the shared [`Error`](error::Error) type.
//!
//! The models themselves live in their own crates:
//!
//! * `eduml-linear`: a generic linear model trained with (sub-)gradient descent
//! * `eduml-svm`: a hinge-loss support vector machine built on `eduml-linear`
//! * `eduml-gan`: a dense generator/discriminator pair trained adversarially
//!
//! All models are explicit objects owning their parameters. There is no computation graph and
//! no global state: forward passes, losses and gradients are plain functions of their inputs.

pub mod dataset;
pub mod error;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float};
pub use error::Error;
pub use param_guard::ParamGuard;
