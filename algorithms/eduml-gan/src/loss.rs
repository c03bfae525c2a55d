//! Binary cross-entropy on raw logits
//!
//! The discriminator is trained to output `1` for real samples and `0` for generated ones, the
//! generator is trained to make it output `1` for generated samples.

use crate::dense::sigmoid;
use crate::error::{GanError, Result};
use eduml::error::check_shape;
use eduml::Float;
use ndarray::{Array2, ArrayBase, Data, Ix2};

/// Element-wise `BCE(sigmoid(l), t)`, evaluated as `max(l, 0) - l * t + ln(1 + exp(-|l|))`
pub fn sigmoid_cross_entropy_with_logits<F: Float, D: Data<Elem = F>>(
    logits: &ArrayBase<D, Ix2>,
    target: F,
) -> Array2<F> {
    logits.mapv(|l| F::max(l, F::zero()) - l * target + F::min(l, -l).exp().ln_1p())
}

fn mean_cross_entropy<F, D>(logits: &ArrayBase<D, Ix2>, target: F) -> Result<F>
where
    F: Float,
    D: Data<Elem = F>,
{
    check_shape((logits.nrows(), 1), logits.dim())?;
    if logits.is_empty() {
        return Err(GanError::EmptyBatch);
    }

    let sum = sigmoid_cross_entropy_with_logits(logits, target).sum();
    Ok(sum / F::cast(logits.nrows()))
}

/// Gradient of the batch mean of [`sigmoid_cross_entropy_with_logits`] w.r.t. the logits
pub(crate) fn mean_cross_entropy_gradient<F: Float>(logits: &Array2<F>, target: F) -> Array2<F> {
    let n = F::cast(logits.nrows());
    logits.mapv(|l| (sigmoid(l) - target) / n)
}

/// `mean(BCE(y, 1)) + mean(BCE(y_hat, 0))` for real logits `y` and fake logits `y_hat`
pub fn discriminator_loss<F, D1, D2>(
    y: &ArrayBase<D1, Ix2>,
    y_hat: &ArrayBase<D2, Ix2>,
) -> Result<F>
where
    F: Float,
    D1: Data<Elem = F>,
    D2: Data<Elem = F>,
{
    Ok(mean_cross_entropy(y, F::one())? + mean_cross_entropy(y_hat, F::zero())?)
}

/// `mean(BCE(y_hat, 1))` for fake logits `y_hat`
pub fn generator_loss<F: Float, D: Data<Elem = F>>(y_hat: &ArrayBase<D, Ix2>) -> Result<F> {
    mean_cross_entropy(y_hat, F::one())
}
