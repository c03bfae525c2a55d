//! Hinge loss and its sub-gradient
//!
//! Scores `f` and labels `y` are column vectors of shape `(N, 1)`, labels being `-1` or `+1`.
//! A sample violates the margin if `f_i * y_i < 1`.

use eduml::error::check_shape;
use eduml::Float;
use eduml_linear::Result;
use ndarray::{Array2, ArrayBase, Data, Ix2, Zip};

/// Map scores to `+1` if `f_i >= 0` and to `-1` otherwise, zero counts as positive
pub fn sign<F: Float, D: Data<Elem = F>>(f: &ArrayBase<D, Ix2>) -> Array2<F> {
    f.mapv(|v| if v >= F::zero() { F::one() } else { -F::one() })
}

/// Sum of `max(0, 1 - f_i * y_i)` over the batch
pub fn hinge_loss<F, D1, D2>(f: &ArrayBase<D1, Ix2>, y: &ArrayBase<D2, Ix2>) -> Result<F>
where
    F: Float,
    D1: Data<Elem = F>,
    D2: Data<Elem = F>,
{
    check_shape((f.nrows(), 1), f.dim())?;
    check_shape(f.dim(), y.dim())?;

    Ok(Zip::from(f)
        .and(y)
        .fold(F::zero(), |acc, f, y| acc + F::max(F::zero(), F::one() - *f * *y)))
}

/// Sub-gradient of the summed hinge loss with respect to the weights
///
/// Every sample with `f_i * y_i < 1` contributes `-y_i * x_i`, all others contribute nothing.
/// The result has shape `(x.ncols(), 1)`.
pub fn hinge_gradient<F, D1, D2, D3>(
    x: &ArrayBase<D1, Ix2>,
    f: &ArrayBase<D2, Ix2>,
    y: &ArrayBase<D3, Ix2>,
) -> Result<Array2<F>>
where
    F: Float,
    D1: Data<Elem = F>,
    D2: Data<Elem = F>,
    D3: Data<Elem = F>,
{
    check_shape((x.nrows(), 1), f.dim())?;
    check_shape(f.dim(), y.dim())?;

    let coefficients = Zip::from(f).and(y).map_collect(|f, y| {
        if *f * *y < F::one() {
            -*y
        } else {
            F::zero()
        }
    });

    Ok(x.t().dot(&coefficients))
}
