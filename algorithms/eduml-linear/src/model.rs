use crate::error::{LinearError, Result};
use crate::hyperparams::WeightInit;
use eduml::error::check_shape;
use eduml::Float;
use ndarray::{concatenate, Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_rand::rand_distr::{StandardNormal, Uniform};
use ndarray_rand::RandomExt;
use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Weights of a linear model `f = x · w`
///
/// The weight vector has shape `(ndims + 1, 1)`, the last entry being the bias. Records are
/// therefore expected with a trailing constant column, see [`augment_bias`].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearModel<F> {
    w: Array2<F>,
    w_decay_factor: F,
}

impl<F: Float> LinearModel<F> {
    /// Create a model for `ndims` features, drawing the initial weights with `rng` if needed
    pub fn new<R: Rng>(ndims: usize, w_decay_factor: F, init: WeightInit, rng: &mut R) -> Self {
        let shape = (ndims + 1, 1);
        let w = match init {
            WeightInit::Zeros => Array2::zeros(shape),
            WeightInit::Ones => Array2::ones(shape),
            WeightInit::Uniform => {
                Array2::random_using(shape, Uniform::new(F::zero(), F::one()), rng)
            }
            WeightInit::Gaussian => {
                Array2::<f64>::random_using(shape, StandardNormal, rng).mapv(F::cast)
            }
        };

        LinearModel { w, w_decay_factor }
    }

    /// Wrap existing weights of shape `(ndims + 1, 1)`
    pub fn from_weights(w: Array2<F>, w_decay_factor: F) -> Result<Self> {
        if w.ncols() != 1 || w.nrows() == 0 {
            return Err(LinearError::InvalidWeightShape(w.dim()));
        }
        if !w_decay_factor.is_finite() || w_decay_factor.is_negative() {
            return Err(LinearError::InvalidDecayFactor(
                w_decay_factor.to_f32().unwrap_or(f32::NAN),
            ));
        }

        Ok(LinearModel { w, w_decay_factor })
    }

    /// Number of features, without the bias
    pub fn ndims(&self) -> usize {
        self.w.nrows() - 1
    }

    /// The weight vector including the bias as last entry
    pub fn weights(&self) -> &Array2<F> {
        &self.w
    }

    pub fn w_decay_factor(&self) -> F {
        self.w_decay_factor
    }

    /// Compute the scores `f = x · w` of shape `(N, 1)`
    ///
    /// `x` must already contain the bias column, i.e. have `ndims + 1` columns.
    pub fn forward<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        check_shape((x.nrows(), self.w.nrows()), x.dim())?;
        Ok(x.dot(&self.w))
    }

    /// The squared L2 norm of the weights
    pub fn squared_norm(&self) -> F {
        self.w.iter().map(|w| *w * *w).sum()
    }

    /// Take a single descent step `w <- w - learning_rate * grad`
    pub fn apply_gradient<D: Data<Elem = F>>(
        &mut self,
        grad: &ArrayBase<D, Ix2>,
        learning_rate: F,
    ) -> Result<()> {
        check_shape(self.w.dim(), grad.dim())?;
        self.w.scaled_add(-learning_rate, grad);
        Ok(())
    }
}

/// Append a constant `1` column to the records, `(N, ndims)` becomes `(N, ndims + 1)`
pub fn augment_bias<F: Float, D: Data<Elem = F>>(x: &ArrayBase<D, Ix2>) -> Array2<F> {
    let ones = Array2::ones((x.nrows(), 1));
    // both operands have the same number of rows, so concatenation cannot fail
    concatenate(Axis(1), &[x.view(), ones.view()]).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn weights_are_initialised_with_bias() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);

        let zeros = LinearModel::<f64>::new(3, 0.0, WeightInit::Zeros, &mut rng);
        assert_eq!(zeros.weights(), &Array2::zeros((4, 1)));
        assert_eq!(zeros.ndims(), 3);

        let ones = LinearModel::<f64>::new(3, 0.0, WeightInit::Ones, &mut rng);
        assert_eq!(ones.weights(), &Array2::ones((4, 1)));

        let uniform = LinearModel::<f64>::new(5, 0.0, WeightInit::Uniform, &mut rng);
        assert_eq!(uniform.weights().dim(), (6, 1));
        assert!(uniform.weights().iter().all(|w| (0.0..1.0).contains(w)));

        let gaussian = LinearModel::<f32>::new(5, 0.0, WeightInit::Gaussian, &mut rng);
        assert_eq!(gaussian.weights().dim(), (6, 1));
        assert!(gaussian.weights().iter().all(|w| w.is_finite()));
    }

    #[test]
    fn forward_is_dot_product() -> Result<()> {
        let model = LinearModel::from_weights(array![[1.0], [2.0], [0.5]], 0.0)?;
        let x = augment_bias(&array![[1.0, 1.0], [0.0, -1.0]]);
        assert_eq!(x, array![[1.0, 1.0, 1.0], [0.0, -1.0, 1.0]]);

        let f = model.forward(&x)?;
        assert_abs_diff_eq!(f, array![[3.5], [-1.5]]);
        Ok(())
    }

    #[test]
    fn forward_rejects_missing_bias_column() {
        let model = LinearModel::from_weights(array![[1.0], [2.0], [0.5]], 0.0).unwrap();
        let res = model.forward(&array![[1.0, 1.0]]);
        assert!(matches!(
            res,
            Err(LinearError::BaseCrate(eduml::Error::MismatchedShapes { .. }))
        ));
    }

    #[test]
    fn from_weights_validates_input() {
        assert!(matches!(
            LinearModel::from_weights(array![[1.0, 2.0]], 0.0),
            Err(LinearError::InvalidWeightShape((1, 2)))
        ));
        assert!(matches!(
            LinearModel::from_weights(array![[1.0]], -1.0),
            Err(LinearError::InvalidDecayFactor(_))
        ));
    }

    #[test]
    fn gradient_step_moves_against_gradient() -> Result<()> {
        let mut model = LinearModel::from_weights(array![[1.0], [1.0]], 0.0)?;
        model.apply_gradient(&array![[2.0], [-4.0]], 0.5)?;
        assert_abs_diff_eq!(model.weights(), &array![[0.0], [3.0]]);
        assert_abs_diff_eq!(model.squared_norm(), 9.0);

        assert!(model.apply_gradient(&array![[1.0]], 0.5).is_err());
        Ok(())
    }
}
