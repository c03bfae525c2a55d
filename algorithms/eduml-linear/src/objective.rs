use crate::error::Result;
use crate::model::LinearModel;
use eduml::error::check_shape;
use eduml::Float;
use ndarray::{Array2, ArrayBase, Data, Ix2, Zip};

/// Loss-specific behaviour of a linear model
///
/// Implementors own a [`LinearModel`] and define how scores are turned into labels, how the
/// total loss is computed and how its gradient with respect to the weights looks like. The
/// forward pass `f = x · w` is shared by all of them.
///
/// All arrays are two-dimensional: records `x` have shape `(N, ndims + 1)` (bias column
/// included), scores `f` and labels `y` have shape `(N, 1)`.
pub trait LinearObjective<F: Float> {
    /// The wrapped weights
    fn model(&self) -> &LinearModel<F>;

    /// Mutable access to the wrapped weights
    fn model_mut(&mut self) -> &mut LinearModel<F>;

    /// Turn scores into hard predictions of the same shape
    fn predict<D: Data<Elem = F>>(&self, f: &ArrayBase<D, Ix2>) -> Array2<F>;

    /// Loss summed over the batch, including regularisation
    fn total_loss<D1, D2>(&self, f: &ArrayBase<D1, Ix2>, y: &ArrayBase<D2, Ix2>) -> Result<F>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>;

    /// Gradient of [`total_loss`](LinearObjective::total_loss) with respect to the weights
    ///
    /// The result has the shape of the weight vector.
    fn backward<D1, D2, D3>(
        &self,
        x: &ArrayBase<D1, Ix2>,
        f: &ArrayBase<D2, Ix2>,
        y: &ArrayBase<D3, Ix2>,
    ) -> Result<Array2<F>>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
        D3: Data<Elem = F>;

    /// Compute the scores `f = x · w`
    fn forward<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.model().forward(x)
    }

    /// Run forward and backward on a batch and apply the gradient
    ///
    /// Returns the loss of the batch before the update.
    fn update_step<D1, D2>(
        &mut self,
        x: &ArrayBase<D1, Ix2>,
        y: &ArrayBase<D2, Ix2>,
        learning_rate: F,
    ) -> Result<F>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
    {
        let f = self.forward(x)?;
        let loss = self.total_loss(&f, y)?;
        let grad = self.backward(x, &f, y)?;
        self.model_mut().apply_gradient(&grad, learning_rate)?;

        Ok(loss)
    }

    /// Total loss and accuracy of the model on a labelled batch
    fn evaluate<D1, D2>(&self, x: &ArrayBase<D1, Ix2>, y: &ArrayBase<D2, Ix2>) -> Result<(F, F)>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
    {
        let f = self.forward(x)?;
        let loss = self.total_loss(&f, y)?;
        let predictions = self.predict(&f);
        check_shape(predictions.dim(), y.dim())?;

        let correct = Zip::from(&predictions)
            .and(y)
            .fold(0usize, |acc, p, t| if p == t { acc + 1 } else { acc });
        let accuracy = if y.is_empty() {
            F::zero()
        } else {
            F::cast(correct) / F::cast(y.len())
        };

        Ok((loss, accuracy))
    }
}
