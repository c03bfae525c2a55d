use crate::error::{LinearError, Result};
use crate::hyperparams::LinearValidParams;
use crate::model::{augment_bias, LinearModel};
use crate::objective::LinearObjective;
use eduml::dataset::{AsTargets, Records};
use eduml::error::check_shape;
use eduml::traits::Fit;
use eduml::{DatasetBase, Float};
use ndarray::{ArrayBase, Axis, Data, Ix2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

const LOG_INTERVAL: usize = 100;

impl<F, D, T, O> Fit<ArrayBase<D, Ix2>, T, LinearError> for LinearValidParams<F, O>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsTargets<Elem = F>,
    O: LinearObjective<F> + From<LinearModel<F>>,
{
    type Object = O;

    /// Fit a linear model with mini-batch (sub-)gradient descent given a feature matrix `x` and
    /// labels `y`.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)`, without the bias
    /// column which is appended here.
    ///
    /// The labels `y` must have shape `(n_samples)` and contain only `-1` and `+1`.
    ///
    /// Returns the objective `O` wrapping the trained weights.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let y = dataset.targets().try_single_target()?;
        let nsamples = dataset.nsamples();
        if nsamples == 0 {
            return Err(eduml::Error::NotEnoughSamples.into());
        }
        check_shape((nsamples, 1), (y.len(), 1))?;
        if let Some(label) = y.iter().find(|l| **l != F::one() && **l != -F::one()) {
            return Err(LinearError::InvalidLabel(
                label.to_f32().unwrap_or(f32::NAN),
            ));
        }

        let mut rng = Xoshiro256Plus::seed_from_u64(self.seed());
        let train = DatasetBase::new(
            augment_bias(dataset.records()),
            y.to_owned().insert_axis(Axis(1)),
        );
        let mut objective = O::from(LinearModel::new(
            dataset.nfeatures(),
            self.w_decay_factor(),
            self.init(),
            &mut rng,
        ));

        let batch_size = self.batch_size().min(nsamples);
        let mut order = (0..nsamples).collect::<Vec<_>>();
        // start past the end so the first step opens a new pass
        let mut cursor = nsamples;
        for step in 0..self.num_steps() {
            if cursor >= nsamples {
                if self.shuffle() {
                    order.shuffle(&mut rng);
                }
                cursor = 0;
            }
            // the last batch of a pass may be shorter, every sample is visited once per pass
            let end = (cursor + batch_size).min(nsamples);
            let batch = train.select_rows(&order[cursor..end]);
            cursor = end;

            let loss =
                objective.update_step(batch.records(), batch.targets(), self.learning_rate())?;
            if (step + 1) % LOG_INTERVAL == 0 {
                log::debug!(
                    "step {}/{}: batch_loss={:.6}",
                    step + 1,
                    self.num_steps(),
                    loss
                );
            }
        }

        let (loss, accuracy) = objective.evaluate(train.records(), train.targets())?;
        log::info!(
            "fitted linear model on {} samples after {} steps: loss={:.6}, accuracy={:.4}",
            nsamples,
            self.num_steps(),
            loss,
            accuracy
        );

        Ok(objective)
    }
}
