use crate::error::{GanError, Result};
use crate::hyperparams::{GanParams, GanValidParams};
use crate::loss::{discriminator_loss, generator_loss, mean_cross_entropy_gradient};
use crate::network::{Discriminator, Generator, MlpGradients};
use crate::optim::{Adam, GradientDescent, Optimizer};
use crate::Gan;
use eduml::error::check_shape;
use eduml::{Float, ParamGuard};
use ndarray::{Array2, ArrayBase, ArrayViewD, Data, Ix2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

/// Draw a `(batch, nlatent)` noise matrix uniformly from `[-1, 1]`
pub fn sample_latent<F: Float, R: Rng>(batch: usize, nlatent: usize, rng: &mut R) -> Array2<F> {
    Array2::random_using(
        (batch, nlatent),
        Uniform::new_inclusive(-F::one(), F::one()),
        rng,
    )
}

fn check_batch<F, D: Data<Elem = F>>(x: &ArrayBase<D, Ix2>, ncols: usize) -> Result<()> {
    if x.nrows() == 0 {
        return Err(GanError::EmptyBatch);
    }
    check_shape((x.nrows(), ncols), x.dim())?;

    Ok(())
}

fn check_learning_rate<F: Float>(learning_rate: F) -> Result<()> {
    if !learning_rate.is_finite() || learning_rate <= F::zero() {
        return Err(GanError::InvalidLearningRate(
            learning_rate.to_f32().unwrap_or(f32::NAN),
        ));
    }

    Ok(())
}

impl<F: Float> GanParams<F> {
    /// Validate the hyperparameters and initialise a GAN from them
    pub fn build(self) -> Result<Gan<F>> {
        Ok(Gan::new(&self.check()?))
    }
}

impl<F: Float> Gan<F> {
    /// Initialise both networks with the seed of the hyperparameters
    pub fn new(params: &GanValidParams<F>) -> Self {
        let mut rng = Xoshiro256Plus::seed_from_u64(params.seed());
        Self::with_rng(params, &mut rng)
    }

    /// Initialise both networks from the given random number generator
    pub fn with_rng<R: Rng>(params: &GanValidParams<F>, rng: &mut R) -> Self {
        let generator = Generator::new(params.nlatent(), params.hidden(), params.ndims(), rng);
        let discriminator = Discriminator::new(params.ndims(), params.hidden(), rng);

        Gan {
            params: params.clone(),
            generator,
            discriminator,
            discriminator_optimizer: GradientDescent,
            generator_optimizer: Adam::new(params.beta1(), params.beta2(), params.epsilon()),
        }
    }

    /// Trainable tensors of the generator
    pub fn generator_parameters(&self) -> Vec<ArrayViewD<'_, F>> {
        self.generator.0.parameters()
    }

    /// Trainable tensors of the discriminator
    pub fn discriminator_parameters(&self) -> Vec<ArrayViewD<'_, F>> {
        self.discriminator.0.parameters()
    }

    /// Generate samples `x_hat` of shape `(batch, ndims)` from latent noise of shape `(batch, nlatent)`
    pub fn generate<D: Data<Elem = F>>(&self, z: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        check_batch(z, self.params.nlatent())?;
        self.generator.forward(z)
    }

    /// Raw discriminator logits of shape `(batch, 1)` for samples of shape `(batch, ndims)`
    pub fn discriminate<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        check_batch(x, self.params.ndims())?;
        self.discriminator.forward(x)
    }

    /// Discriminator and generator loss for real samples `x` and latent noise `z`
    ///
    /// Both batches may have different sizes.
    pub fn losses<D1, D2>(&self, x: &ArrayBase<D1, Ix2>, z: &ArrayBase<D2, Ix2>) -> Result<(F, F)>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
    {
        let y = self.discriminate(x)?;
        let y_hat = self.discriminate(&self.generate(z)?)?;

        Ok((discriminator_loss(&y, &y_hat)?, generator_loss(&y_hat)?))
    }

    /// Discriminator loss and its gradient w.r.t. the discriminator's parameters
    pub(crate) fn discriminator_gradients<D1, D2>(
        &self,
        x: &ArrayBase<D1, Ix2>,
        z: &ArrayBase<D2, Ix2>,
    ) -> Result<(F, MlpGradients<F>)>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
    {
        check_batch(x, self.params.ndims())?;
        let x_hat = self.generate(z)?;

        let discriminator = &self.discriminator.0;
        let (y, real_cache) = discriminator.forward_cached(x)?;
        let (y_hat, fake_cache) = discriminator.forward_cached(&x_hat)?;
        let loss = discriminator_loss(&y, &y_hat)?;

        let (mut grads, _) =
            discriminator.backward(&real_cache, &mean_cross_entropy_gradient(&y, F::one()))?;
        let (fake_grads, _) =
            discriminator.backward(&fake_cache, &mean_cross_entropy_gradient(&y_hat, F::zero()))?;
        grads.accumulate(&fake_grads);

        Ok((loss, grads))
    }

    /// Generator loss and its gradient w.r.t. the generator's parameters
    pub(crate) fn generator_gradients<D: Data<Elem = F>>(
        &self,
        z: &ArrayBase<D, Ix2>,
    ) -> Result<(F, MlpGradients<F>)> {
        check_batch(z, self.params.nlatent())?;

        let (x_hat, generator_cache) = self.generator.0.forward_cached(z)?;
        let (y_hat, discriminator_cache) = self.discriminator.0.forward_cached(&x_hat)?;
        let loss = generator_loss(&y_hat)?;

        let grad_logits = mean_cross_entropy_gradient(&y_hat, F::one());
        let (_, grad_x_hat) = self
            .discriminator
            .0
            .backward(&discriminator_cache, &grad_logits)?;
        let (grads, _) = self.generator.0.backward(&generator_cache, &grad_x_hat)?;

        Ok((loss, grads))
    }

    /// One gradient descent update of the discriminator, returns the loss before the update
    pub fn train_discriminator_step<D1, D2>(
        &mut self,
        x: &ArrayBase<D1, Ix2>,
        z: &ArrayBase<D2, Ix2>,
        learning_rate: F,
    ) -> Result<F>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
    {
        check_learning_rate(learning_rate)?;
        let (loss, grads) = self.discriminator_gradients(x, z)?;

        self.discriminator_optimizer.step(
            self.discriminator.0.parameters_mut(),
            grads.views(),
            learning_rate,
        )?;

        Ok(loss)
    }

    /// One Adam update of the generator, returns the loss before the update
    pub fn train_generator_step<D: Data<Elem = F>>(
        &mut self,
        z: &ArrayBase<D, Ix2>,
        learning_rate: F,
    ) -> Result<F> {
        check_learning_rate(learning_rate)?;
        let (loss, grads) = self.generator_gradients(z)?;

        self.generator_optimizer.step(
            self.generator.0.parameters_mut(),
            grads.views(),
            learning_rate,
        )?;

        Ok(loss)
    }

    /// Update the discriminator, then the generator on the same latent batch
    ///
    /// Returns the discriminator and generator loss, each evaluated right before its update.
    pub fn train_step<D1, D2>(
        &mut self,
        x: &ArrayBase<D1, Ix2>,
        z: &ArrayBase<D2, Ix2>,
        learning_rate: F,
    ) -> Result<(F, F)>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
    {
        let d_loss = self.train_discriminator_step(x, z, learning_rate)?;
        let g_loss = self.train_generator_step(z, learning_rate)?;

        log::debug!(
            "step {}: discriminator loss {:.5}, generator loss {:.5}",
            self.generator_optimizer.steps(),
            d_loss,
            g_loss
        );

        Ok((d_loss, g_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Mlp;
    use approx::assert_abs_diff_eq;
    use ndarray::ArrayD;
    use std::f64::consts::LN_2;

    fn small_gan(seed: u64) -> Gan<f64> {
        GanParams::new()
            .ndims(3)
            .nlatent(2)
            .hidden(4)
            .seed(seed)
            .build()
            .unwrap()
    }

    fn batches(seed: u64) -> (Array2<f64>, Array2<f64>) {
        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        let x = Array2::random_using((5, 3), Uniform::new(0., 1.), &mut rng);
        let z = sample_latent(4, 2, &mut rng);
        (x, z)
    }

    fn discriminator_net(gan: &mut Gan<f64>) -> &mut Mlp<f64> {
        &mut gan.discriminator.0
    }

    fn generator_net(gan: &mut Gan<f64>) -> &mut Mlp<f64> {
        &mut gan.generator.0
    }

    /// Central differences of `loss` w.r.t. every parameter of the selected network
    fn numeric_gradient(
        gan: &Gan<f64>,
        select: fn(&mut Gan<f64>) -> &mut Mlp<f64>,
        loss: impl Fn(&Gan<f64>) -> f64,
    ) -> Vec<ArrayD<f64>> {
        let h = 1e-6;
        let mut gan = gan.clone();
        let shapes: Vec<_> = select(&mut gan)
            .parameters_mut()
            .iter()
            .map(|p| p.raw_dim())
            .collect();

        let mut result = Vec::new();
        for (k, shape) in shapes.into_iter().enumerate() {
            let mut grad = ArrayD::zeros(shape);
            for (i, g) in grad.iter_mut().enumerate() {
                let shift = |gan: &mut Gan<f64>, delta: f64| {
                    let mut params = select(gan).parameters_mut();
                    if let Some(p) = params[k].iter_mut().nth(i) {
                        *p += delta;
                    }
                };
                shift(&mut gan, h);
                let plus = loss(&gan);
                shift(&mut gan, -2. * h);
                let minus = loss(&gan);
                shift(&mut gan, h);
                *g = (plus - minus) / (2. * h);
            }
            result.push(grad);
        }

        result
    }

    #[test]
    fn build_validates_params() {
        assert!(GanParams::<f64>::new().hidden(0).build().is_err());
        let gan = small_gan(1);
        assert_eq!(gan.generator().ndims(), 3);
        assert_eq!(gan.generator().nlatent(), 2);
        assert_eq!(gan.discriminator().ndims(), 3);
        assert_eq!(gan.generator_parameters().len(), 4);
        assert_eq!(gan.discriminator_parameters()[2].shape(), &[4, 1]);
    }

    #[test]
    fn same_seed_gives_same_networks() {
        assert_eq!(small_gan(7), small_gan(7));
        assert_ne!(small_gan(7), small_gan(8));
    }

    #[test]
    fn discriminator_reuses_its_weights() -> Result<()> {
        let gan = small_gan(3);
        let (x, z) = batches(3);

        assert_eq!(gan.discriminate(&x)?, gan.discriminate(&x)?);
        let x_hat = gan.generate(&z)?;
        assert_eq!(gan.discriminate(&x_hat)?, gan.discriminate(&x_hat)?);
        Ok(())
    }

    #[test]
    fn zero_discriminator_gives_ln2_losses() -> Result<()> {
        let mut gan = small_gan(4);
        for mut p in gan.discriminator.0.parameters_mut() {
            p.fill(0.);
        }
        let (x, z) = batches(4);

        let (d_loss, g_loss) = gan.losses(&x, &z)?;
        assert_abs_diff_eq!(d_loss, 2. * LN_2, epsilon = 1e-12);
        assert_abs_diff_eq!(g_loss, LN_2, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn shapes_are_checked() {
        let mut gan = small_gan(5);
        let (x, z) = batches(5);

        assert!(gan.generate(&x).is_err());
        assert!(gan.discriminate(&z).is_err());
        assert!(gan.losses(&z, &x).is_err());
        assert!(matches!(
            gan.generate(&Array2::<f64>::zeros((0, 2))),
            Err(GanError::EmptyBatch)
        ));
        assert!(matches!(
            gan.train_step(&x, &z, 0.),
            Err(GanError::InvalidLearningRate(_))
        ));
        assert!(gan.train_step(&x, &z, f64::NAN).is_err());
    }

    #[test]
    fn discriminator_gradient_matches_finite_differences() -> Result<()> {
        let gan = small_gan(11);
        let (x, z) = batches(11);

        let (loss, grads) = gan.discriminator_gradients(&x, &z)?;
        assert_abs_diff_eq!(loss, gan.losses(&x, &z)?.0);

        let numeric = numeric_gradient(&gan, discriminator_net, |gan| {
            gan.losses(&x, &z).unwrap().0
        });
        for (analytic, numeric) in grads.views().into_iter().zip(&numeric) {
            assert_abs_diff_eq!(analytic, numeric.view(), epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn generator_gradient_matches_finite_differences() -> Result<()> {
        let gan = small_gan(12);
        let (_, z) = batches(12);

        let (loss, grads) = gan.generator_gradients(&z)?;
        let numeric = numeric_gradient(&gan, generator_net, |gan| {
            let y_hat = gan.discriminate(&gan.generate(&z).unwrap()).unwrap();
            generator_loss(&y_hat).unwrap()
        });
        assert!(loss.is_finite());
        for (analytic, numeric) in grads.views().into_iter().zip(&numeric) {
            assert_abs_diff_eq!(analytic, numeric.view(), epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn each_optimizer_touches_only_its_network() -> Result<()> {
        let mut gan = small_gan(13);
        let (x, z) = batches(13);

        let before = gan.clone();
        gan.train_discriminator_step(&x, &z, 0.1)?;
        assert_eq!(gan.generator, before.generator);
        assert_ne!(gan.discriminator, before.discriminator);

        let before = gan.clone();
        gan.train_generator_step(&z, 0.1)?;
        assert_eq!(gan.discriminator, before.discriminator);
        assert_ne!(gan.generator, before.generator);
        assert_eq!(gan.generator_optimizer().steps(), 1);
        Ok(())
    }

    #[test]
    fn discriminator_step_is_plain_gradient_descent() -> Result<()> {
        let mut gan = small_gan(14);
        let (x, z) = batches(14);

        let (_, grads) = gan.discriminator_gradients(&x, &z)?;
        let expected: Vec<ArrayD<f64>> = gan
            .discriminator_parameters()
            .iter()
            .zip(grads.views())
            .map(|(p, g)| p - &(&g * 0.5))
            .collect();

        gan.train_discriminator_step(&x, &z, 0.5)?;
        for (p, e) in gan.discriminator_parameters().into_iter().zip(&expected) {
            assert_abs_diff_eq!(p, e.view(), epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn training_lowers_discriminator_loss_on_fixed_batches() -> Result<()> {
        let mut gan = small_gan(15);
        let (x, z) = batches(15);

        let (initial, _) = gan.losses(&x, &z)?;
        for _ in 0..50 {
            gan.train_discriminator_step(&x, &z, 0.1)?;
        }
        let (trained, _) = gan.losses(&x, &z)?;
        assert!(trained < initial);
        Ok(())
    }

    #[test]
    fn sample_latent_is_bounded() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let z: Array2<f32> = sample_latent(100, 3, &mut rng);
        assert_eq!(z.dim(), (100, 3));
        assert!(z.iter().all(|v| (-1.0..=1.0).contains(v)));
    }
}
