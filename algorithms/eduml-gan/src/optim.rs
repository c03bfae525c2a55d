//! Parameter update rules
//!
//! An optimizer receives the trainable tensors of exactly one network together with their
//! gradients, both in the same order, and updates the tensors in place.

use crate::error::{GanError, Result};
use eduml::Float;
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Zip};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

pub trait Optimizer<F: Float> {
    /// Apply one update with step size `learning_rate`
    fn step(
        &mut self,
        params: Vec<ArrayViewMutD<'_, F>>,
        grads: Vec<ArrayViewD<'_, F>>,
        learning_rate: F,
    ) -> Result<()>;
}

fn check_pairs<F>(params: &[ArrayViewMutD<'_, F>], grads: &[ArrayViewD<'_, F>]) -> Result<()> {
    if params.len() != grads.len() {
        return Err(GanError::ParameterMismatch {
            expected: params.len(),
            actual: grads.len(),
        });
    }
    for (param, grad) in params.iter().zip(grads) {
        if param.shape() != grad.shape() {
            return Err(GanError::ParameterMismatch {
                expected: param.len(),
                actual: grad.len(),
            });
        }
    }

    Ok(())
}

/// Plain gradient descent, `p <- p - lr * g`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GradientDescent;

impl<F: Float> Optimizer<F> for GradientDescent {
    fn step(
        &mut self,
        params: Vec<ArrayViewMutD<'_, F>>,
        grads: Vec<ArrayViewD<'_, F>>,
        learning_rate: F,
    ) -> Result<()> {
        check_pairs(&params, &grads)?;

        for (mut param, grad) in params.into_iter().zip(grads) {
            param.scaled_add(-learning_rate, &grad);
        }

        Ok(())
    }
}

/// Adam (Kingma & Ba, 2014)
///
/// Keeps bias-corrected running estimates of the first and second moment of every gradient.
/// The moment buffers are allocated on the first step, afterwards the optimizer only accepts
/// tensors of the same number and shapes.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Adam<F> {
    beta1: F,
    beta2: F,
    epsilon: F,
    /// Number of completed steps
    t: i32,
    m: Vec<ArrayD<F>>,
    v: Vec<ArrayD<F>>,
}

impl<F: Float> Adam<F> {
    pub fn new(beta1: F, beta2: F, epsilon: F) -> Self {
        Adam {
            beta1,
            beta2,
            epsilon,
            t: 0,
            m: Vec::new(),
            v: Vec::new(),
        }
    }

    pub fn steps(&self) -> i32 {
        self.t
    }

    /// Forget all moment estimates
    pub fn reset(&mut self) {
        self.t = 0;
        self.m.clear();
        self.v.clear();
    }
}

impl<F: Float> Optimizer<F> for Adam<F> {
    fn step(
        &mut self,
        params: Vec<ArrayViewMutD<'_, F>>,
        grads: Vec<ArrayViewD<'_, F>>,
        learning_rate: F,
    ) -> Result<()> {
        check_pairs(&params, &grads)?;

        if self.m.is_empty() {
            self.m = params.iter().map(|p| ArrayD::zeros(p.raw_dim())).collect();
            self.v = self.m.clone();
        } else if self.m.len() != params.len() {
            return Err(GanError::ParameterMismatch {
                expected: self.m.len(),
                actual: params.len(),
            });
        }
        for (m, param) in self.m.iter().zip(&params) {
            if m.shape() != param.shape() {
                return Err(GanError::ParameterMismatch {
                    expected: m.len(),
                    actual: param.len(),
                });
            }
        }

        self.t += 1;
        let (beta1, beta2, epsilon) = (self.beta1, self.beta2, self.epsilon);
        let correction1 = F::one() - beta1.powi(self.t);
        let correction2 = F::one() - beta2.powi(self.t);

        for (((param, grad), m), v) in params
            .into_iter()
            .zip(grads)
            .zip(self.m.iter_mut())
            .zip(self.v.iter_mut())
        {
            Zip::from(param)
                .and(&grad)
                .and(m)
                .and(v)
                .for_each(|p, &g, m, v| {
                    *m = beta1 * *m + (F::one() - beta1) * g;
                    *v = beta2 * *v + (F::one() - beta2) * g * g;

                    let m_hat = *m / correction1;
                    let v_hat = *v / correction2;
                    *p -= learning_rate * m_hat / (v_hat.sqrt() + epsilon);
                });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn gradient_descent_moves_against_gradient() -> Result<()> {
        let mut w = array![[1.0, 2.0], [3.0, 4.0]];
        let mut b = array![0.5];
        let gw = array![[1.0, -1.0], [0.0, 2.0]];
        let gb = array![1.0];

        GradientDescent.step(
            vec![w.view_mut().into_dyn(), b.view_mut().into_dyn()],
            vec![gw.view().into_dyn(), gb.view().into_dyn()],
            0.5,
        )?;

        assert_abs_diff_eq!(w, array![[0.5, 2.5], [3.0, 3.0]]);
        assert_abs_diff_eq!(b, array![0.0]);
        Ok(())
    }

    #[test]
    fn first_adam_step_has_learning_rate_magnitude() -> Result<()> {
        let mut adam = Adam::new(0.9, 0.999, 1e-8);
        let mut w = Array1::<f64>::zeros(4);
        let g = array![0.3, -2.0, 1e-3, 50.0];

        adam.step(vec![w.view_mut().into_dyn()], vec![g.view().into_dyn()], 0.01)?;

        assert_eq!(adam.steps(), 1);
        assert_abs_diff_eq!(w, array![-0.01, 0.01, -0.01, -0.01], epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn adam_keeps_moments_between_steps() -> Result<()> {
        let mut adam = Adam::new(0.9, 0.999, 1e-8);
        let mut w = Array1::<f64>::zeros(1);

        adam.step(vec![w.view_mut().into_dyn()], vec![array![1.0].view().into_dyn()], 0.1)?;
        adam.step(vec![w.view_mut().into_dyn()], vec![array![-1.0].view().into_dyn()], 0.1)?;

        // m = 0.09 - 0.1 = -0.01, m_hat = -0.01 / 0.19
        // v = 0.000999 + 0.001, v_hat = 0.001999 / 0.001999 = 1
        let m_hat = -0.01 / 0.19;
        assert_abs_diff_eq!(w[0], -0.1 - 0.1 * m_hat, epsilon = 1e-7);
        Ok(())
    }

    #[test]
    fn mismatching_tensors_are_rejected() {
        let mut w = Array2::<f64>::zeros((2, 2));
        let g = Array2::<f64>::zeros((2, 3));
        let res =
            GradientDescent.step(vec![w.view_mut().into_dyn()], vec![g.view().into_dyn()], 0.1);
        assert!(matches!(res, Err(GanError::ParameterMismatch { .. })));

        let res = GradientDescent.step(vec![w.view_mut().into_dyn()], vec![], 0.1);
        assert!(matches!(res, Err(GanError::ParameterMismatch { .. })));

        let mut adam = Adam::new(0.9, 0.999, 1e-8);
        let g = Array2::<f64>::zeros((2, 2));
        adam.step(vec![w.view_mut().into_dyn()], vec![g.view().into_dyn()], 0.1)
            .unwrap();
        let mut other = Array1::<f64>::zeros(3);
        let g = Array1::<f64>::zeros(3);
        let res = adam.step(
            vec![other.view_mut().into_dyn()],
            vec![g.view().into_dyn()],
            0.1,
        );
        assert!(matches!(res, Err(GanError::ParameterMismatch { .. })));
        assert_eq!(adam.steps(), 1);

        adam.reset();
        assert!(adam
            .step(vec![other.view_mut().into_dyn()], vec![g.view().into_dyn()], 0.1)
            .is_ok());
    }
}
