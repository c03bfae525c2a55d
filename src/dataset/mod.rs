//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{
    ArrayBase, ArrayView, ArrayView1, ArrayView2, Axis, Dimension, Ix1, Ix2, OwnedRepr,
    ScalarOperand,
};

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

use std::fmt;
use std::iter::Sum;

use crate::error::{Error, Result};

mod impl_dataset;
mod impl_records;
mod impl_targets;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in records of a dataset,
/// in model parameters and, for the linear models, in the signed targets as well.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq<Epsilon = Self>
    + 'static
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// and may contain targets.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a two-/one-dimension matrix with dimensionality (nsamples, ntargets)
///
/// # Trait bounds
///
/// * `R: Records`: generic over feature matrices
/// * `T`: generic over any `ndarray` matrix which can be used as targets. The `AsTargets` trait
/// bound is omitted here to avoid some repetition in implementation `src/dataset/impl_dataset.rs`
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records
/// stored as an `Array2` and each record may correspond to multiple targets. The
/// targets are stored as an `Array1` or `Array2`.
pub type Dataset<D, T, I = Ix1> =
    DatasetBase<ArrayBase<OwnedRepr<D>, Ix2>, ArrayBase<OwnedRepr<T>, I>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, D, T, I = Ix1> = DatasetBase<ArrayView<'a, D, Ix2>, ArrayView<'a, T, I>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a reference to single or multiple target variables
pub trait AsTargets {
    type Elem;
    type Ix: Dimension;

    /// Returns a view on targets as two-dimensional array
    fn as_multi_targets(&self) -> ArrayView2<Self::Elem>;

    /// Convert to single target, fails for more than one target
    ///
    /// # Returns
    ///
    /// May return a single target with the same label type, but returns an
    /// `Error::MultipleTargets` in case that there are more than a single target.
    fn try_single_target(&self) -> Result<ArrayView1<Self::Elem>> {
        let multi_targets = self.as_multi_targets();

        if multi_targets.len_of(Axis(1)) > 1 {
            return Err(Error::MultipleTargets);
        }

        Ok(multi_targets.index_axis_move(Axis(1), 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn dataset_implements_required_methods() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);

        let dataset = Dataset::new(array![[1., 2.], [3., 4.], [5., 6.]], array![-1., 1., 1.]);
        assert_eq!(dataset.nsamples(), 3);
        assert_eq!(dataset.nfeatures(), 2);

        // shuffling keeps records and targets aligned
        let shuffled = dataset.shuffle(&mut rng);
        for (row, target) in shuffled
            .records()
            .rows()
            .into_iter()
            .zip(shuffled.targets().iter())
        {
            let expected = if row[0] < 2. { -1. } else { 1. };
            assert_eq!(*target, expected);
        }

        let view = dataset.view();
        assert_eq!(view.nsamples(), 3);
        assert_eq!(view.records(), dataset.records());
    }

    #[test]
    fn single_target_is_extracted() -> Result<()> {
        let dataset = Dataset::new(array![[0.5], [1.5]], array![-1.0, 1.0]);
        let targets = dataset.targets().try_single_target()?;
        assert_eq!(targets, array![-1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn multi_target_is_rejected() {
        let records: Array2<f64> = Array2::zeros((2, 1));
        let targets: Array2<f64> = Array2::zeros((2, 2));
        let dataset = DatasetBase::new(records, targets);
        assert!(matches!(
            dataset.targets().try_single_target(),
            Err(Error::MultipleTargets)
        ));
    }

    #[test]
    fn select_rows_takes_matching_targets() {
        let dataset: Dataset<f64, f64> = Dataset::new(
            Array2::from_shape_fn((4, 2), |(i, j)| (i * 2 + j) as f64),
            Array1::from(vec![1., -1., 1., -1.]),
        );
        let batch = dataset.select_rows(&[3, 0]);
        assert_eq!(batch.records(), array![[6., 7.], [0., 1.]]);
        assert_eq!(batch.targets(), array![-1., 1.]);
    }
}
