use super::{Dataset, DatasetBase, DatasetView, Records};
use ndarray::{ArrayBase, Axis, Data, Ix2, RemoveAxis};
use rand::seq::SliceRandom;
use rand::Rng;

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and access of a dataset.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase { records, targets }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }
}

impl<F: Clone, L: Clone, D, S, I> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, I>>
where
    D: Data<Elem = F>,
    S: Data<Elem = L>,
    I: RemoveAxis,
{
    /// Creates a view of a dataset
    pub fn view(&self) -> DatasetView<'_, F, L, I> {
        DatasetBase::new(self.records.view(), self.targets.view())
    }

    /// Collects the samples at `indices`, in that order, into an owned dataset
    pub fn select_rows(&self, indices: &[usize]) -> Dataset<F, L, I> {
        DatasetBase::new(
            self.records.select(Axis(0), indices),
            self.targets.select(Axis(0), indices),
        )
    }

    /// Shuffle the samples of a dataset, keeping records and targets aligned
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset<F, L, I> {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select_rows(&indices)
    }
}
