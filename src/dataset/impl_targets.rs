use super::AsTargets;
use ndarray::{ArrayBase, ArrayView2, Axis, Data, Ix1, Ix2};

impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix1> {
    type Elem = L;
    type Ix = Ix1;

    fn as_multi_targets(&self) -> ArrayView2<L> {
        self.view().insert_axis(Axis(1))
    }
}

impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix2> {
    type Elem = L;
    type Ix = Ix2;

    fn as_multi_targets(&self) -> ArrayView2<L> {
        self.view()
    }
}

impl<T: AsTargets> AsTargets for &T {
    type Elem = T::Elem;
    type Ix = T::Ix;

    fn as_multi_targets(&self) -> ArrayView2<Self::Elem> {
        (*self).as_multi_targets()
    }
}
