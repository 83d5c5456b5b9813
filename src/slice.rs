use ndarray::{Array2, Array3, ArrayD, Axis, Ix3};

use crate::{
    error::{VoxloopError, VoxloopResult},
    model::SliceAxis,
};

/// Check that a dynamic-rank volume has exactly 3 dims.
pub fn as_volume3<T>(volume: ArrayD<T>) -> VoxloopResult<Array3<T>> {
    let shape = volume.shape().to_vec();
    volume
        .into_dimensionality::<Ix3>()
        .map_err(|_| VoxloopError::unsupported_shape(3, &shape))
}

/// Reduce a 4D volume to 3D by fixing one axis at the given index.
pub fn fix_axis(volume: &ArrayD<f32>, axis: SliceAxis, index: usize) -> VoxloopResult<Array3<f32>> {
    if volume.ndim() != 4 {
        return Err(VoxloopError::unsupported_shape(4, volume.shape()));
    }
    let dim = volume.len_of(Axis(axis.index()));
    if index >= dim {
        return Err(VoxloopError::validation(format!(
            "slice index {index} out of range for axis {} of length {dim}",
            axis.selector()
        )));
    }
    as_volume3(volume.index_axis(Axis(axis.index()), index).to_owned())
}

/// Reduce a 4D volume to 3D at the center index of the chosen axis.
pub fn fix_axis_center(volume: &ArrayD<f32>, axis: SliceAxis) -> VoxloopResult<Array3<f32>> {
    if volume.ndim() != 4 {
        return Err(VoxloopError::unsupported_shape(4, volume.shape()));
    }
    let dim = volume.len_of(Axis(axis.index()));
    fix_axis(volume, axis, center_index(dim))
}

/// Center coordinate of an axis, rounding halves to even.
pub fn center_index(dim: usize) -> usize {
    let center = (dim as f64 / 2.0).round_ties_even() as usize;
    center.min(dim.saturating_sub(1))
}

/// Permute the volume so the selected axis is last and iterate its 2D
/// slices in ascending index order.
///
/// The permutation is a pure re-indexing of the owned buffer, so a fresh
/// extraction never observes state from a previous one.
pub fn extract_slices(volume: Array3<u8>, axis: SliceAxis) -> SliceIter {
    SliceIter {
        data: volume.permuted_axes(axis.permutation()),
        next: 0,
    }
}

/// Lazy, finite, non-restartable sequence of slices along the last axis.
pub struct SliceIter {
    data: Array3<u8>,
    next: usize,
}

impl SliceIter {
    pub fn num_slices(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// (rows, cols) of every slice this iterator yields.
    pub fn slice_dims(&self) -> (usize, usize) {
        let (d0, d1, _) = self.data.dim();
        (d0, d1)
    }
}

impl Iterator for SliceIter {
    type Item = Array2<u8>;

    fn next(&mut self) -> Option<Array2<u8>> {
        if self.next >= self.num_slices() {
            return None;
        }
        let slice = self.data.index_axis(Axis(2), self.next).to_owned();
        self.next += 1;
        Some(slice)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_slices() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SliceIter {}
