use ndarray::{Array2, Axis};

/// Rotate a slice so its width is the larger of the two dimensions.
///
/// If the second dimension already equals the larger dimension the slice
/// passes through untouched; otherwise it is rotated by a single quarter
/// turn counter-clockwise (`out[i][j] = in[j][cols-1-i]`). The result is a
/// pure re-indexing of the input buffer.
pub fn orient_slice(slice: Array2<u8>) -> Array2<u8> {
    let (rows, cols) = slice.dim();
    if cols >= rows {
        return slice;
    }
    let mut rotated = slice.reversed_axes();
    rotated.invert_axis(Axis(0));
    rotated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_slice_is_untouched() {
        let slice = Array2::from_shape_fn((10, 12), |(r, c)| (r * 12 + c) as u8);
        let out = orient_slice(slice.clone());
        assert_eq!(out, slice);
    }

    #[test]
    fn square_slice_is_untouched() {
        let slice = Array2::from_shape_fn((6, 6), |(r, c)| (r * 6 + c) as u8);
        let out = orient_slice(slice.clone());
        assert_eq!(out, slice);
    }

    #[test]
    fn tall_slice_rotates_to_wide() {
        let slice = Array2::from_shape_fn((12, 10), |(r, c)| (r * 10 + c) as u8);
        let out = orient_slice(slice);
        assert_eq!(out.dim(), (10, 12));
    }

    #[test]
    fn rotation_is_one_counter_clockwise_quarter_turn() {
        let slice = ndarray::array![[1u8, 2], [3, 4], [5, 6]];
        let out = orient_slice(slice);
        assert_eq!(out, ndarray::array![[2u8, 4, 6], [1, 3, 5]]);
    }
}
