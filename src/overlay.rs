use ndarray::{Array2, Axis, Slice, concatenate};

use crate::error::{VoxloopError, VoxloopResult};

/// Height of the progress strip appended below a slice.
pub const PROGRESS_STRIP_ROWS: usize = 5;

/// Filled width of the progress bar at frame `i` of `n`: `ceil(i*l/n)`.
///
/// Monotone non-decreasing in `i`; stays below `l` for `i < n` and would
/// reach `l` exactly at `i = n`.
pub fn bar_width(frame_idx: usize, frame_count: usize, longest_side: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    (frame_idx * longest_side).div_ceil(frame_count)
}

/// Build the progress strip for frame `i` of `n`: `PROGRESS_STRIP_ROWS`
/// rows, `longest_side` columns, filled at maximum intensity up to
/// [`bar_width`].
pub fn progress_strip(
    frame_idx: usize,
    frame_count: usize,
    longest_side: usize,
) -> VoxloopResult<Array2<u8>> {
    if frame_count == 0 || longest_side == 0 {
        return Err(VoxloopError::validation(
            "progress strip needs a non-empty frame sequence and a non-zero width",
        ));
    }
    if frame_idx >= frame_count {
        return Err(VoxloopError::validation(format!(
            "frame index {frame_idx} out of range for {frame_count} frames"
        )));
    }

    let width = bar_width(frame_idx, frame_count, longest_side);
    let mut strip = Array2::<u8>::zeros((PROGRESS_STRIP_ROWS, longest_side));
    strip
        .slice_axis_mut(Axis(1), Slice::from(0..width))
        .fill(255);
    Ok(strip)
}

/// Append a strip below a slice. Both must share the same width.
pub fn append_strip(slice: &Array2<u8>, strip: &Array2<u8>) -> VoxloopResult<Array2<u8>> {
    if slice.ncols() != strip.ncols() {
        return Err(VoxloopError::validation(format!(
            "strip width {} does not match slice width {}",
            strip.ncols(),
            slice.ncols()
        )));
    }
    concatenate(Axis(0), &[slice.view(), strip.view()])
        .map_err(|e| VoxloopError::validation(format!("failed to append progress strip: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_widths_for_five_frames_of_twenty() {
        let widths: Vec<usize> = (0..5).map(|i| bar_width(i, 5, 20)).collect();
        assert_eq!(widths, vec![0, 4, 8, 12, 16]);
    }

    #[test]
    fn bar_width_is_monotone_and_bounded() {
        for (n, l) in [(3usize, 7usize), (5, 20), (13, 64), (101, 9)] {
            let mut prev = 0;
            for i in 0..n {
                let w = bar_width(i, n, l);
                assert!(w >= prev);
                assert!(w <= l, "width {w} must never exceed {l}");
                prev = w;
            }
            assert_eq!(bar_width(n, n, l), l);
        }
    }

    #[test]
    fn strip_fills_exactly_the_bar_columns() {
        let strip = progress_strip(2, 5, 20).unwrap();
        assert_eq!(strip.dim(), (PROGRESS_STRIP_ROWS, 20));
        for row in strip.rows() {
            for (c, &v) in row.iter().enumerate() {
                assert_eq!(v, if c < 8 { 255 } else { 0 });
            }
        }
    }

    #[test]
    fn out_of_range_frame_index_is_rejected() {
        assert!(progress_strip(5, 5, 20).is_err());
        assert!(progress_strip(0, 0, 20).is_err());
    }

    #[test]
    fn appended_strip_extends_height_only() {
        let slice = Array2::<u8>::from_elem((10, 20), 7);
        let strip = progress_strip(1, 5, 20).unwrap();
        let framed = append_strip(&slice, &strip).unwrap();
        assert_eq!(framed.dim(), (10 + PROGRESS_STRIP_ROWS, 20));
        assert_eq!(framed[[9, 19]], 7);
        assert_eq!(framed[[10, 0]], 255);
        assert_eq!(framed[[10, 4]], 0);
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let slice = Array2::<u8>::zeros((4, 10));
        let strip = Array2::<u8>::zeros((PROGRESS_STRIP_ROWS, 12));
        assert!(append_strip(&slice, &strip).is_err());
    }
}
