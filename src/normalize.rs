use ndarray::{Array, Dimension};

use crate::error::{VoxloopError, VoxloopResult};

/// Map a numeric array into 8-bit grayscale range.
///
/// The reference maximum is either the `p`-th percentile (linear
/// interpolation between closest ranks) or the array maximum. Values are
/// scaled by `255/reference`, clamped into [0, 255], then rounded
/// half-to-even. Produces a new array; the input is never aliased.
pub fn normalize<D: Dimension>(
    input: &Array<f32, D>,
    percentile: Option<f64>,
) -> VoxloopResult<Array<u8, D>> {
    if input.is_empty() {
        return Err(VoxloopError::missing_input("volume contains no elements"));
    }
    // NaN/inf voxels are common in upstream SNR volumes (zero-variance
    // divisions); they would poison the reference and silently zero the
    // output, so refuse them outright.
    if let Some(bad) = input.iter().find(|v| !v.is_finite()) {
        return Err(VoxloopError::validation(format!(
            "volume contains non-finite value {bad}"
        )));
    }

    let reference = match percentile {
        Some(p) => {
            let mut values: Vec<f32> = input.iter().copied().collect();
            percentile_of(&mut values, p)?
        }
        None => f64::from(input.iter().copied().fold(f32::NEG_INFINITY, f32::max)),
    };

    if reference == 0.0 {
        return Err(VoxloopError::DegenerateIntensity);
    }

    let scale = 255.0 / reference;
    Ok(input.mapv(|v| (f64::from(v) * scale).clamp(0.0, 255.0).round_ties_even() as u8))
}

/// Linear-interpolation percentile over a scratch buffer (sorted in place).
fn percentile_of(values: &mut [f32], p: f64) -> VoxloopResult<f64> {
    if !(p > 0.0 && p <= 100.0) {
        return Err(VoxloopError::validation(format!(
            "percentile must be in (0, 100], got {p}"
        )));
    }

    values.sort_unstable_by(f32::total_cmp);
    let rank = (p / 100.0) * (values.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    let lo_v = f64::from(values[lo]);
    let hi_v = f64::from(values[hi]);
    Ok(lo_v + (hi_v - lo_v) * frac)
}
