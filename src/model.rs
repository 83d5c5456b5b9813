use crate::error::{VoxloopError, VoxloopResult};

/// Spatial axis selector, 1-based to match the slice-direction numbering
/// carried into output file names (`<prefix>_<axis>.gif`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SliceAxis {
    X = 1,
    Y = 2,
    Z = 3,
}

impl SliceAxis {
    /// 1-based selector used in output naming.
    pub fn selector(self) -> usize {
        self as usize
    }

    /// 0-based index into a volume's shape.
    pub fn index(self) -> usize {
        self.selector() - 1
    }

    pub fn label(self) -> &'static str {
        match self {
            SliceAxis::X => "x",
            SliceAxis::Y => "y",
            SliceAxis::Z => "z",
        }
    }

    /// Cyclic permutation moving this axis to the last position while
    /// preserving the relative order of the other two.
    pub fn permutation(self) -> [usize; 3] {
        match self {
            SliceAxis::X => [1, 2, 0],
            SliceAxis::Y => [2, 0, 1],
            SliceAxis::Z => [0, 1, 2],
        }
    }
}

/// Parameters of one rendering call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderOptions {
    /// Percentile used as the normalization reference; `None` uses the
    /// volume maximum. Must lie in (0, 100].
    pub percentile: Option<f64>,
    /// Append a progress strip below each frame.
    pub progress_overlay: bool,
    /// Spatial axis to slice along.
    pub axis: SliceAxis,
    /// Uniform per-frame display duration in seconds.
    pub frame_delay_secs: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            percentile: Some(99.95),
            progress_overlay: false,
            axis: SliceAxis::Z,
            frame_delay_secs: 0.1,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> VoxloopResult<()> {
        if let Some(p) = self.percentile
            && !(p > 0.0 && p <= 100.0)
        {
            return Err(VoxloopError::validation(format!(
                "percentile must be in (0, 100], got {p}"
            )));
        }
        if !(self.frame_delay_secs.is_finite() && self.frame_delay_secs > 0.0) {
            return Err(VoxloopError::validation(format!(
                "frame_delay_secs must be positive and finite, got {}",
                self.frame_delay_secs
            )));
        }
        Ok(())
    }
}

/// Interleaved luma+alpha raster, row-major from the top-left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLa {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameLa {
    pub fn from_gray(gray: &ndarray::Array2<u8>) -> Self {
        let (rows, cols) = gray.dim();
        let mut data = Vec::with_capacity(rows * cols * 2);
        for &v in gray.iter() {
            data.push(v);
            data.push(255);
        }
        Self {
            width: cols as u32,
            height: rows as u32,
            data,
        }
    }
}
