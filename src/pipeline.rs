use std::path::{Path, PathBuf};

use ndarray::{Array3, ArrayD};

use crate::{
    encode_gif::{EncodeConfig, GifSequencer},
    error::{VoxloopError, VoxloopResult},
    model::{FrameLa, RenderOptions, SliceAxis},
    normalize::normalize,
    orient::orient_slice,
    overlay::{self, PROGRESS_STRIP_ROWS},
    slice::{as_volume3, extract_slices, fix_axis_center},
};

/// Deterministic output path for one (volume, axis) pair:
/// `<out_dir>/<prefix>_<axis>.gif`.
pub fn gif_output_path(out_dir: &Path, prefix: &str, axis: SliceAxis) -> PathBuf {
    out_dir.join(format!("{prefix}_{}.gif", axis.selector()))
}

/// Render a 3D volume into one looping GIF sweeping the chosen axis.
///
/// The pipeline is strictly sequential: normalization completes before
/// slicing begins, each slice is fully composited before the next one is
/// extracted, and all frames are written before encoding starts. Nothing
/// but the returned GIF survives the call.
#[tracing::instrument(skip(volume, opts), fields(shape = ?volume.shape()))]
pub fn render_volume_gif(
    volume: &ArrayD<f32>,
    out_dir: &Path,
    prefix: &str,
    opts: &RenderOptions,
) -> VoxloopResult<PathBuf> {
    opts.validate()?;
    if volume.ndim() != 3 {
        return Err(VoxloopError::unsupported_shape(3, volume.shape()));
    }
    require_out_dir(out_dir)?;

    let normalized = as_volume3(normalize(volume, opts.percentile)?)?;
    let out_path = gif_output_path(out_dir, prefix, opts.axis);
    encode_slices(normalized, opts.axis, out_path, opts)
}

/// Render the time course of a 4D volume's center slab along one spatial
/// axis. The slab is animated through its last (temporal) axis, so the
/// output keeps the conventional `_3` suffix:
/// `<out_dir>/<prefix>_center_<x|y|z>_3.gif`.
#[tracing::instrument(skip(volume, opts), fields(shape = ?volume.shape()))]
pub fn render_center_timeseries(
    volume: &ArrayD<f32>,
    spatial_axis: SliceAxis,
    out_dir: &Path,
    prefix: &str,
    opts: &RenderOptions,
) -> VoxloopResult<PathBuf> {
    opts.validate()?;
    require_out_dir(out_dir)?;

    let slab = fix_axis_center(volume, spatial_axis)?;
    let normalized = normalize(&slab, opts.percentile)?;
    let out_path = out_dir.join(format!(
        "{prefix}_center_{}_{}.gif",
        spatial_axis.label(),
        SliceAxis::Z.selector()
    ));
    encode_slices(normalized, SliceAxis::Z, out_path, opts)
}

fn require_out_dir(out_dir: &Path) -> VoxloopResult<()> {
    if !out_dir.is_dir() {
        return Err(VoxloopError::missing_input(format!(
            "output directory '{}' not found",
            out_dir.display()
        )));
    }
    Ok(())
}

fn encode_slices(
    volume: Array3<u8>,
    axis: SliceAxis,
    out_path: PathBuf,
    opts: &RenderOptions,
) -> VoxloopResult<PathBuf> {
    let slices = extract_slices(volume, axis);
    let num_slices = slices.num_slices();
    if num_slices == 0 {
        return Err(VoxloopError::missing_input(
            "volume has no slices along the chosen axis",
        ));
    }

    // Orientation always lands on (min, max), so frame dims are known
    // before the first slice is composited.
    let (d0, d1) = slices.slice_dims();
    let width = d0.max(d1);
    let mut height = d0.min(d1);
    if opts.progress_overlay {
        height += PROGRESS_STRIP_ROWS;
    }

    let cfg = EncodeConfig {
        width: width as u32,
        height: height as u32,
        frame_delay_secs: opts.frame_delay_secs,
        out_path,
        overwrite: true,
    };
    let mut sequencer = GifSequencer::new(cfg)?;

    for (i, slice) in slices.enumerate() {
        let oriented = orient_slice(slice);
        let composed = if opts.progress_overlay {
            let strip = overlay::progress_strip(i, num_slices, oriented.ncols())?;
            overlay::append_strip(&oriented, &strip)?
        } else {
            oriented
        };
        sequencer.push_frame(&FrameLa::from_gray(&composed))?;
    }

    tracing::debug!(frames = num_slices, "encoding gif");
    sequencer.finish()
}
