//! Voxloop renders a 3D/4D numeric volume into looping grayscale GIF
//! animations for rapid visual quality inspection.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: map the volume into 8-bit grayscale range, optionally
//!    clipping at a percentile ([`normalize::normalize`]).
//! 2. **Slice**: permute the chosen axis to the back and walk its 2D
//!    cross-sections in ascending order ([`extract_slices`]).
//! 3. **Orient**: rotate each slice a quarter turn when needed so width is
//!    the longer side ([`orient_slice`]).
//! 4. **Composite** (optional): append a progress strip indicating temporal
//!    position ([`overlay`]).
//! 5. **Sequence & encode**: write each frame as a scratch PNG inside a
//!    [`FrameArena`], then assemble one looping GIF ([`GifSequencer`]).
//!
//! The pipeline is synchronous, single-threaded, and stateless between
//! calls; the looping GIF is the only artifact that survives a call.
//! Statistics volumes (temporal mean, stdev, SNR) are produced upstream and
//! handed in as already-reduced arrays.
#![forbid(unsafe_code)]

pub mod encode_gif;
pub mod error;
pub mod model;
pub mod normalize;
pub mod orient;
pub mod overlay;
pub mod pipeline;
pub mod slice;

pub use encode_gif::{EncodeConfig, FrameArena, GifSequencer, default_gif_config};
pub use error::{VoxloopError, VoxloopResult};
pub use model::{FrameLa, RenderOptions, SliceAxis};
pub use normalize::normalize;
pub use orient::orient_slice;
pub use overlay::{PROGRESS_STRIP_ROWS, append_strip, bar_width, progress_strip};
pub use pipeline::{gif_output_path, render_center_timeseries, render_volume_gif};
pub use slice::{SliceIter, as_volume3, center_index, extract_slices, fix_axis, fix_axis_center};
