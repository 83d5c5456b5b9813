use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use image::{
    Delay, Frame,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    error::{VoxloopError, VoxloopResult},
    model::FrameLa,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub frame_delay_secs: f64,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> VoxloopResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VoxloopError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if !(self.frame_delay_secs.is_finite() && self.frame_delay_secs > 0.0) {
            return Err(VoxloopError::validation(
                "encode frame delay must be positive and finite",
            ));
        }
        Ok(())
    }

    pub fn with_out_path(mut self, out_path: impl Into<PathBuf>) -> Self {
        self.out_path = out_path.into();
        self
    }
}

pub fn default_gif_config(out_path: impl Into<PathBuf>, width: u32, height: u32) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        frame_delay_secs: 0.1,
        out_path: out_path.into(),
        overwrite: true,
    }
}

/// Scratch directory holding intermediate per-frame PNGs.
///
/// Lives inside the output directory and is removed when dropped, so
/// scratch frames never outlive the encode step on any exit path.
pub struct FrameArena {
    dir: tempfile::TempDir,
}

impl FrameArena {
    pub fn create_in(parent: &Path) -> VoxloopResult<Self> {
        if !parent.is_dir() {
            return Err(VoxloopError::missing_input(format!(
                "output directory '{}' not found",
                parent.display()
            )));
        }
        let dir = tempfile::Builder::new()
            .prefix(".voxloop-frames-")
            .tempdir_in(parent)
            .with_context(|| {
                format!("failed to create frame arena in '{}'", parent.display())
            })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("frame_{index:05}.png"))
    }
}

/// Collects frames as scratch PNGs, then assembles one looping GIF.
pub struct GifSequencer {
    cfg: EncodeConfig,
    arena: FrameArena,
    frames: Vec<PathBuf>,
}

impl GifSequencer {
    pub fn new(cfg: EncodeConfig) -> VoxloopResult<Self> {
        cfg.validate()?;

        let parent = cfg
            .out_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(VoxloopError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        let arena = FrameArena::create_in(parent)?;
        Ok(Self {
            cfg,
            arena,
            frames: Vec::new(),
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self, frame: &FrameLa) -> VoxloopResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(VoxloopError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if frame.data.len() != (frame.width * frame.height * 2) as usize {
            return Err(VoxloopError::validation(
                "frame.data size mismatch with width*height*2",
            ));
        }

        let path = self.arena.frame_path(self.frames.len());
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ExtendedColorType::La8,
            image::ImageFormat::Png,
        )
        .map_err(|e| {
            VoxloopError::encode(format!(
                "failed to write scratch frame '{}': {e}",
                path.display()
            ))
        })?;

        self.frames.push(path);
        Ok(())
    }

    /// Assemble the collected frames into a looping GIF at the configured
    /// output path. Scratch frames are removed whether or not encoding
    /// succeeds; a failed encode also removes the partial output file.
    pub fn finish(self) -> VoxloopResult<PathBuf> {
        let out_path = self.cfg.out_path.clone();
        match self.encode_all() {
            Ok(()) => Ok(out_path),
            Err(err) => {
                let _ = std::fs::remove_file(&out_path);
                Err(err)
            }
        }
    }

    fn encode_all(&self) -> VoxloopResult<()> {
        if self.frames.is_empty() {
            return Err(VoxloopError::encode("no frames to encode"));
        }

        // Encode into memory first: the gif trailer is emitted when the
        // encoder drops, where write errors cannot surface, so the only
        // fallible I/O must be the single write below.
        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut buf, 10);
            encoder.set_repeat(Repeat::Infinite).map_err(|e| {
                VoxloopError::encode(format!("failed to set gif loop mode: {e}"))
            })?;

            for path in &self.frames {
                let rgba = image::open(path)
                    .map_err(|e| {
                        VoxloopError::encode(format!(
                            "failed to read scratch frame '{}': {e}",
                            path.display()
                        ))
                    })?
                    .to_rgba8();

                // GIF delays have centisecond granularity; 0.1s maps exactly.
                let delay = Delay::from_saturating_duration(Duration::from_secs_f64(
                    self.cfg.frame_delay_secs,
                ));
                encoder
                    .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
                    .map_err(|e| {
                        VoxloopError::encode(format!(
                            "failed to encode '{}': {e}",
                            self.cfg.out_path.display()
                        ))
                    })?;
            }
        }

        std::fs::write(&self.cfg.out_path, &buf).map_err(|e| {
            VoxloopError::encode(format!(
                "failed to write '{}': {e}",
                self.cfg.out_path.display()
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_catches_bad_values() {
        assert!(default_gif_config("out.gif", 0, 10).validate().is_err());
        assert!(default_gif_config("out.gif", 10, 0).validate().is_err());

        let mut cfg = default_gif_config("out.gif", 10, 10);
        cfg.frame_delay_secs = 0.0;
        assert!(cfg.validate().is_err());

        assert!(default_gif_config("out.gif", 10, 10).validate().is_ok());
    }

    #[test]
    fn arena_is_removed_on_drop() {
        let parent = tempfile::tempdir().unwrap();
        let scratch_path = {
            let arena = FrameArena::create_in(parent.path()).unwrap();
            assert!(arena.path().is_dir());
            arena.path().to_path_buf()
        };
        assert!(!scratch_path.exists());
    }

    #[test]
    fn sequencer_requires_existing_output_directory() {
        let parent = tempfile::tempdir().unwrap();
        let cfg = default_gif_config(parent.path().join("nope/out.gif"), 4, 4);
        assert!(matches!(
            GifSequencer::new(cfg),
            Err(VoxloopError::MissingInput(_))
        ));
    }

    #[test]
    fn push_frame_rejects_size_mismatch() {
        let parent = tempfile::tempdir().unwrap();
        let cfg = default_gif_config(parent.path().join("out.gif"), 4, 4);
        let mut seq = GifSequencer::new(cfg).unwrap();

        let wrong = FrameLa {
            width: 3,
            height: 4,
            data: vec![0; 24],
        };
        assert!(seq.push_frame(&wrong).is_err());
        assert_eq!(seq.frame_count(), 0);
    }

    fn gray_frame(side: u32, value: u8) -> FrameLa {
        FrameLa {
            width: side,
            height: side,
            data: [value, 255].repeat((side * side) as usize),
        }
    }

    #[test]
    fn finished_gif_ends_with_the_trailer_byte() {
        let parent = tempfile::tempdir().unwrap();
        let out = parent.path().join("out.gif");
        let mut seq = GifSequencer::new(default_gif_config(&out, 4, 4)).unwrap();
        seq.push_frame(&gray_frame(4, 128)).unwrap();

        let gif = seq.finish().unwrap();
        let bytes = std::fs::read(gif).unwrap();
        assert_eq!(bytes.last(), Some(&0x3B), "gif must end with its trailer");
    }

    #[test]
    fn unwritable_output_path_is_an_encode_failure() {
        let parent = tempfile::tempdir().unwrap();
        let out = parent.path().join("out.gif");
        std::fs::create_dir(&out).unwrap();

        let mut seq = GifSequencer::new(default_gif_config(&out, 4, 4)).unwrap();
        seq.push_frame(&gray_frame(4, 128)).unwrap();
        assert!(matches!(seq.finish(), Err(VoxloopError::Encode(_))));
    }

    #[test]
    fn finish_without_frames_is_an_encode_failure() {
        let parent = tempfile::tempdir().unwrap();
        let out = parent.path().join("out.gif");
        let seq = GifSequencer::new(default_gif_config(&out, 4, 4)).unwrap();
        assert!(matches!(seq.finish(), Err(VoxloopError::Encode(_))));
        assert!(!out.exists());
    }
}
