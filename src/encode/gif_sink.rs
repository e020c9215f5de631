use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use tracing::info;

use crate::encode::quantize::IndexedFrame;
use crate::encode::sink::{FrameSink, SinkConfig, check_order};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CelebrationError, CelebrationResult};

pub fn ensure_parent_dir(path: &Path) -> CelebrationResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// GIF frame delays are stored in hundredths of a second.
pub fn delay_centis(frame_delay_ms: u32) -> u16 {
    (frame_delay_ms / 10).min(u32::from(u16::MAX)) as u16
}

/// Collects indexed frames and writes one infinitely looping GIF in [`FrameSink::end`].
///
/// Nothing touches `out_path` until every frame has been pushed; the file is written next to it
/// and renamed into place, so an aborted run never leaves a truncated animation behind.
pub struct GifSink {
    out_path: PathBuf,
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, IndexedFrame)>,
}

impl GifSink {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            cfg: None,
            frames: Vec::new(),
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .out_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        self.out_path.with_file_name(name)
    }

    fn write_all(&self, cfg: SinkConfig, path: &Path) -> CelebrationResult<()> {
        let width = cfg.canvas.width as u16;
        let height = cfg.canvas.height as u16;
        let delay = delay_centis(cfg.frame_delay_ms);

        let file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        let mut encoder = gif::Encoder::new(BufWriter::new(file), width, height, &[])?;
        encoder.set_repeat(gif::Repeat::Infinite)?;

        for (_, frame) in &self.frames {
            let mut gif_frame = gif::Frame::default();
            gif_frame.width = width;
            gif_frame.height = height;
            gif_frame.delay = delay;
            gif_frame.palette = Some(frame.palette.clone());
            gif_frame.buffer = Cow::Borrowed(frame.indices.as_slice());
            encoder.write_frame(&gif_frame)?;
        }

        let mut writer = encoder.into_inner()?;
        writer.flush()?;
        Ok(())
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> CelebrationResult<()> {
        cfg.canvas.validate()?;
        ensure_parent_dir(&self.out_path)?;
        self.frames.clear();
        self.frames.reserve(cfg.frame_count.min(4096) as usize);
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: IndexedFrame) -> CelebrationResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(CelebrationError::encode("gif sink used before begin"));
        };
        if frame.width != cfg.canvas.width || frame.height != cfg.canvas.height {
            return Err(CelebrationError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.canvas.width, cfg.canvas.height
            )));
        }
        check_order(self.frames.last().map(|(i, _)| *i), idx)?;
        self.frames.push((idx, frame));
        Ok(())
    }

    fn end(&mut self) -> CelebrationResult<()> {
        let Some(cfg) = self.cfg.take() else {
            return Err(CelebrationError::encode("gif sink finished before begin"));
        };
        if self.frames.is_empty() {
            return Err(CelebrationError::encode("no frames to write"));
        }

        let staging = self.staging_path();
        if let Err(err) = self.write_all(cfg, &staging) {
            let _ = std::fs::remove_file(&staging);
            return Err(err);
        }
        std::fs::rename(&staging, &self.out_path).with_context(|| {
            format!(
                "failed to move '{}' into place at '{}'",
                staging.display(),
                self.out_path.display()
            )
        })?;

        info!(
            path = %self.out_path.display(),
            frames = self.frames.len(),
            "wrote gif"
        );
        self.frames.clear();
        Ok(())
    }
}
