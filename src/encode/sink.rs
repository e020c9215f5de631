use crate::encode::quantize::IndexedFrame;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{CelebrationError, CelebrationResult};

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub canvas: Canvas,
    /// Display duration of each frame in milliseconds.
    pub frame_delay_ms: u32,
    /// Number of frames the driver will push.
    pub frame_count: u64,
}

/// Consumer of indexed frames in timeline order.
///
/// `push_frame` is called with strictly increasing `FrameIndex` values between one `begin` and
/// one `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> CelebrationResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: IndexedFrame) -> CelebrationResult<()>;
    fn end(&mut self) -> CelebrationResult<()>;
}

/// Keeps every frame in memory. Used by tests and by callers that post-process frames.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, IndexedFrame)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, IndexedFrame)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CelebrationResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: IndexedFrame) -> CelebrationResult<()> {
        check_order(self.frames.last().map(|(i, _)| *i), idx)?;
        self.frames.push((idx, frame));
        Ok(())
    }

    fn end(&mut self) -> CelebrationResult<()> {
        self.finished = true;
        Ok(())
    }
}

pub(crate) fn check_order(last: Option<FrameIndex>, next: FrameIndex) -> CelebrationResult<()> {
    match last {
        Some(prev) if next <= prev => Err(CelebrationError::validation(format!(
            "frame {} pushed after frame {}",
            next.0, prev.0
        ))),
        _ => Ok(()),
    }
}
