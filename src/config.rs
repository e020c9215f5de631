use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CelebrationError, CelebrationResult};

/// The seven confetti/rocket colors of the reference animation.
pub const DEFAULT_PALETTE: [Rgb8; 7] = [
    Rgb8::new(0xFF, 0x6B, 0x6B),
    Rgb8::new(0x4E, 0xCD, 0xC4),
    Rgb8::new(0xFF, 0xE6, 0x6D),
    Rgb8::new(0xFF, 0x8A, 0x65),
    Rgb8::new(0xAE, 0x73, 0xDC),
    Rgb8::new(0xFF, 0x14, 0x93),
    Rgb8::new(0x00, 0xCE, 0xD1),
];

/// Scene parameters for one generation run.
///
/// `Default` yields the reference animation: 700x750, 25 fps for 15 s, seed 42. Physics
/// constants are not part of this struct and live in [`crate::sim::physics`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CelebrationConfig {
    pub canvas: Canvas,
    pub fps: u32,
    pub duration_secs: u32,
    pub seed: u64,
    pub background: Rgb8,
    pub palette: Vec<Rgb8>,
    /// Confetti count of the opening burst; also the density floor for replenishment.
    pub initial_confetti: usize,
    pub initial_rockets: usize,
    /// Per-tick probability of launching one extra rocket.
    pub rocket_spawn_chance: f64,
    /// Per-tick probability of topping up confetti while below `initial_confetti`.
    pub confetti_refill_chance: f64,
    pub confetti_refill_batch: usize,
    /// Nominal confetti lifetime before per-piece jitter.
    pub confetti_life_ms: u32,
    /// Log a progress line every N frames (0 disables).
    pub progress_every: u64,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 700,
                height: 750,
            },
            fps: 25,
            duration_secs: 15,
            seed: 42,
            background: Rgb8::new(10, 10, 10),
            palette: DEFAULT_PALETTE.to_vec(),
            initial_confetti: 700,
            initial_rockets: 10,
            rocket_spawn_chance: 0.12,
            confetti_refill_chance: 0.2,
            confetti_refill_batch: 50,
            confetti_life_ms: 5000,
            progress_every: 50,
        }
    }
}

impl CelebrationConfig {
    pub fn load(path: &Path) -> CelebrationResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CelebrationResult<()> {
        self.canvas.validate()?;
        if self.fps == 0 || self.fps > 1000 {
            return Err(CelebrationError::validation("fps must be in 1..=1000"));
        }
        if self.duration_secs == 0 {
            return Err(CelebrationError::validation(
                "duration_secs must be non-zero",
            ));
        }
        if self.palette.is_empty() {
            return Err(CelebrationError::validation("palette must not be empty"));
        }
        for (name, p) in [
            ("rocket_spawn_chance", self.rocket_spawn_chance),
            ("confetti_refill_chance", self.confetti_refill_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CelebrationError::validation(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }

    /// Number of frames (= ticks) in the run.
    pub fn total_frames(&self) -> u64 {
        u64::from(self.fps) * u64::from(self.duration_secs)
    }

    /// Per-frame display duration, truncated to whole milliseconds.
    pub fn frame_delay_ms(&self) -> u32 {
        1000 / self.fps
    }

    /// Confetti base lifetime expressed in ticks.
    pub fn confetti_base_ticks(&self) -> i64 {
        (f64::from(self.confetti_life_ms) / (1000.0 / f64::from(self.fps))) as i64
    }

    /// y coordinate rockets launch from (90% of the canvas height).
    pub fn launch_y(&self) -> f64 {
        self.canvas.height_f64() * 0.9
    }
}
