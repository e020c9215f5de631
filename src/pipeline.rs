use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::CelebrationConfig;
use crate::encode::gif_sink::GifSink;
use crate::encode::quantize::{DEFAULT_SAMPLE_FACTOR, quantize};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::CelebrationResult;
use crate::render::{RenderedFrame, render_frame};
use crate::sim::pool::{EntityPool, PoolCounters, step};
use crate::sim::random::{RandomSource, SeededRng};
use crate::sim::spawn;

/// The simulation state owned by the driver: configuration, random source, pool and clock.
pub struct Simulation<R> {
    cfg: CelebrationConfig,
    rng: R,
    pool: EntityPool,
    next_tick: FrameIndex,
}

impl Simulation<SeededRng> {
    /// Seed a simulation from `cfg.seed`.
    pub fn new(cfg: CelebrationConfig) -> CelebrationResult<Self> {
        let rng = SeededRng::new(cfg.seed);
        Self::with_rng(cfg, rng)
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Validate `cfg` and spawn the initial population from `rng`.
    pub fn with_rng(cfg: CelebrationConfig, mut rng: R) -> CelebrationResult<Self> {
        cfg.validate()?;
        let pool = spawn::initial_pool(&cfg, &mut rng);
        Ok(Self {
            cfg,
            rng,
            pool,
            next_tick: FrameIndex(0),
        })
    }

    pub fn config(&self) -> &CelebrationConfig {
        &self.cfg
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn next_tick(&self) -> FrameIndex {
        self.next_tick
    }

    /// Run one tick of spawning and physics. Returns the tick that was processed.
    pub fn advance(&mut self) -> FrameIndex {
        let tick = self.next_tick;
        let pool = std::mem::take(&mut self.pool);
        self.pool = step(pool, tick, &self.cfg, &mut self.rng);
        self.next_tick = FrameIndex(tick.0 + 1);
        tick
    }

    /// Rasterize the current pool.
    pub fn render(&self) -> CelebrationResult<RenderedFrame> {
        render_frame(&self.pool, self.cfg.canvas, self.cfg.background)
    }
}

/// What a finished run produced.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub out_path: Option<PathBuf>,
    pub peak_confetti: usize,
    pub peak_fireworks: usize,
    /// Confetti drawn into the first frame.
    pub first_frame_confetti: usize,
    /// Rocket heads drawn into the first frame.
    pub first_frame_rockets: usize,
    pub totals: PoolCounters,
}

/// Simulate, render, quantize and push every frame of the run into `sink`.
#[tracing::instrument(skip_all, fields(seed = sim.config().seed))]
pub fn run_into_sink<R: RandomSource>(
    mut sim: Simulation<R>,
    sink: &mut dyn FrameSink,
) -> CelebrationResult<RunSummary> {
    let total = sim.config().total_frames();
    let progress_every = sim.config().progress_every;

    sink.begin(SinkConfig {
        canvas: sim.config().canvas,
        frame_delay_ms: sim.config().frame_delay_ms(),
        frame_count: total,
    })?;

    let mut summary = RunSummary::default();
    for _ in 0..total {
        let tick = sim.advance();
        let rendered = sim.render()?;

        if tick.0 == 0 {
            summary.first_frame_confetti = rendered.stats.confetti;
            summary.first_frame_rockets = rendered.stats.rocket_heads;
        }
        summary.peak_confetti = summary.peak_confetti.max(sim.pool().confetti.len());
        summary.peak_fireworks = summary.peak_fireworks.max(sim.pool().fireworks.len());

        let indexed = quantize(&rendered.image, DEFAULT_SAMPLE_FACTOR)?;
        sink.push_frame(tick, indexed)?;
        summary.frames += 1;

        if progress_every > 0 && tick.0 % progress_every == 0 {
            info!(
                frame = tick.0,
                total,
                confetti = rendered.stats.confetti,
                sparks = rendered.stats.sparks,
                "rendered frame {}/{}",
                tick.0,
                total
            );
        }
    }

    sink.end()?;
    summary.totals = sim.pool().counters;
    Ok(summary)
}

/// Run the seeded simulation described by `cfg` and write it as a looping GIF at `out_path`.
pub fn generate_gif(cfg: CelebrationConfig, out_path: &Path) -> CelebrationResult<RunSummary> {
    let sim = Simulation::new(cfg)?;
    let mut sink = GifSink::new(out_path);
    let mut summary = run_into_sink(sim, &mut sink)?;
    summary.out_path = Some(out_path.to_path_buf());
    Ok(summary)
}
