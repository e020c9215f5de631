//! Procedural celebration art for a rock/paper/scissors game.
//!
//! The core is a seeded particle simulation (falling confetti plus fireworks that climb, burst and
//! fade) advanced one tick per frame, rasterized onto a fixed canvas, quantized to an adaptive
//! palette and written as a looping GIF:
//!
//! - Build a [`CelebrationConfig`] (the default is the reference animation)
//! - Create a [`Simulation`] and drive it with [`run_into_sink`], or call [`generate_gif`]
//!
//! [`icons`] draws the three hand-shape PNGs the game UI uses.
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod encode;
pub mod icons;
pub mod pipeline;
pub mod render;
pub mod sim;

pub use crate::config::CelebrationConfig;
pub use crate::encode::gif_sink::GifSink;
pub use crate::encode::quantize::IndexedFrame;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Canvas, FrameIndex, Point, Rgb8, Rgba8, Vec2};
pub use crate::foundation::error::{CelebrationError, CelebrationResult};
pub use crate::pipeline::{RunSummary, Simulation, generate_gif, run_into_sink};
pub use crate::render::{DrawStats, RenderedFrame, render_frame};
pub use crate::sim::entity::{Confetti, EntityRef, Firework, Lifespan, Spark};
pub use crate::sim::pool::{EntityPool, PoolCounters, step};
pub use crate::sim::random::{RandomSource, SeededRng};
