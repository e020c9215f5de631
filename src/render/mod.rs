//! CPU rasterization of the entity pool.

pub mod frame;
pub mod raster;

pub use frame::{DrawStats, RenderedFrame, render_frame};
