//! Particle simulation: confetti and fireworks advanced one tick per frame.

pub mod entity;
pub mod physics;
pub mod pool;
pub mod random;
pub mod spawn;
