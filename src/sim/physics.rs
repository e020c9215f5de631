//! Fixed physics constants. These are tuning values, not configuration.

/// Downward acceleration applied to confetti and sparks, in px/tick².
pub const GRAVITY: f64 = 0.12;
/// Downward acceleration applied to unexploded rockets, in px/tick².
pub const ROCKET_GRAVITY: f64 = 0.18;

/// Per-tick horizontal velocity multiplier for sparks.
pub const SPARK_DRAG_X: f64 = 0.995;
/// Per-tick vertical velocity multiplier for sparks.
pub const SPARK_DRAG_Y: f64 = 0.998;

/// Rockets explode once they rise above this fraction of the canvas height (measured from the top).
pub const EXPLODE_HEIGHT_FRACTION: f64 = 0.25;
/// Rocket launch speed is `ROCKET_SPEED_MIN + U[0, ROCKET_SPEED_SPREAD)`, directed upward.
pub const ROCKET_SPEED_MIN: f64 = 8.0;
pub const ROCKET_SPEED_SPREAD: f64 = 6.0;

pub const SPARK_COUNT_MIN: i64 = 18;
pub const SPARK_COUNT_MAX: i64 = 54;
/// Base burst speed is drawn from `[BURST_SPEED_MIN, BURST_SPEED_MIN + BURST_SPEED_SPREAD)`.
pub const BURST_SPEED_MIN: f64 = 3.0;
pub const BURST_SPEED_SPREAD: f64 = 4.0;
/// Per-spark multiplier on the burst speed, `[SPARK_SPEED_MUL_MIN, +SPARK_SPEED_MUL_SPREAD)`.
pub const SPARK_SPEED_MUL_MIN: f64 = 0.6;
pub const SPARK_SPEED_MUL_SPREAD: f64 = 1.4;
/// Added to every spark's vertical velocity at burst time.
pub const SPARK_UPWARD_BIAS: f64 = -1.0;
/// Spark lifetime range in ticks, half-open.
pub const SPARK_LIFE_MIN: i64 = 20;
pub const SPARK_LIFE_END: i64 = 80;
/// Maximum per-channel color deviation of a spark from its rocket.
pub const SPARK_COLOR_JITTER: i64 = 30;

/// Confetti horizontal launch speed range is `[-CONFETTI_VX_HALF_SPAN, CONFETTI_VX_HALF_SPAN)`.
pub const CONFETTI_VX_HALF_SPAN: f64 = 15.0;
/// Confetti vertical launch speed is `-(CONFETTI_VY_MIN + U[0, CONFETTI_VY_SPREAD))`.
pub const CONFETTI_VY_MIN: f64 = 12.0;
pub const CONFETTI_VY_SPREAD: f64 = 24.0;
pub const CONFETTI_SIZE_MIN: i64 = 18;
pub const CONFETTI_SIZE_MAX: i64 = 32;
pub const CONFETTI_LIFE_JITTER: i64 = 20;
pub const CONFETTI_LIFE_FLOOR: i64 = 10;

/// Confetti spawn band covers the top 60% of the canvas.
pub const CONFETTI_BAND_FRACTION: f64 = 0.6;
