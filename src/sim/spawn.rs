//! Opening population, rocket launches and confetti refills.

use crate::config::CelebrationConfig;
use crate::foundation::core::{Point, Rgb8, Vec2};
use crate::sim::entity::{Confetti, Firework};
use crate::sim::physics::{
    CONFETTI_BAND_FRACTION, CONFETTI_LIFE_FLOOR, CONFETTI_LIFE_JITTER, CONFETTI_SIZE_MAX,
    CONFETTI_SIZE_MIN, CONFETTI_VX_HALF_SPAN, CONFETTI_VY_MIN, CONFETTI_VY_SPREAD,
    ROCKET_SPEED_MIN, ROCKET_SPEED_SPREAD,
};
use crate::sim::pool::EntityPool;
use crate::sim::random::RandomSource;

fn pick_color<R: RandomSource + ?Sized>(palette: &[Rgb8], rng: &mut R) -> Rgb8 {
    palette[rng.index(palette.len())]
}

/// A confetti piece at `pos` with randomized launch velocity, color, size and lifetime.
pub fn confetti_at<R: RandomSource + ?Sized>(
    cfg: &CelebrationConfig,
    pos: Point,
    rng: &mut R,
) -> Confetti {
    let vx = (rng.unit() - 0.5) * (2.0 * CONFETTI_VX_HALF_SPAN);
    let vy = -(CONFETTI_VY_MIN + rng.unit() * CONFETTI_VY_SPREAD);
    let color = pick_color(&cfg.palette, rng);
    let jitter = rng.int_inclusive(-CONFETTI_LIFE_JITTER, CONFETTI_LIFE_JITTER);
    let max_life = (cfg.confetti_base_ticks() + jitter).max(CONFETTI_LIFE_FLOOR) as u32;
    let size = rng.int_inclusive(CONFETTI_SIZE_MIN, CONFETTI_SIZE_MAX) as u32;

    Confetti {
        pos,
        vel: Vec2::new(vx, vy),
        color,
        size,
        max_life,
        life: max_life,
    }
}

/// A confetti piece somewhere in the top band of the canvas.
pub fn confetti_in_band<R: RandomSource + ?Sized>(
    cfg: &CelebrationConfig,
    rng: &mut R,
) -> Confetti {
    let x = rng.unit() * cfg.canvas.width_f64();
    let y = rng.unit() * cfg.canvas.height_f64() * CONFETTI_BAND_FRACTION;
    confetti_at(cfg, Point::new(x, y), rng)
}

/// A rocket at a random x on the launch line.
pub fn rocket<R: RandomSource + ?Sized>(cfg: &CelebrationConfig, rng: &mut R) -> Firework {
    let x = rng.unit() * cfg.canvas.width_f64();
    let vy = -(ROCKET_SPEED_MIN + rng.unit() * ROCKET_SPEED_SPREAD);
    let color = pick_color(&cfg.palette, rng);
    Firework::launch(Point::new(x, cfg.launch_y()), vy, color)
}

/// The opening burst of confetti plus the first volley of rockets.
pub fn initial_pool<R: RandomSource + ?Sized>(cfg: &CelebrationConfig, rng: &mut R) -> EntityPool {
    let mut pool = EntityPool::default();
    pool.confetti.reserve(cfg.initial_confetti);
    for _ in 0..cfg.initial_confetti {
        pool.confetti.push(confetti_in_band(cfg, rng));
    }
    for _ in 0..cfg.initial_rockets {
        pool.fireworks.push(rocket(cfg, rng));
    }
    pool.counters.confetti_spawned += cfg.initial_confetti as u64;
    pool.counters.rockets_launched += cfg.initial_rockets as u64;
    pool
}

/// Launch one extra rocket with probability `rocket_spawn_chance`.
pub fn maybe_launch_rocket<R: RandomSource + ?Sized>(
    pool: &mut EntityPool,
    cfg: &CelebrationConfig,
    rng: &mut R,
) -> bool {
    if !rng.chance(cfg.rocket_spawn_chance) {
        return false;
    }
    pool.fireworks.push(rocket(cfg, rng));
    pool.counters.rockets_launched += 1;
    true
}

/// Top up confetti by one batch when density has dropped below the opening count.
///
/// The probability draw is only made while the pool is below target.
pub fn maybe_replenish_confetti<R: RandomSource + ?Sized>(
    pool: &mut EntityPool,
    cfg: &CelebrationConfig,
    rng: &mut R,
) -> bool {
    if pool.confetti.len() >= cfg.initial_confetti || !rng.chance(cfg.confetti_refill_chance) {
        return false;
    }
    for _ in 0..cfg.confetti_refill_batch {
        pool.confetti.push(confetti_in_band(cfg, rng));
    }
    pool.counters.confetti_spawned += cfg.confetti_refill_batch as u64;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::SeededRng;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn unit(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn confetti_draws_stay_in_bounds() {
        let cfg = CelebrationConfig::default();
        let mut rng = SeededRng::new(42);
        for _ in 0..2000 {
            let c = confetti_in_band(&cfg, &mut rng);
            assert!((0.0..700.0).contains(&c.pos.x));
            assert!((0.0..450.0).contains(&c.pos.y));
            assert!((-15.0..15.0).contains(&c.vel.x));
            assert!(c.vel.y <= -12.0 && c.vel.y > -36.0);
            assert!((18..=32).contains(&c.size));
            assert!((105..=145).contains(&c.max_life));
            assert_eq!(c.life, c.max_life);
            assert!(cfg.palette.contains(&c.color));
        }
    }

    #[test]
    fn confetti_lifetime_has_a_floor() {
        let cfg = CelebrationConfig {
            confetti_life_ms: 0,
            ..CelebrationConfig::default()
        };
        let c = confetti_at(&cfg, Point::ORIGIN, &mut Fixed(0.0));
        assert_eq!(c.max_life, 10);
    }

    #[test]
    fn confetti_extremes() {
        let cfg = CelebrationConfig::default();
        let lo = confetti_at(&cfg, Point::ORIGIN, &mut Fixed(0.0));
        assert_eq!(lo.vel, Vec2::new(-15.0, -12.0));
        assert_eq!(lo.size, 18);
        assert_eq!(lo.max_life, 105);
        assert_eq!(lo.color, cfg.palette[0]);

        let hi = confetti_at(&cfg, Point::ORIGIN, &mut Fixed(0.999_999));
        assert_eq!(hi.size, 32);
        assert_eq!(hi.max_life, 145);
        assert_eq!(hi.color, cfg.palette[6]);
    }

    #[test]
    fn rockets_start_on_the_launch_line_moving_up() {
        let cfg = CelebrationConfig::default();
        let mut rng = SeededRng::new(9);
        for _ in 0..200 {
            let r = rocket(&cfg, &mut rng);
            assert_eq!(r.pos.y, 675.0);
            assert!(r.vy <= -8.0 && r.vy > -14.0);
            assert!(!r.exploded());
            assert!(r.sparks().is_empty());
        }
    }

    #[test]
    fn initial_pool_matches_config_counts() {
        let cfg = CelebrationConfig::default();
        let pool = initial_pool(&cfg, &mut SeededRng::new(42));
        assert_eq!(pool.confetti.len(), 700);
        assert_eq!(pool.fireworks.len(), 10);
        assert_eq!(pool.counters.rockets_launched, 10);
        assert_eq!(pool.counters.confetti_spawned, 700);
    }

    #[test]
    fn rocket_launch_follows_the_chance_draw() {
        let cfg = CelebrationConfig::default();
        let mut pool = EntityPool::default();
        assert!(maybe_launch_rocket(&mut pool, &cfg, &mut Fixed(0.1)));
        assert!(!maybe_launch_rocket(&mut pool, &cfg, &mut Fixed(0.5)));
        assert_eq!(pool.fireworks.len(), 1);
    }

    #[test]
    fn replenish_only_below_target() {
        let cfg = CelebrationConfig {
            initial_confetti: 3,
            confetti_refill_batch: 50,
            ..CelebrationConfig::default()
        };
        let mut pool = EntityPool::default();
        assert!(!maybe_replenish_confetti(&mut pool, &cfg, &mut Fixed(0.5)));
        assert!(maybe_replenish_confetti(&mut pool, &cfg, &mut Fixed(0.1)));
        assert_eq!(pool.confetti.len(), 50);
        assert!(!maybe_replenish_confetti(&mut pool, &cfg, &mut Fixed(0.0)));
        assert_eq!(pool.confetti.len(), 50);
    }
}
