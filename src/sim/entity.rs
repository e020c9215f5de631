//! Confetti, sparks and fireworks with their per-tick motion and lifetimes.

use crate::foundation::core::{Point, Rgb8, Vec2};
use crate::sim::physics::{
    BURST_SPEED_MIN, BURST_SPEED_SPREAD, EXPLODE_HEIGHT_FRACTION, GRAVITY, ROCKET_GRAVITY,
    SPARK_COLOR_JITTER, SPARK_COUNT_MAX, SPARK_COUNT_MIN, SPARK_DRAG_X, SPARK_DRAG_Y,
    SPARK_LIFE_END, SPARK_LIFE_MIN, SPARK_SPEED_MUL_MIN, SPARK_SPEED_MUL_SPREAD,
    SPARK_UPWARD_BIAS,
};
use crate::sim::random::RandomSource;

/// Capability shared by entities with a finite lifetime measured in ticks.
pub trait Lifespan {
    fn life(&self) -> u32;
    fn max_life(&self) -> u32;

    fn is_alive(&self) -> bool {
        self.life() > 0
    }

    /// Remaining life over maximum life, clamped to `[0, 1]`.
    fn fade_ratio(&self) -> f64 {
        if self.max_life() == 0 {
            return 0.0;
        }
        (f64::from(self.life()) / f64::from(self.max_life())).clamp(0.0, 1.0)
    }
}

/// A falling confetti piece, drawn as a filled circle of `size` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Confetti {
    pub pos: Point,
    pub vel: Vec2,
    pub color: Rgb8,
    pub size: u32,
    pub max_life: u32,
    pub life: u32,
}

impl Confetti {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += GRAVITY;
        self.life = self.life.saturating_sub(1);
    }
}

impl Lifespan for Confetti {
    fn life(&self) -> u32 {
        self.life
    }

    fn max_life(&self) -> u32 {
        self.max_life
    }
}

/// One fragment of an exploded firework.
#[derive(Clone, Debug, PartialEq)]
pub struct Spark {
    pub pos: Point,
    pub vel: Vec2,
    pub color: Rgb8,
    pub max_life: u32,
    pub life: u32,
}

impl Spark {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += GRAVITY;
        self.vel.x *= SPARK_DRAG_X;
        self.vel.y *= SPARK_DRAG_Y;
        self.life = self.life.saturating_sub(1);
    }
}

impl Lifespan for Spark {
    fn life(&self) -> u32 {
        self.life
    }

    fn max_life(&self) -> u32 {
        self.max_life
    }
}

/// A rocket that climbs until it stalls or reaches the top quarter, then bursts into sparks.
///
/// `exploded` only ever goes from `false` to `true`; the spark list is empty until then.
#[derive(Clone, Debug, PartialEq)]
pub struct Firework {
    pub pos: Point,
    /// Vertical velocity, negative is upward.
    pub vy: f64,
    pub color: Rgb8,
    exploded: bool,
    sparks: Vec<Spark>,
}

impl Firework {
    pub fn launch(pos: Point, vy: f64, color: Rgb8) -> Self {
        Self {
            pos,
            vy,
            color,
            exploded: false,
            sparks: Vec::new(),
        }
    }

    pub fn exploded(&self) -> bool {
        self.exploded
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Exploded with every spark burned out.
    pub fn is_finished(&self) -> bool {
        self.exploded && self.sparks.is_empty()
    }

    /// Advance one tick. Returns `true` on the tick the rocket bursts.
    pub fn update<R: RandomSource + ?Sized>(&mut self, canvas_height: f64, rng: &mut R) -> bool {
        if self.exploded {
            for s in &mut self.sparks {
                s.update();
            }
            self.sparks.retain(Spark::is_alive);
            return false;
        }

        self.pos.y += self.vy;
        self.vy += ROCKET_GRAVITY;
        if self.vy >= 0.0 || self.pos.y < canvas_height * EXPLODE_HEIGHT_FRACTION {
            self.explode(rng);
            return true;
        }
        false
    }

    fn explode<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        debug_assert!(!self.exploded);
        self.exploded = true;

        let count = rng.int_inclusive(SPARK_COUNT_MIN, SPARK_COUNT_MAX) as usize;
        let base = BURST_SPEED_MIN + rng.unit() * BURST_SPEED_SPREAD;
        self.sparks.reserve_exact(count);
        for _ in 0..count {
            let angle = rng.unit() * std::f64::consts::TAU;
            let speed = base * (SPARK_SPEED_MUL_MIN + rng.unit() * SPARK_SPEED_MUL_SPREAD);
            let vel = Vec2::new(
                angle.cos() * speed,
                angle.sin() * speed + SPARK_UPWARD_BIAS,
            );
            let life = rng.int_inclusive(SPARK_LIFE_MIN, SPARK_LIFE_END - 1) as u32;
            let color = Rgb8::new(
                jitter_channel(self.color.r, rng),
                jitter_channel(self.color.g, rng),
                jitter_channel(self.color.b, rng),
            );
            self.sparks.push(Spark {
                pos: self.pos,
                vel,
                color,
                max_life: life,
                life,
            });
        }
    }
}

fn jitter_channel<R: RandomSource + ?Sized>(c: u8, rng: &mut R) -> u8 {
    let delta = rng.int_inclusive(-SPARK_COLOR_JITTER, SPARK_COLOR_JITTER);
    (i64::from(c) + delta).clamp(0, 255) as u8
}

/// Borrowed view of one drawable entity, tagged by kind.
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Confetti(&'a Confetti),
    /// A firework, exploded or not. Its sparks are yielded separately once it has burst.
    Rocket(&'a Firework),
    Spark(&'a Spark),
}

impl EntityRef<'_> {
    /// Whether the entity should leave the pool.
    pub fn is_removable(&self) -> bool {
        match self {
            EntityRef::Confetti(c) => !c.is_alive(),
            EntityRef::Rocket(f) => f.is_finished(),
            EntityRef::Spark(s) => !s.is_alive(),
        }
    }
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

    fn confetti(life: u32) -> Confetti {
        Confetti {
            pos: Point::new(10.0, 20.0),
            vel: Vec2::new(1.0, -2.0),
            color: Rgb8::new(255, 0, 0),
            size: 20,
            max_life: life,
            life,
        }
    }

    #[test]
    fn confetti_moves_then_accelerates() {
        let mut c = confetti(5);
        c.update();
        assert_eq!(c.pos, Point::new(11.0, 18.0));
        assert!((c.vel.y - (-2.0 + GRAVITY)).abs() < 1e-12);
        assert_eq!(c.vel.x, 1.0);
        assert_eq!(c.life, 4);
    }

    #[test]
    fn confetti_dies_exactly_at_zero() {
        let mut c = confetti(3);
        for expected in [2, 1] {
            c.update();
            assert_eq!(c.life, expected);
            assert!(c.is_alive());
        }
        c.update();
        assert_eq!(c.life, 0);
        assert!(!c.is_alive());
        assert!(EntityRef::Confetti(&c).is_removable());
    }

    #[test]
    fn spark_applies_gravity_then_drag() {
        let mut s = Spark {
            pos: Point::new(0.0, 0.0),
            vel: Vec2::new(2.0, 1.0),
            color: Rgb8::new(0, 0, 0),
            max_life: 10,
            life: 10,
        };
        s.update();
        assert_eq!(s.pos, Point::new(2.0, 1.0));
        assert!((s.vel.x - 2.0 * SPARK_DRAG_X).abs() < 1e-12);
        assert!((s.vel.y - (1.0 + GRAVITY) * SPARK_DRAG_Y).abs() < 1e-12);
        assert_eq!(s.life, 9);
    }

    #[test]
    fn fade_ratio_is_clamped() {
        let mut c = confetti(10);
        assert_eq!(c.fade_ratio(), 1.0);
        c.life = 5;
        assert_eq!(c.fade_ratio(), 0.5);
        c.life = 0;
        assert_eq!(c.fade_ratio(), 0.0);
        c.max_life = 0;
        assert_eq!(c.fade_ratio(), 0.0);
    }

    #[test]
    fn rocket_climbs_with_steeper_gravity() {
        let mut rng = SeededRng::new(1);
        let mut fw = Firework::launch(Point::new(100.0, 675.0), -10.0, Rgb8::new(1, 2, 3));
        assert!(!fw.update(750.0, &mut rng));
        assert_eq!(fw.pos.y, 665.0);
        assert!((fw.vy - (-10.0 + ROCKET_GRAVITY)).abs() < 1e-12);
        assert!(fw.sparks().is_empty());
    }

    #[test]
    fn rocket_explodes_when_stalled() {
        let mut rng = SeededRng::new(2);
        let mut fw = Firework::launch(Point::new(100.0, 500.0), -0.1, Rgb8::new(1, 2, 3));
        assert!(fw.update(750.0, &mut rng));
        assert!(fw.exploded());
        assert!(!fw.sparks().is_empty());
    }

    #[test]
    fn rocket_explodes_in_top_quarter() {
        let mut rng = SeededRng::new(3);
        let mut fw = Firework::launch(Point::new(100.0, 200.0), -13.0, Rgb8::new(1, 2, 3));
        assert!(fw.update(750.0, &mut rng));
        assert!(fw.vy < 0.0);
        assert!(fw.exploded());
    }

    #[test]
    fn explosion_happens_once_and_never_reverts() {
        let mut rng = SeededRng::new(4);
        let mut fw = Firework::launch(Point::new(100.0, 400.0), -1.0, Rgb8::new(200, 100, 50));
        let mut bursts = 0;
        for _ in 0..200 {
            let was = fw.exploded();
            if fw.update(750.0, &mut rng) {
                bursts += 1;
            }
            if was {
                assert!(fw.exploded());
            }
        }
        assert_eq!(bursts, 1);
        assert!(fw.is_finished());
        assert!(EntityRef::Rocket(&fw).is_removable());
    }

    #[test]
    fn burst_spark_count_and_lifetimes_are_bounded() {
        for seed in 0..50 {
            let mut rng = SeededRng::new(seed);
            let mut fw = Firework::launch(Point::new(0.0, 100.0), -1.0, Rgb8::new(250, 5, 128));
            assert!(fw.update(750.0, &mut rng));
            let n = fw.sparks().len() as i64;
            assert!((SPARK_COUNT_MIN..=SPARK_COUNT_MAX).contains(&n));
            for s in fw.sparks() {
                assert!((SPARK_LIFE_MIN..SPARK_LIFE_END).contains(&i64::from(s.life)));
                assert_eq!(s.life, s.max_life);
                assert_eq!(s.pos, fw.pos);
                assert!(s.color.r.abs_diff(250) <= 30);
                assert!(s.color.g <= 35);
                assert!(s.color.b.abs_diff(128) <= 30);
            }
        }
    }

    #[test]
    fn burst_extremes_follow_the_draw_bounds() {
        let mut low = Firework::launch(Point::new(0.0, 100.0), -1.0, Rgb8::new(0, 0, 0));
        low.update(750.0, &mut Fixed(0.0));
        assert_eq!(low.sparks().len(), 18);
        let s = &low.sparks()[0];
        assert_eq!(s.life, 20);
        assert_eq!(s.color, Rgb8::new(0, 0, 0));
        // angle 0, speed 3.0 * 0.6
        assert!((s.vel.x - 1.8).abs() < 1e-12);
        assert!((s.vel.y - SPARK_UPWARD_BIAS).abs() < 1e-12);

        let mut high = Firework::launch(Point::new(0.0, 100.0), -1.0, Rgb8::new(255, 255, 255));
        high.update(750.0, &mut Fixed(0.999_999));
        assert_eq!(high.sparks().len(), 54);
        assert!(high.sparks().iter().all(|s| s.life == 79));
        assert!(
            high.sparks()
                .iter()
                .all(|s| s.color == Rgb8::new(255, 255, 255))
        );
    }

    #[test]
    fn exploded_firework_prunes_dead_sparks() {
        let mut rng = SeededRng::new(5);
        let mut fw = Firework::launch(Point::new(0.0, 100.0), -1.0, Rgb8::new(9, 9, 9));
        fw.update(750.0, &mut rng);
        let before = fw.sparks().len();
        let shortest = fw.sparks().iter().map(|s| s.life).min().unwrap();
        for _ in 1..shortest {
            fw.update(750.0, &mut rng);
        }
        assert_eq!(fw.sparks().len(), before);
        assert!(fw.sparks().iter().all(|s| s.life >= 1));

        fw.update(750.0, &mut rng);
        assert!(fw.sparks().len() < before);
        assert!(fw.sparks().iter().all(Spark::is_alive));
    }
}
