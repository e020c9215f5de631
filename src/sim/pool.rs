//! The live entity pool and the per-tick `step` that advances it.

use tracing::debug;

use crate::config::CelebrationConfig;
use crate::foundation::core::FrameIndex;
use crate::sim::entity::{Confetti, EntityRef, Firework};
use crate::sim::random::RandomSource;
use crate::sim::spawn;

/// Running totals across the life of a pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PoolCounters {
    pub confetti_spawned: u64,
    pub rockets_launched: u64,
    pub explosions: u64,
}

/// Every live entity of the simulation. Sparks are owned by their firework.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityPool {
    pub confetti: Vec<Confetti>,
    pub fireworks: Vec<Firework>,
    pub counters: PoolCounters,
}

impl EntityPool {
    /// Drawable entities in paint order: all confetti, then each firework as either its
    /// rocket head or its sparks.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> + '_ {
        let confetti = self.confetti.iter().map(EntityRef::Confetti);
        let fireworks = self.fireworks.iter().flat_map(|fw| {
            let head = (!fw.exploded()).then_some(EntityRef::Rocket(fw));
            head.into_iter()
                .chain(fw.sparks().iter().map(EntityRef::Spark))
        });
        confetti.chain(fireworks)
    }

    pub fn spark_count(&self) -> usize {
        self.fireworks.iter().map(|fw| fw.sparks().len()).sum()
    }

    fn advance_confetti(&mut self) {
        for c in &mut self.confetti {
            c.update();
        }
        self.confetti.retain(|c| !EntityRef::Confetti(c).is_removable());
    }

    fn advance_fireworks<R: RandomSource + ?Sized>(
        &mut self,
        tick: FrameIndex,
        canvas_height: f64,
        rng: &mut R,
    ) {
        for fw in &mut self.fireworks {
            if fw.update(canvas_height, rng) {
                self.counters.explosions += 1;
                debug!(
                    frame = tick.0,
                    x = fw.pos.x,
                    y = fw.pos.y,
                    sparks = fw.sparks().len(),
                    "firework burst"
                );
            }
        }
        self.fireworks.retain(|fw| !EntityRef::Rocket(fw).is_removable());
    }
}

/// Advance the whole pool by one tick.
///
/// Order within a tick: maybe launch a rocket, advance and prune confetti, maybe replenish
/// confetti, advance and prune fireworks.
pub fn step<R: RandomSource + ?Sized>(
    mut pool: EntityPool,
    tick: FrameIndex,
    cfg: &CelebrationConfig,
    rng: &mut R,
) -> EntityPool {
    if spawn::maybe_launch_rocket(&mut pool, cfg, rng) {
        debug!(frame = tick.0, "rocket launched");
    }

    pool.advance_confetti();

    if spawn::maybe_replenish_confetti(&mut pool, cfg, rng) {
        debug!(
            frame = tick.0,
            live = pool.confetti.len(),
            "confetti replenished"
        );
    }

    pool.advance_fireworks(tick, cfg.canvas.height_f64(), rng);
    pool
}
