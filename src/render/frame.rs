use image::RgbaImage;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::CelebrationResult;
use crate::render::raster::{PixelBox, Surface};
use crate::sim::entity::{EntityRef, Lifespan};
use crate::sim::pool::EntityPool;

/// Radius of an unexploded rocket's head.
pub const ROCKET_HEAD_RADIUS: i64 = 3;

/// How many shapes of each kind went into one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DrawStats {
    pub confetti: usize,
    pub rocket_heads: usize,
    pub sparks: usize,
}

/// One rendered frame plus what was drawn into it.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    pub image: RgbaImage,
    pub stats: DrawStats,
}

/// Fade alpha for a remaining-life ratio: 255 at full life, 0 when spent.
pub fn fade_alpha(ratio: f64) -> u8 {
    (255.0 * ratio.clamp(0.0, 1.0)) as u8
}

/// Spark radius for a remaining-life ratio; never below one pixel.
pub fn spark_radius(ratio: f64) -> i64 {
    ((3.0 * ratio.clamp(0.0, 1.0)) as i64 + 1).max(1)
}

/// Rasterize the pool onto a fresh opaque canvas.
///
/// Confetti is painted first, then each firework as its rocket head or its sparks.
pub fn render_frame(
    pool: &EntityPool,
    canvas: Canvas,
    background: Rgb8,
) -> CelebrationResult<RenderedFrame> {
    let mut surface = Surface::new(canvas, background)?;
    let mut stats = DrawStats::default();

    for entity in pool.entities() {
        match entity {
            EntityRef::Confetti(c) => {
                let alpha = fade_alpha(c.fade_ratio());
                let size = f64::from(c.size);
                let bbox = PixelBox::new(
                    c.pos.x as i64,
                    c.pos.y as i64,
                    (c.pos.x + size) as i64,
                    (c.pos.y + size) as i64,
                );
                surface.fill_ellipse(bbox, c.color.with_alpha(alpha));
                stats.confetti += 1;
            }
            EntityRef::Rocket(fw) => {
                let bbox = PixelBox::around(fw.pos.x as i64, fw.pos.y as i64, ROCKET_HEAD_RADIUS);
                surface.fill_ellipse(bbox, fw.color.opaque());
                stats.rocket_heads += 1;
            }
            EntityRef::Spark(s) => {
                let ratio = s.fade_ratio();
                let bbox = PixelBox::around(s.pos.x as i64, s.pos.y as i64, spark_radius(ratio));
                surface.fill_ellipse(bbox, s.color.with_alpha(fade_alpha(ratio)));
                stats.sparks += 1;
            }
        }
    }

    Ok(RenderedFrame {
        image: surface.finish(),
        stats,
    })
}
