//! Line-art icons for the three hand shapes of rock/paper/scissors.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{DynamicImage, RgbaImage};
use tracing::info;

use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::CelebrationResult;
use crate::render::raster::{PixelBox, Surface};

pub const ICON_SIZE: u32 = 200;

const PAPER_WHITE: Rgb8 = Rgb8::new(255, 255, 255);
const INK: Rgb8 = Rgb8::new(0, 0, 0);

/// One of the three hand shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    /// File name the game UI loads the icon from.
    pub fn file_name(self) -> &'static str {
        match self {
            Hand::Rock => "stein.png",
            Hand::Paper => "papier.png",
            Hand::Scissors => "schere.png",
        }
    }

    /// Draw the icon: a ring plus a few strokes, black on white.
    pub fn draw(self) -> CelebrationResult<RgbaImage> {
        let canvas = Canvas {
            width: ICON_SIZE,
            height: ICON_SIZE,
        };
        let mut s = Surface::new(canvas, PAPER_WHITE)?;
        let ink = INK.opaque();

        s.stroke_ellipse(PixelBox::new(10, 10, 190, 190), 3, ink);
        match self {
            Hand::Rock => {
                s.stroke_ellipse(PixelBox::new(70, 60, 130, 120), 2, ink);
                line(&mut s, (85, 80), (80, 50), 2);
            }
            Hand::Paper => {
                s.stroke_ellipse(PixelBox::new(75, 85, 125, 135), 2, ink);
                for i in 0..4 {
                    let x = 85 + i * 10;
                    line(&mut s, (x, 85), (x, 40), 2);
                }
                line(&mut s, (70, 100), (50, 130), 2);
            }
            Hand::Scissors => {
                line(&mut s, (100, 90), (75, 140), 3);
                line(&mut s, (100, 90), (125, 140), 3);
                line(&mut s, (95, 110), (85, 95), 2);
            }
        }
        Ok(s.finish())
    }
}

fn line(s: &mut Surface, from: (i32, i32), to: (i32, i32), width: u32) {
    s.draw_line(
        Point::new(f64::from(from.0), f64::from(from.1)),
        Point::new(f64::from(to.0), f64::from(to.1)),
        width,
        INK.opaque(),
    );
}

/// Write all three icons as RGB PNGs into `dir`, creating it if needed.
pub fn write_icons(dir: &Path) -> CelebrationResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create icon directory '{}'", dir.display()))?;

    let mut written = Vec::with_capacity(Hand::ALL.len());
    for hand in Hand::ALL {
        let path = dir.join(hand.file_name());
        let rgb = DynamicImage::ImageRgba8(hand.draw()?).to_rgb8();
        rgb.save_with_format(&path, image::ImageFormat::Png)?;
        info!(path = %path.display(), "wrote icon");
        written.push(path);
    }
    Ok(written)
}
