//! Shape drawing on a `vello_cpu` render context, read back as an opaque RGBA image.
//!
//! Bounding boxes are inclusive pixel rectangles: `[x0, y0, x1, y1]` covers
//! `(x1 - x0 + 1) x (y1 - y0 + 1)` pixels, so the shape spans `[x0, x1 + 1)` in continuous
//! coordinates. Line endpoints are pixel coordinates and run through pixel centers.

use image::RgbaImage;
use vello_cpu::kurbo::{self as cpu_kurbo, Shape as _};
use vello_cpu::peniko::Color;

use crate::foundation::core::{Canvas, Point, Rgb8, Rgba8};
use crate::foundation::error::{CelebrationError, CelebrationResult};

/// Flattening tolerance for curved outlines, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Integer pixel bounding box, inclusive on all sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBox {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelBox {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Square box of half-extent `r` around `(cx, cy)`.
    pub fn around(cx: i64, cy: i64, r: i64) -> Self {
        Self::new(cx - r, cy - r, cx + r, cy + r)
    }

    fn is_degenerate(self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    /// Continuous rectangle covered by the box's pixels.
    pub fn to_rect(self) -> cpu_kurbo::Rect {
        cpu_kurbo::Rect::new(
            self.x0 as f64,
            self.y0 as f64,
            (self.x1 + 1) as f64,
            (self.y1 + 1) as f64,
        )
    }
}

/// A canvas-sized drawing surface with an opaque background.
pub struct Surface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    background: Rgb8,
}

impl Surface {
    pub fn new(canvas: Canvas, background: Rgb8) -> CelebrationResult<Self> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| CelebrationError::validation("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| CelebrationError::validation("surface height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint(paint(background.opaque()));
        ctx.fill_rect(&cpu_kurbo::Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));

        Ok(Self {
            ctx,
            width,
            height,
            background,
        })
    }

    /// Fill the ellipse inscribed in `bbox`. Returns whether anything was submitted.
    pub fn fill_ellipse(&mut self, bbox: PixelBox, color: Rgba8) -> bool {
        if bbox.is_degenerate() || color.a == 0 {
            return false;
        }
        let path = cpu_kurbo::Ellipse::from_rect(bbox.to_rect()).to_path(PATH_TOLERANCE);
        self.ctx.set_paint(paint(color));
        self.ctx.fill_path(&path);
        true
    }

    /// Outline the ellipse inscribed in `bbox` with a stroke `width` pixels wide, drawn inward.
    pub fn stroke_ellipse(&mut self, bbox: PixelBox, width: u32, color: Rgba8) -> bool {
        if bbox.is_degenerate() || width == 0 || color.a == 0 {
            return false;
        }
        let half = f64::from(width) / 2.0;
        let centerline = bbox.to_rect().inset(-half);
        if centerline.width() <= 0.0 || centerline.height() <= 0.0 {
            return self.fill_ellipse(bbox, color);
        }

        let path = cpu_kurbo::Ellipse::from_rect(centerline).to_path(PATH_TOLERANCE);
        self.ctx.set_paint(paint(color));
        self.ctx.set_stroke(cpu_kurbo::Stroke::new(f64::from(width)));
        self.ctx.stroke_path(&path);
        true
    }

    /// Draw a round-capped segment `width` pixels thick between two pixel coordinates.
    pub fn draw_line(&mut self, from: Point, to: Point, width: u32, color: Rgba8) -> bool {
        if width == 0 || color.a == 0 {
            return false;
        }
        let line = cpu_kurbo::Line::new(pixel_center(from), pixel_center(to));
        let stroke = cpu_kurbo::Stroke::new(f64::from(width)).with_caps(cpu_kurbo::Cap::Round);
        self.ctx.set_paint(paint(color));
        self.ctx.set_stroke(stroke);
        self.ctx.stroke_path(&line.to_path(PATH_TOLERANCE));
        true
    }

    /// Rasterize everything drawn so far and flatten it to opaque straight RGBA.
    pub fn finish(mut self) -> RgbaImage {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut image = RgbaImage::new(u32::from(self.width), u32::from(self.height));
        flatten_premul_onto(&mut image, pixmap.data_as_u8_slice(), self.background);
        image
    }
}

fn paint(c: Rgba8) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn pixel_center(p: Point) -> cpu_kurbo::Point {
    cpu_kurbo::Point::new(p.x + 0.5, p.y + 0.5)
}

/// Composite premultiplied RGBA8 `src` over an opaque `bg` into `dst`.
fn flatten_premul_onto(dst: &mut [u8], src: &[u8], bg: Rgb8) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        let over = |c: u8, b: u8| (u16::from(c) + mul_div255(u16::from(b), inv)).min(255) as u8;
        d[0] = over(s[0], bg.r);
        d[1] = over(s[1], bg.g);
        d[2] = over(s[2], bg.b);
        d[3] = 255;
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}
