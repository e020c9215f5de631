use std::collections::HashMap;

use color_quant::NeuQuant;
use image::RgbaImage;

use crate::foundation::error::{CelebrationError, CelebrationResult};

/// NeuQuant sampling factor: 1 samples every pixel, 30 is fastest.
pub const DEFAULT_SAMPLE_FACTOR: i32 = 10;
pub const MAX_PALETTE_COLORS: usize = 256;

/// A frame reduced to an adaptive palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    /// Flat `[r, g, b, r, g, b, ...]`, at most 256 entries.
    pub palette: Vec<u8>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    pub fn palette_len(&self) -> usize {
        self.palette.len() / 3
    }

    /// RGB color of the pixel at `(x, y)`.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = usize::from(self.indices[(y * self.width + x) as usize]) * 3;
        [self.palette[i], self.palette[i + 1], self.palette[i + 2]]
    }
}

/// Reduce an opaque RGBA frame to at most 256 colors with a palette trained on the frame itself.
///
/// Frames that already use no more than 256 distinct colors keep them exactly.
pub fn quantize(image: &RgbaImage, sample_factor: i32) -> CelebrationResult<IndexedFrame> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CelebrationError::validation("cannot quantize an empty frame"));
    }

    if let Some(exact) = exact_palette(image) {
        return Ok(exact);
    }

    let pixels = image.as_raw();
    let nq = NeuQuant::new(sample_factor.clamp(1, 30), MAX_PALETTE_COLORS, pixels);
    let palette = nq.color_map_rgb();

    let mut cache: HashMap<[u8; 4], u8> = HashMap::new();
    let indices = pixels
        .chunks_exact(4)
        .map(|px| {
            let key = [px[0], px[1], px[2], px[3]];
            *cache
                .entry(key)
                .or_insert_with(|| nq.index_of(px) as u8)
        })
        .collect();

    Ok(IndexedFrame {
        width,
        height,
        palette,
        indices,
    })
}

fn exact_palette(image: &RgbaImage) -> Option<IndexedFrame> {
    let mut lookup: HashMap<[u8; 3], u8> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity((image.width() * image.height()) as usize);

    for px in image.pixels() {
        let rgb = [px.0[0], px.0[1], px.0[2]];
        let idx = match lookup.get(&rgb) {
            Some(&i) => i,
            None => {
                if lookup.len() == MAX_PALETTE_COLORS {
                    return None;
                }
                let i = lookup.len() as u8;
                lookup.insert(rgb, i);
                palette.extend_from_slice(&rgb);
                i
            }
        };
        indices.push(idx);
    }

    Some(IndexedFrame {
        width: image.width(),
        height: image.height(),
        palette,
        indices,
    })
}
