//! Glyph rasterization into occupancy masks.
//!
//! A [`GlyphRenderer`] draws text white-on-black into a square scratch
//! raster; [`rasterize_with`] scans that raster and keeps every cell whose
//! luminance clears the threshold as a point in normalized plane coordinates.
//!
//! ```ignore
//! use glyph_galaxy::glyph::{rasterize, DEFAULT_THRESHOLD};
//!
//! let mask = rasterize("M", 128, DEFAULT_THRESHOLD);
//! assert!(!mask.is_empty());
//! ```

use font8x8::legacy::BASIC_LEGACY;
use glam::Vec2;
use image::{Rgba, RgbaImage};

/// Default luminance threshold for ink cells.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Larger ink dimension of the rendered text relative to the raster side.
pub const FONT_SCALE: f32 = 0.8;

/// Occupancy mask of a rendered glyph.
///
/// Points are in plane coordinates of roughly `[-1, 1]` on both axes and are
/// mirrored on both axes relative to raster space: raster `(0, 0)` maps to
/// `(1, 1)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphMask {
    points: Vec<Vec2>,
}

impl GlyphMask {
    /// Build a mask from explicit plane coordinates.
    pub fn from_points(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mask.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }
}

/// Text-rendering collaborator that produces the scratch raster.
///
/// Implementations draw `text` centered on a black `size`×`size` image with
/// a bright fill. Exact glyph shapes are up to the implementation.
pub trait GlyphRenderer {
    fn render(&self, text: &str, size: u32) -> RgbaImage;
}

/// Renders text with the 8×8 public-domain bitmap font.
///
/// Glyphs are laid out by their ink extents with a one-cell gap, and the
/// whole line is scaled so its larger ink dimension is [`FONT_SCALE`] of the
/// raster, then centered on the ink. Characters outside 7-bit ASCII are
/// drawn as `'?'`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitmapFont;

impl BitmapFont {
    /// Advance of a glyph with no ink, such as a space, in font cells.
    const BLANK_ADVANCE: usize = 4;

    fn glyph_rows(ch: char) -> [u8; 8] {
        let index = ch as usize;
        if index < BASIC_LEGACY.len() {
            BASIC_LEGACY[index]
        } else {
            BASIC_LEGACY[b'?' as usize]
        }
    }

    /// Lay `text` out as font-cell columns, bit `r` of each set when row `r`
    /// has ink. Leading and trailing blank columns are trimmed.
    fn layout(text: &str) -> Vec<u8> {
        let mut columns = Vec::new();

        for ch in text.chars() {
            let rows = Self::glyph_rows(ch);
            let glyph: Vec<u8> = (0..8)
                .map(|col| {
                    rows.iter()
                        .enumerate()
                        .fold(0u8, |acc, (r, bits)| acc | (((bits >> col) & 1) << r))
                })
                .collect();

            let first = glyph.iter().position(|c| *c != 0);
            let last = glyph.iter().rposition(|c| *c != 0);
            match (first, last) {
                (Some(first), Some(last)) => {
                    if !columns.is_empty() {
                        columns.push(0);
                    }
                    columns.extend_from_slice(&glyph[first..=last]);
                }
                _ => columns.extend(std::iter::repeat(0).take(Self::BLANK_ADVANCE)),
            }
        }

        while columns.last() == Some(&0) {
            columns.pop();
        }
        let lead = columns.iter().take_while(|c| **c == 0).count();
        columns.drain(..lead);
        columns
    }
}

impl GlyphRenderer for BitmapFont {
    fn render(&self, text: &str, size: u32) -> RgbaImage {
        let mut raster = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 255]));
        let columns = Self::layout(text);
        let ink_rows = columns.iter().fold(0u8, |acc, c| acc | c);
        if ink_rows == 0 || size == 0 {
            return raster;
        }

        let top = ink_rows.trailing_zeros() as usize;
        let height = 8 - ink_rows.leading_zeros() as usize - top;
        let width = columns.len();

        let scale = size as f32 * FONT_SCALE / width.max(height) as f32;
        let origin_x = size as f32 / 2.0 - width as f32 * scale / 2.0;
        let origin_y = size as f32 / 2.0 - height as f32 * scale / 2.0;

        for (x, y, pixel) in raster.enumerate_pixels_mut() {
            // Sample at the cell center
            let gx = (x as f32 + 0.5 - origin_x) / scale;
            let gy = (y as f32 + 0.5 - origin_y) / scale;
            if gx < 0.0 || gy < 0.0 || gx >= width as f32 || gy >= height as f32 {
                continue;
            }

            let bits = columns[gx as usize];
            if (bits >> (top + gy as usize)) & 0x01 != 0 {
                *pixel = Rgba([255, 255, 255, 255]);
            }
        }

        raster
    }
}

/// Rasterize `glyph` with the built-in [`BitmapFont`].
pub fn rasterize(glyph: &str, raster_size: u32, threshold: f32) -> GlyphMask {
    rasterize_with(&BitmapFont, glyph, raster_size, threshold)
}

/// Rasterize `glyph` through `renderer` and collect the ink cells.
///
/// Cells are scanned row-major. A cell is ink when its red channel divided
/// by 255 exceeds `threshold`. Returns an empty mask when nothing clears the
/// threshold.
pub fn rasterize_with(
    renderer: &dyn GlyphRenderer,
    glyph: &str,
    raster_size: u32,
    threshold: f32,
) -> GlyphMask {
    let raster = renderer.render(glyph, raster_size);
    mask_from_raster(&raster, threshold)
}

/// Scan an already rendered raster.
///
/// Normalization uses the raster width for both axes; renderers produce
/// square rasters.
pub fn mask_from_raster(raster: &RgbaImage, threshold: f32) -> GlyphMask {
    let size = raster.width() as f32;
    let mut points = Vec::new();

    for y in 0..raster.height() {
        for x in 0..raster.width() {
            // Black/white rendering: any one channel carries the luminance
            let luminance = raster.get_pixel(x, y).0[0] as f32 / 255.0;
            if luminance > threshold {
                let nx = -((x as f32 / size) * 2.0 - 1.0);
                let ny = -((y as f32 / size) * 2.0 - 1.0);
                points.push(Vec2::new(nx, ny));
            }
        }
    }

    GlyphMask::from_points(points)
}
