mod mask;

pub use mask::rounded_mask;

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::common::{Color, Result, MAX_SCALE};
use crate::encoder::QrMatrix;

// Corner style
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerStyle {
    #[default]
    Square,
    Rounded,
}

// Rendered QR
//------------------------------------------------------------------------------

/// A colourised QR raster. The corner style is only applied by [`QrImage::to_display`];
/// the raster itself and its PNG encoding are always square.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct QrImage {
    raster: RgbImage,
    corner_style: CornerStyle,
    pub(crate) revision: u64,
}

impl QrImage {
    pub fn raster(&self) -> &RgbImage {
        &self.raster
    }

    pub fn into_raster(self) -> RgbImage {
        self.raster
    }

    pub fn corner_style(&self) -> CornerStyle {
        self.corner_style
    }

    /// Session revision this image was generated for. Zero for images rendered directly.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.raster)
    }

    /// Raster as it should be shown: rounded styles get transparent corners of `radius` pixels.
    pub fn to_display(&self, radius: u32) -> RgbaImage {
        let mut out = image::DynamicImage::ImageRgb8(self.raster.clone()).into_rgba8();
        if self.corner_style == CornerStyle::Rounded {
            let mask = rounded_mask(out.width(), out.height(), radius);
            for (px, m) in out.pixels_mut().zip(mask.pixels()) {
                px.0[3] = m.0[0];
            }
        }
        out
    }
}

pub(crate) fn encode_png(raster: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    raster.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub(crate) fn decode_png(bytes: &[u8]) -> Result<RgbImage> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgb8())
}

// Render
//------------------------------------------------------------------------------

/// Rasterizes `matrix` with one `scale`x`scale` block per module, dark modules in `fg` and
/// light ones in `bg`. Nearest-neighbour only, so block edges are never blended.
/// `scale` is clamped to `1..=MAX_SCALE`.
pub fn render(
    matrix: &QrMatrix,
    fg: Color,
    bg: Color,
    scale: u32,
    corner_style: CornerStyle,
) -> QrImage {
    let scale = scale.clamp(1, MAX_SCALE);
    let side = |modules: usize| u32::try_from(modules).unwrap_or(u32::MAX).saturating_mul(scale);
    let (w, h) = (side(matrix.width()), side(matrix.height()));
    let (fg, bg) = (fg.to_rgb(), bg.to_rgb());

    let raster = RgbImage::from_fn(w, h, |x, y| {
        let (c, r) = ((x / scale) as usize, (y / scale) as usize);
        if matrix.is_dark(c, r) {
            fg
        } else {
            bg
        }
    });

    QrImage { raster, corner_style, revision: 0 }
}

/// Remaps a black-on-white raster to `fg`/`bg`. Pixels darker than mid-grey count as dark.
pub fn recolor(raster: &RgbImage, fg: Color, bg: Color) -> RgbImage {
    let (fg, bg) = (fg.to_rgb(), bg.to_rgb());
    let mut out = raster.clone();
    for px in out.pixels_mut() {
        let Rgb([r, g, b]) = *px;
        let luma = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
        *px = if luma < 128 { fg } else { bg };
    }
    out
}
