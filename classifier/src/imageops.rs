//! Lazy per-pixel color conversion
//!
//! Conversions are read-through adapters over a [`Canvas`]: each stage wraps
//! the previous one and transforms a pixel only when it is read, so chained
//! stages never allocate intermediate images. Pixels are materialized once,
//! by [`encode_png_gray`], when the payload for the recognizer is produced.

use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, Luma, Rgba};
use std::io::Cursor;

use crate::error::{ClassifyError, ClassifyResult};

const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Anything that can report a color per coordinate
pub trait Canvas {
    fn dimensions(&self) -> (u32, u32);

    fn color_at(&self, x: u32, y: u32) -> Rgba<u8>;
}

impl Canvas for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.get_pixel(x, y)
    }
}

impl<C: Canvas + ?Sized> Canvas for &C {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        (**self).color_at(x, y)
    }
}

/// A per-pixel color transform
pub trait ColorModel {
    fn convert(&self, color: Rgba<u8>) -> Rgba<u8>;
}

/// Replaces fully transparent pixels with opaque white
///
/// The canvas exports untouched areas as transparent, while the recognizer
/// expects ink on a white sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaAsWhite;

impl ColorModel for AlphaAsWhite {
    fn convert(&self, color: Rgba<u8>) -> Rgba<u8> {
        if color[3] == 0 {
            OPAQUE_WHITE
        } else {
            color
        }
    }
}

/// Single-channel luminance, stored in all three color channels
///
/// Uses the ITU-R 601 weights on alpha-premultiplied color.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale;

impl Grayscale {
    pub fn luma(color: Rgba<u8>) -> u8 {
        let alpha = u32::from(color[3]);
        let premultiply = |channel: u8| u32::from(channel) * alpha / 255;
        let (r, g, b) = (premultiply(color[0]), premultiply(color[1]), premultiply(color[2]));
        ((19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 16) as u8
    }
}

impl ColorModel for Grayscale {
    fn convert(&self, color: Rgba<u8>) -> Rgba<u8> {
        let y = Self::luma(color);
        Rgba([y, y, y, 255])
    }
}

/// Canvas whose pixels pass through `model` on every read
#[derive(Debug, Clone)]
pub struct Converted<C, M> {
    original: C,
    model: M,
}

impl<C: Canvas, M: ColorModel> Canvas for Converted<C, M> {
    fn dimensions(&self) -> (u32, u32) {
        self.original.dimensions()
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.model.convert(self.original.color_at(x, y))
    }
}

pub trait CanvasExt: Canvas + Sized {
    fn convert<M: ColorModel>(self, model: M) -> Converted<Self, M> {
        Converted {
            original: self,
            model,
        }
    }
}

impl<C: Canvas> CanvasExt for C {}

/// Opaque-white background, then grayscale
pub type Normalized<C> = Converted<Converted<C, AlphaAsWhite>, Grayscale>;

pub fn normalize<C: Canvas>(canvas: C) -> Normalized<C> {
    canvas.convert(AlphaAsWhite).convert(Grayscale)
}

/// Read every pixel once and encode the luminance as an 8-bit gray PNG
pub fn encode_png_gray<C: Canvas>(canvas: &C) -> ClassifyResult<Vec<u8>> {
    let (width, height) = canvas.dimensions();
    let gray = GrayImage::from_fn(width, height, |x, y| Luma([canvas.color_at(x, y)[0]]));

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(gray)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ClassifyError::Internal {
            message: format!("failed to encode normalized image: {e}"),
        })?;
    Ok(out.into_inner())
}
