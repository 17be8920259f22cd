/*
 * Snapshot Module
 *
 * A ShardImage is the captured outgoing screen: tightly packed RGBA8 with
 * premultiplied alpha, rows top to bottom. It is validated once here so the
 * renderer can upload it without further checks.
 */

use std::path::Path;

use nannou::image::{self, DynamicImage, Rgba, RgbaImage};

use crate::error::ShatterError;

#[derive(Clone, Debug)]
pub struct ShardImage {
    pixels: RgbaImage,
}

impl ShardImage {
    // Wrap a raw capture buffer of `width * height * 4` bytes
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, ShatterError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(ShatterError::BufferSize {
                width,
                height,
                len: bytes.len(),
                expected,
            });
        }

        let pixels = RgbaImage::from_raw(width, height, bytes).ok_or(ShatterError::BufferSize {
            width,
            height,
            len: expected,
            expected,
        })?;
        Self::from_image(pixels)
    }

    pub fn from_image(pixels: RgbaImage) -> Result<Self, ShatterError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(ShatterError::EmptyImage { width, height });
        }
        Ok(Self { pixels })
    }

    // Decode an image file, premultiplying its alpha
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ShatterError> {
        let mut pixels = image::open(path)?.to_rgba8();
        for Rgba([r, g, b, a]) in pixels.pixels_mut() {
            let alpha = *a as u16;
            *r = (*r as u16 * alpha / 255) as u8;
            *g = (*g as u16 * alpha / 255) as u8;
            *b = (*b as u16 * alpha / 255) as u8;
        }
        Self::from_image(pixels)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_dynamic(self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.pixels)
    }
}
