//! Grayscale source image and brightness sampling.

use image::GrayImage;

use crate::error::HalftoneError;
use crate::geometry::Point;

/// A decoded single-channel raster, row-major, one byte per pixel.
///
/// 0 is black and 255 is white.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SourceImage {
    /// Wrap a raw luminance buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, HalftoneError> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(HalftoneError::EmptyImage);
        }
        Ok(Self { width, height, pixels })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> u8,
    ) -> Result<Self, HalftoneError> {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A uniform image where every pixel has luminance `value`.
    pub fn solid(width: u32, height: u32, value: u8) -> Result<Self, HalftoneError> {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `height / width`.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.height as f64 / self.width as f64
    }

    /// Luminance at integer coordinates. Coordinates past the edge are clamped.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }

    /// Copy with every value replaced by `255 - v`.
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|v| 255 - v).collect(),
        }
    }

    /// Brightness under a normalized position.
    ///
    /// Floor sampling, no interpolation:
    /// `px = floor(nx * (width - 1))`, `py = floor(ny * (height - 1))`.
    pub fn sample(&self, p: Point) -> u8 {
        let px = (p.x.clamp(0.0, 1.0) * (self.width - 1) as f64).floor() as u32;
        let py = (p.y.clamp(0.0, 1.0) * (self.height - 1) as f64).floor() as u32;
        self.pixel(px, py)
    }
}

impl TryFrom<&GrayImage> for SourceImage {
    type Error = HalftoneError;

    fn try_from(img: &GrayImage) -> Result<Self, Self::Error> {
        Self::new(img.width(), img.height(), img.as_raw().clone())
    }
}

impl TryFrom<GrayImage> for SourceImage {
    type Error = HalftoneError;

    fn try_from(img: GrayImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }
}
