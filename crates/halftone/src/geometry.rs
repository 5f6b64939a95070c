//! Core geometry types for halftone.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = small stack values can be duplicated implicitly
//! - `PartialEq` = can compare with `==`
//!
//! Two coordinate spaces show up everywhere in this crate:
//! - *normalized* space, where the field lives in the unit square `[0,1]²`
//! - *output* space, the fixed viewport of the generated document

use serde::Serialize;

/// Width of every generated document, in output units.
pub const VIEWPORT_WIDTH: u32 = 2000;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates lie in `[0, 1]`, boundary included.
    #[inline]
    pub fn in_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// The coordinate rectangle the output document declares.
///
/// Always anchored at the origin: `viewBox="0 0 width height"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport whose height follows the image aspect ratio.
    ///
    /// `height = round(VIEWPORT_WIDTH * image_height / image_width)`, never 0.
    pub fn aspect_preserving(image_width: u32, image_height: u32) -> Self {
        let ratio = image_height as f64 / image_width.max(1) as f64;
        let height = (VIEWPORT_WIDTH as f64 * ratio).round().max(1.0) as u32;
        Self { width: VIEWPORT_WIDTH, height }
    }

    /// Square `VIEWPORT_WIDTH × VIEWPORT_WIDTH` viewport.
    pub fn square() -> Self {
        Self { width: VIEWPORT_WIDTH, height: VIEWPORT_WIDTH }
    }

    /// Map a normalized point into output units.
    #[inline]
    pub fn to_output(&self, p: Point) -> Point {
        Point::new(p.x * self.width as f64, p.y * self.height as f64)
    }
}
