//! Geometric distortion - perspective warp and jitter.
//!
//! Perspective scales each axis by the offset along the *other* axis, which
//! makes the grid converge towards a horizon:
//!
//!   dx = nx - 0.5, dy = ny - 0.5
//!   factor_x = 1 + perspective_x * dy
//!   factor_y = 1 + perspective_y * dx
//!   distorted = (0.5 + dx * factor_x, 0.5 + dy * factor_y)
//!
//! Points warped out of the unit square are dropped, not clamped. Jitter
//! only moves the drawn motif; brightness is always read at the
//! undistorted position.

use rand::Rng;

use crate::config::GenerationConfig;
use crate::field::SampleField;
use crate::geometry::Point;

/// One field position after distortion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Position in the layout, used for brightness sampling.
    pub normalized: Point,
    /// Position where the motif is drawn.
    pub distorted: Point,
    /// Nominal spacing in output units.
    pub cell_size: f64,
    /// Depth-like size factor, `(factor_x + factor_y) / 2`. 1 without perspective.
    pub scale_modifier: f64,
}

/// Perspective warp strengths.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Perspective {
    pub x: f64,
    pub y: f64,
}

impl Perspective {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.perspective_x, config.perspective_y)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Warp a point, returning the new position and the scale modifier.
    pub fn warp(&self, p: Point) -> (Point, f64) {
        if self.is_identity() {
            return (p, 1.0);
        }
        let dx = p.x - 0.5;
        let dy = p.y - 0.5;
        let factor_x = 1.0 + self.x * dy;
        let factor_y = 1.0 + self.y * dx;
        let warped = Point::new(0.5 + dx * factor_x, 0.5 + dy * factor_y);
        (warped, (factor_x + factor_y) / 2.0)
    }
}

/// Result of running a field through the perspective stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DistortedField {
    pub samples: Vec<SamplePoint>,
    /// How many points left the unit square.
    pub dropped: usize,
}

/// Apply the perspective warp to every point, keeping field order.
pub fn distort_field(field: &SampleField, perspective: Perspective) -> DistortedField {
    let cell_size = field.cell_size_output();
    let mut samples = Vec::with_capacity(field.len());
    let mut dropped = 0;

    for &normalized in &field.points {
        let (distorted, scale_modifier) = perspective.warp(normalized);
        if !distorted.in_unit_square() {
            dropped += 1;
            continue;
        }
        samples.push(SamplePoint { normalized, distorted, cell_size, scale_modifier });
    }

    DistortedField { samples, dropped }
}

/// Random positional offset, as a fraction of cell size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Jitter {
    pub strength: f64,
}

impl Jitter {
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.strength == 0.0
    }

    /// Offset in output units, each axis uniform in
    /// `[-0.5, 0.5) * cell_size * strength`.
    ///
    /// Draws nothing from `rng` when disabled, so turning jitter off does not
    /// shift the rotation sequence.
    pub fn offset<R: Rng>(&self, rng: &mut R, cell_size: f64) -> (f64, f64) {
        if self.is_identity() {
            return (0.0, 0.0);
        }
        let span = cell_size * self.strength;
        let ox = (rng.random::<f64>() - 0.5) * span;
        let oy = (rng.random::<f64>() - 0.5) * span;
        (ox, oy)
    }
}
