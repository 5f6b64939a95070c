//! Sample field generation - where motifs may be placed.
//!
//! Both layouts produce normalized positions in the unit square plus the
//! nominal spacing between neighbours, which later sizes each motif.
//!
//! Grid:
//!   for y in 0..rows, x in 0..columns:
//!     point = ((x + 0.5) / columns, (y + 0.5) / rows)
//!
//! Spiral (sunflower):
//!   for i in 0..count:
//!     r = sqrt(i / count) / 2
//!     θ = i * GOLDEN_ANGLE
//!     point = (0.5 + r cos θ, 0.5 + r sin θ)

use crate::config::{GenerationConfig, Layout};
use crate::geometry::{Point, Viewport};

/// The golden angle in radians: π(3 − √5) ≈ 137.507764°
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653_3;

/// Empirical spacing constant for the spiral: cell ≈ `1.8 / sqrt(count)`.
const SPIRAL_SPACING: f64 = 1.8;

/// An ordered set of candidate positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleField {
    pub points: Vec<Point>,
    /// Nominal spacing as a fraction of the viewport width.
    pub cell_size: f64,
    pub viewport: Viewport,
}

impl SampleField {
    /// Spacing in output units.
    #[inline]
    pub fn cell_size_output(&self) -> f64 {
        self.cell_size * self.viewport.width as f64
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Build the field for a configuration and image size.
pub fn generate_field(config: &GenerationConfig, image_width: u32, image_height: u32) -> SampleField {
    match config.layout {
        Layout::Grid => grid_field(config.density, image_width, image_height),
        Layout::Spiral => spiral_field(config.density, config.spiral_multiplier),
    }
}

/// Grid rows for a column count and `height / width` ratio, never 0.
pub fn grid_rows(columns: u32, aspect_ratio: f64) -> u32 {
    (columns as f64 * aspect_ratio).round().max(1.0) as u32
}

/// Cell centers of a `columns × rows` grid, row-major.
pub fn grid_field(columns: u32, image_width: u32, image_height: u32) -> SampleField {
    let columns = columns.max(1);
    let aspect_ratio = image_height as f64 / image_width.max(1) as f64;
    let rows = grid_rows(columns, aspect_ratio);

    let points = (0..rows)
        .flat_map(|y| {
            (0..columns).map(move |x| {
                Point::new(
                    (x as f64 + 0.5) / columns as f64,
                    (y as f64 + 0.5) / rows as f64,
                )
            })
        })
        .collect();

    SampleField {
        points,
        cell_size: 1.0 / columns as f64,
        viewport: Viewport::aspect_preserving(image_width, image_height),
    }
}

/// Fibonacci spiral of `density * multiplier` points inside the unit disc
/// of radius 0.5, on a square viewport.
pub fn spiral_field(density: u32, multiplier: u32) -> SampleField {
    let count = (density as usize * multiplier as usize).max(1);
    let n = count as f64;

    let points = (0..count)
        .map(|i| {
            let i = i as f64;
            let radius = (i / n).sqrt() / 2.0;
            let theta = i * GOLDEN_ANGLE;
            Point::new(0.5 + radius * theta.cos(), 0.5 + radius * theta.sin())
        })
        .collect();

    SampleField {
        points,
        cell_size: SPIRAL_SPACING / n.sqrt(),
        viewport: Viewport::square(),
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn golden_angle_is_correct() {
        assert!((GOLDEN_ANGLE - PI * (3.0 - 5f64.sqrt())).abs() < 1e-12);
        let degrees = GOLDEN_ANGLE * 180.0 / PI;
        assert!((degrees - 137.5).abs() < 0.1);
    }

    #[test]
    fn grid_count_follows_aspect_ratio() {
        // width twice the height: 60 columns, 30 rows
        let field = grid_field(60, 200, 100);
        assert_eq!(field.len(), 60 * 30);
        assert_eq!(field.viewport, Viewport { width: 2000, height: 1000 });
    }

    #[test]
    fn grid_points_sit_on_cell_centers_in_row_major_order() {
        let field = grid_field(4, 4, 4);
        assert_eq!(field.len(), 16);
        assert_eq!(field.points[0], Point::new(0.125, 0.125));
        assert_eq!(field.points[1], Point::new(0.375, 0.125));
        assert_eq!(field.points[4], Point::new(0.125, 0.375));
        assert_eq!(field.points[15], Point::new(0.875, 0.875));
        assert_eq!(field.cell_size, 0.25);
        assert_eq!(field.cell_size_output(), 500.0);
    }

    #[test]
    fn grid_rows_round_and_never_vanish() {
        assert_eq!(grid_rows(10, 0.25), 3); // 2.5 rounds away from zero
        assert_eq!(grid_rows(10, 0.01), 1);
        assert_eq!(grid_rows(7, 1.0), 7);
    }

    #[test]
    fn spiral_count_and_cell_size() {
        let field = spiral_field(5, 20);
        assert_eq!(field.len(), 100);
        assert!((field.cell_size - 0.18).abs() < 1e-12);
        assert_eq!(field.viewport, Viewport::square());
        assert_eq!(field.cell_size_output(), field.cell_size * 2000.0);
    }

    #[test]
    fn spiral_starts_at_center_and_stays_in_unit_disc() {
        let field = spiral_field(10, 25);
        let center = Point::new(0.5, 0.5);
        assert_eq!(field.points[0], center);
        for p in &field.points {
            assert!((p.x - center.x).hypot(p.y - center.y) <= 0.5 + 1e-12);
            assert!(p.in_unit_square());
        }
    }

    #[test]
    fn spiral_is_deterministic() {
        let a = spiral_field(12, 20);
        let b = spiral_field(12, 20);
        assert_eq!(a, b);
    }

    #[test]
    fn generate_dispatches_on_layout() {
        let mut config = GenerationConfig::default();
        config.density = 10;
        assert_eq!(generate_field(&config, 100, 100).len(), 100);
        config.layout = Layout::Spiral;
        config.spiral_multiplier = 25;
        assert_eq!(generate_field(&config, 100, 100).len(), 250);
    }
}
