//! Placement compositing - where and how large each motif is drawn.
//!
//! The emitted transform is applied left to right in the current frame:
//!
//! ```text
//! translate(tx, ty) scale(s) translate(-min_x, -min_y) rotate(a, cx, cy)
//! ```
//!
//! `(tx, ty)` is the top-left corner of a `draw_size` square centered on the
//! sample and `s` maps the fragment's native width onto `draw_size`. The inner
//! translate moves the viewBox origin to zero; it is left out for boxes that
//! already start at the origin. The rotation pivots on the center of the
//! native box, so the motif spins in place.
//!
//! Translations are absolute output units and get two decimals. The scale is
//! relative, so it is printed in full.

use rand::Rng;
use serde::Serialize;

use crate::fragment::PatternFragment;
use crate::geometry::Point;

/// Final placement of one motif.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub fragment_index: usize,
    /// Target edge length in output units.
    pub draw_size: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    /// `draw_size / native width`.
    pub scale_factor: f64,
    /// Whole degrees in `[0, 360)`; `None` when rotation is disabled.
    pub rotation_degrees: Option<u16>,
    /// Native viewBox origin, shifted to zero before scaling.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Rotation pivot in the fragment's native coordinates.
    pub pivot_x: f64,
    pub pivot_y: f64,
}

impl Placement {
    /// Center a fragment of `draw_size` on `center` (output units).
    pub fn centered(
        fragment_index: usize,
        fragment: &PatternFragment,
        center: Point,
        draw_size: f64,
    ) -> Self {
        let (pivot_x, pivot_y) = fragment.local_center();
        Self {
            fragment_index,
            draw_size,
            translate_x: center.x - draw_size / 2.0,
            translate_y: center.y - draw_size / 2.0,
            scale_factor: draw_size / fragment.width_divisor(),
            rotation_degrees: None,
            origin_x: fragment.view_box.min_x,
            origin_y: fragment.view_box.min_y,
            pivot_x,
            pivot_y,
        }
    }

    /// Shift by a jitter offset, after centering.
    pub fn offset(mut self, (dx, dy): (f64, f64)) -> Self {
        self.translate_x += dx;
        self.translate_y += dy;
        self
    }

    pub fn rotated(mut self, degrees: u16) -> Self {
        self.rotation_degrees = Some(degrees % 360);
        self
    }

    /// SVG `transform` attribute value.
    pub fn transform(&self) -> String {
        let mut t = format!(
            "translate({:.2}, {:.2}) scale({})",
            self.translate_x, self.translate_y, self.scale_factor
        );
        if self.origin_x != 0.0 || self.origin_y != 0.0 {
            t.push_str(&format!(" translate({}, {})", 0.0 - self.origin_x, 0.0 - self.origin_y));
        }
        if let Some(angle) = self.rotation_degrees {
            t.push_str(&format!(" rotate({} {:.2} {:.2})", angle, self.pivot_x, self.pivot_y));
        }
        t
    }
}

/// Draw a whole-degree angle in `[0, 360)`.
pub fn random_rotation<R: Rng>(rng: &mut R) -> u16 {
    rng.random_range(0..360)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::fragment::ViewBox;

    fn fragment(width: f64, height: f64) -> PatternFragment {
        PatternFragment::new("<rect/>", ViewBox::new(0.0, 0.0, width, height))
    }

    #[test]
    fn normalizes_native_width_to_draw_size() {
        let p = Placement::centered(0, &fragment(200.0, 200.0), Point::new(100.0, 100.0), 50.0);
        assert_eq!(p.scale_factor, 0.25);
        assert_eq!(p.translate_x, 75.0);
        assert_eq!(p.translate_y, 75.0);
    }

    #[test]
    fn zero_width_box_uses_fallback_divisor() {
        let p = Placement::centered(0, &fragment(0.0, 10.0), Point::new(0.0, 0.0), 50.0);
        assert_eq!(p.scale_factor, 0.5);
    }

    #[test]
    fn jitter_moves_translate_only() {
        let p = Placement::centered(0, &fragment(100.0, 100.0), Point::new(10.0, 10.0), 4.0);
        let q = p.offset((1.5, -0.5));
        assert_eq!(q.translate_x, 9.5);
        assert_eq!(q.translate_y, 7.5);
        assert_eq!(q.scale_factor, p.scale_factor);
        assert_eq!(q.draw_size, p.draw_size);
    }

    #[test]
    fn transform_without_rotation() {
        let p = Placement::centered(0, &fragment(100.0, 100.0), Point::new(250.0, 250.0), 249.0);
        assert_eq!(p.transform(), "translate(125.50, 125.50) scale(2.49)");
    }

    #[test]
    fn rotation_pivots_on_native_center() {
        let p = Placement::centered(0, &fragment(40.0, 20.0), Point::new(50.0, 50.0), 20.0).rotated(90);
        assert_eq!(p.transform(), "translate(40.00, 40.00) scale(0.5) rotate(90 20.00 10.00)");
    }

    fn printed_scale(transform: &str) -> f64 {
        let start = transform.find("scale(").unwrap() + "scale(".len();
        let end = start + transform[start..].find(')').unwrap();
        transform[start..end].parse().unwrap()
    }

    #[test]
    fn offset_origin_is_shifted_before_scaling() {
        let fragment = PatternFragment::new("<circle r=\"50\"/>", ViewBox::new(-50.0, -50.0, 100.0, 100.0));
        let p = Placement::centered(0, &fragment, Point::new(250.0, 250.0), 500.0);
        assert_eq!(p.transform(), "translate(0.00, 0.00) scale(5) translate(50, 50)");

        // native center (0, 0) lands on the sample point
        let native_center = (p.pivot_x, p.pivot_y);
        assert_eq!(native_center, (0.0, 0.0));
        let drawn_x = p.translate_x + p.scale_factor * (native_center.0 - p.origin_x);
        let drawn_y = p.translate_y + p.scale_factor * (native_center.1 - p.origin_y);
        assert_eq!((drawn_x, drawn_y), (250.0, 250.0));
    }

    #[test]
    fn offset_origin_rotates_about_box_center() {
        let fragment = PatternFragment::new("<rect/>", ViewBox::new(10.0, 20.0, 40.0, 40.0));
        let p = Placement::centered(0, &fragment, Point::new(100.0, 100.0), 40.0).rotated(45);
        assert_eq!(
            p.transform(),
            "translate(80.00, 80.00) scale(1) translate(-10, -20) rotate(45 30.00 40.00)"
        );
    }

    #[test]
    fn one_sided_origin_prints_no_negative_zero() {
        let fragment = PatternFragment::new("<rect/>", ViewBox::new(0.0, 5.0, 10.0, 10.0));
        let p = Placement::centered(0, &fragment, Point::new(10.0, 10.0), 10.0);
        assert!(p.transform().ends_with("translate(0, -5)"));
    }

    #[test]
    fn tiny_scales_keep_their_precision() {
        let fragment = fragment(2000.0, 2000.0);
        // a dense grid cell at a low scale over a large native box
        let draw_size = 8.0 * 0.3 * (1.0 - 200.0 / 255.0);
        let p = Placement::centered(0, &fragment, Point::new(4.0, 4.0), draw_size);

        let printed = printed_scale(&p.transform());
        assert!(printed > 0.0);
        assert!((printed * 2000.0 - draw_size).abs() < 1e-9 * draw_size.max(1.0));
    }

    #[test]
    fn random_rotation_is_whole_degrees_below_360() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2000 {
            assert!(random_rotation(&mut rng) < 360);
        }
    }
}
