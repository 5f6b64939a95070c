//! Generation parameters.
//!
//! Every field has a serde default, so a YAML or JSON file only needs to
//! name the values it changes:
//!
//! ```yaml
//! layout: spiral
//! density: 40
//! rotate: true
//! seed: 7
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HalftoneError;

/// Sample field strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Cell centers of a `columns × rows` grid.
    #[default]
    Grid,
    /// Fibonacci (sunflower) spiral.
    Spiral,
}

impl Layout {
    pub fn all() -> &'static [Layout] {
        &[Layout::Grid, Layout::Spiral]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Grid => "grid",
            Layout::Spiral => "spiral",
        }
    }

    pub fn from_name(name: &str) -> Option<Layout> {
        match name.to_lowercase().as_str() {
            "grid" => Some(Layout::Grid),
            "spiral" | "fibonacci" | "sunflower" => Some(Layout::Spiral),
            _ => None,
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::from_name(s).ok_or_else(|| format!("unknown layout '{}', use 'grid' or 'spiral'", s))
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// All tunable parameters for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub layout: Layout,
    /// Grid column count, or the spiral count multiplier base.
    pub density: u32,
    /// Draw scale at full darkness.
    pub max_scale: f64,
    /// Draw scale at full brightness.
    pub min_scale: f64,
    /// Pre-invert the source luminance.
    pub invert: bool,
    /// Perspective warp strength along x, in `[-1, 1]`.
    pub perspective_x: f64,
    /// Perspective warp strength along y, in `[-1, 1]`.
    pub perspective_y: f64,
    /// Random offset as a fraction of cell size, in `[0, 1]`.
    pub jitter: f64,
    /// Spin each motif by a random whole-degree angle.
    pub rotate: bool,
    pub seed: u64,
    /// Samples at or above this brightness emit nothing.
    pub brightness_cutoff: f64,
    /// Scales below this emit nothing.
    pub min_visible_scale: f64,
    /// Spiral point count is `density * spiral_multiplier`.
    pub spiral_multiplier: u32,
    /// Fill of the full-viewport background rectangle.
    pub background: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Grid,
            density: 80,
            max_scale: 1.5,
            min_scale: 0.0,
            invert: false,
            perspective_x: 0.0,
            perspective_y: 0.0,
            jitter: 0.0,
            rotate: false,
            seed: 0,
            brightness_cutoff: 252.0,
            min_visible_scale: 0.01,
            spiral_multiplier: 20,
            background: "white".to_string(),
        }
    }
}

impl GenerationConfig {
    /// True when a perspective warp is configured.
    pub fn has_perspective(&self) -> bool {
        self.perspective_x != 0.0 || self.perspective_y != 0.0
    }

    /// True when any stage draws random numbers.
    pub fn uses_randomness(&self) -> bool {
        self.jitter > 0.0 || self.rotate
    }

    /// Check every value against its documented range.
    pub fn validate(&self) -> Result<(), HalftoneError> {
        let fail = |msg: String| Err(HalftoneError::InvalidConfig(msg));

        if self.density == 0 {
            return fail("density must be at least 1".into());
        }
        if !self.max_scale.is_finite() || self.max_scale < 0.0 {
            return fail(format!("max_scale must be a non-negative number, got {}", self.max_scale));
        }
        if !(0.0..=self.max_scale).contains(&self.min_scale) {
            return fail(format!(
                "min_scale must be between 0 and max_scale ({}), got {}",
                self.max_scale, self.min_scale
            ));
        }
        for (name, value) in [("perspective_x", self.perspective_x), ("perspective_y", self.perspective_y)] {
            if !(-1.0..=1.0).contains(&value) {
                return fail(format!("{} must be in [-1, 1], got {}", name, value));
            }
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return fail(format!("jitter must be in [0, 1], got {}", self.jitter));
        }
        if !(0.0..=255.0).contains(&self.brightness_cutoff) {
            return fail(format!("brightness_cutoff must be in [0, 255], got {}", self.brightness_cutoff));
        }
        if !self.min_visible_scale.is_finite() || self.min_visible_scale < 0.0 {
            return fail(format!("min_visible_scale must be non-negative, got {}", self.min_visible_scale));
        }
        if self.spiral_multiplier == 0 {
            return fail("spiral_multiplier must be at least 1".into());
        }
        if self.background.trim().is_empty() || self.background.contains(['"', '<', '&']) {
            return fail(format!("background '{}' is not a usable fill value", self.background));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        GenerationConfig::default().validate().unwrap();
    }

    #[test]
    fn layout_names_round_trip() {
        for layout in Layout::all() {
            assert_eq!(Layout::from_name(layout.name()), Some(*layout));
        }
        assert_eq!("SPIRAL".parse::<Layout>(), Ok(Layout::Spiral));
        assert!("hexagon".parse::<Layout>().is_err());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: GenerationConfig = serde_yaml::from_str("layout: spiral\ndensity: 40\nrotate: true\n").unwrap();
        assert_eq!(config.layout, Layout::Spiral);
        assert_eq!(config.density, 40);
        assert!(config.rotate);
        assert_eq!(config.max_scale, 1.5);
        assert_eq!(config.spiral_multiplier, 20);
        assert_eq!(config.background, "white");
    }

    #[test]
    fn json_uses_snake_case_fields() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"perspective_x": 0.5, "brightness_cutoff": 250}"#).unwrap();
        assert_eq!(config.perspective_x, 0.5);
        assert_eq!(config.brightness_cutoff, 250.0);
        assert!(config.has_perspective());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases: Vec<Box<dyn Fn(&mut GenerationConfig)>> = vec![
            Box::new(|c| c.density = 0),
            Box::new(|c| c.max_scale = -1.0),
            Box::new(|c| c.max_scale = f64::NAN),
            Box::new(|c| c.min_scale = 2.0),
            Box::new(|c| c.perspective_x = 1.5),
            Box::new(|c| c.perspective_y = -1.01),
            Box::new(|c| c.jitter = 2.0),
            Box::new(|c| c.brightness_cutoff = 300.0),
            Box::new(|c| c.spiral_multiplier = 0),
            Box::new(|c| c.background = "\"/><script".into()),
        ];
        for mutate in cases {
            let mut config = GenerationConfig::default();
            mutate(&mut config);
            assert!(
                matches!(config.validate(), Err(HalftoneError::InvalidConfig(_))),
                "should reject {:?}",
                config
            );
        }
    }

    #[test]
    fn randomness_flags() {
        let mut config = GenerationConfig::default();
        assert!(!config.uses_randomness());
        config.jitter = 0.2;
        assert!(config.uses_randomness());
        config.jitter = 0.0;
        config.rotate = true;
        assert!(config.uses_randomness());
    }
}
