//! Visual weight mapping - brightness to fragment choice and draw scale.
//!
//! ```text
//! darkness = 1 - brightness / 255
//! scale    = (min + (max - min) * darkness) * perspective_modifier
//! index    = min(floor(darkness * count), count - 1)
//! ```
//!
//! Both outputs grow with darkness, so list fragments from lightest to
//! heaviest motif. The index is driven by darkness, not by raw brightness,
//! so that darker samples always pick a heavier fragment.

use crate::config::GenerationConfig;

/// Weight of a sample that will be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
    pub fragment_index: usize,
    pub scale: f64,
}

/// What to do with one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Draw(Weight),
    /// Brightness at or above the near-white cutoff.
    SkipBright,
    /// Final scale below the minimum visible size.
    SkipSmall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightMapper {
    pub min_scale: f64,
    pub max_scale: f64,
    pub brightness_cutoff: f64,
    pub min_visible_scale: f64,
    pub fragment_count: usize,
}

impl WeightMapper {
    pub fn from_config(config: &GenerationConfig, fragment_count: usize) -> Self {
        Self {
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            brightness_cutoff: config.brightness_cutoff,
            min_visible_scale: config.min_visible_scale,
            fragment_count,
        }
    }

    #[inline]
    pub fn darkness(brightness: u8) -> f64 {
        1.0 - brightness as f64 / 255.0
    }

    /// Scale before any perspective modifier.
    #[inline]
    pub fn base_scale(&self, brightness: u8) -> f64 {
        self.min_scale + (self.max_scale - self.min_scale) * Self::darkness(brightness)
    }

    /// Darker samples select higher indices.
    pub fn fragment_index(&self, brightness: u8) -> usize {
        let count = self.fragment_count.max(1);
        let index = (Self::darkness(brightness) * count as f64).floor() as usize;
        index.min(count - 1)
    }

    /// Decide whether and how large to draw a sample.
    pub fn map(&self, brightness: u8, scale_modifier: f64) -> Verdict {
        if brightness as f64 >= self.brightness_cutoff {
            return Verdict::SkipBright;
        }
        let scale = self.base_scale(brightness) * scale_modifier;
        if scale < self.min_visible_scale {
            return Verdict::SkipSmall;
        }
        Verdict::Draw(Weight {
            fragment_index: self.fragment_index(brightness),
            scale,
        })
    }
}
