//! The halftone pipeline.
//!
//! ```text
//! field -> perspective -> brightness (undistorted) -> weight -> placement -> document
//! ```
//!
//! One run is a pure function of (image, fragments, config). Randomness
//! comes from a `StdRng` seeded from `config.seed` at the start of the run
//! and passed down explicitly, so equal seeds give byte-identical output.

use std::borrow::Cow;

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::compose::{Placement, random_rotation};
use crate::config::GenerationConfig;
use crate::distort::{Jitter, Perspective, distort_field};
use crate::document::SvgDocument;
use crate::error::HalftoneError;
use crate::field::generate_field;
use crate::fragment::PatternFragment;
use crate::geometry::Viewport;
use crate::raster::SourceImage;
use crate::weight::{Verdict, WeightMapper};

/// Counters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GenerationStats {
    /// Points produced by the layout.
    pub candidates: usize,
    /// Points warped out of the unit square.
    pub dropped_perspective: usize,
    /// Samples at or above the brightness cutoff.
    pub skipped_bright: usize,
    /// Samples whose scale fell below the visible minimum.
    pub skipped_small: usize,
    pub emitted: usize,
}

/// Placements for one run, before serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub viewport: Viewport,
    pub placements: Vec<Placement>,
    pub stats: GenerationStats,
}

/// A finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct Halftone {
    /// The complete SVG document.
    pub svg: String,
    pub viewport: Viewport,
    pub placements: Vec<Placement>,
    pub stats: GenerationStats,
}

/// Run the whole pipeline and serialize the document.
pub fn generate(
    image: &SourceImage,
    fragments: &[PatternFragment],
    config: &GenerationConfig,
) -> Result<Halftone, HalftoneError> {
    let plan = plan(image, fragments, config)?;
    let svg = assemble(&plan, fragments, &config.background).to_string();

    Ok(Halftone {
        svg,
        viewport: plan.viewport,
        placements: plan.placements,
        stats: plan.stats,
    })
}

/// Compute placements, seeding the random generator from the config.
pub fn plan(
    image: &SourceImage,
    fragments: &[PatternFragment],
    config: &GenerationConfig,
) -> Result<Plan, HalftoneError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    plan_with_rng(image, fragments, config, &mut rng)
}

/// Compute placements drawing jitter and rotation from `rng`.
pub fn plan_with_rng<R: Rng>(
    image: &SourceImage,
    fragments: &[PatternFragment],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Plan, HalftoneError> {
    if fragments.is_empty() {
        return Err(HalftoneError::NoFragments);
    }
    config.validate()?;

    // Inversion happens once, before any sampling
    let image: Cow<'_, SourceImage> = if config.invert {
        Cow::Owned(image.inverted())
    } else {
        Cow::Borrowed(image)
    };

    let field = generate_field(config, image.width(), image.height());
    let viewport = field.viewport;
    let distorted = distort_field(&field, Perspective::from_config(config));
    if config.has_perspective() {
        debug!(
            "perspective ({}, {}) pushed {} of {} points off the canvas",
            config.perspective_x,
            config.perspective_y,
            distorted.dropped,
            field.len()
        );
    }

    let mapper = WeightMapper::from_config(config, fragments.len());
    let jitter = Jitter::new(config.jitter);

    let mut stats = GenerationStats {
        candidates: field.len(),
        dropped_perspective: distorted.dropped,
        ..Default::default()
    };
    let mut placements = Vec::with_capacity(distorted.samples.len());

    for sample in &distorted.samples {
        let brightness = image.sample(sample.normalized);

        let weight = match mapper.map(brightness, sample.scale_modifier) {
            Verdict::Draw(weight) => weight,
            Verdict::SkipBright => {
                stats.skipped_bright += 1;
                continue;
            }
            Verdict::SkipSmall => {
                stats.skipped_small += 1;
                continue;
            }
        };

        let fragment = &fragments[weight.fragment_index];
        let draw_size = sample.cell_size * weight.scale;
        let center = viewport.to_output(sample.distorted);

        let mut placement = Placement::centered(weight.fragment_index, fragment, center, draw_size)
            .offset(jitter.offset(rng, sample.cell_size));
        if config.rotate {
            placement = placement.rotated(random_rotation(rng));
        }
        placements.push(placement);
    }

    stats.emitted = placements.len();
    debug!(
        "{} layout: {} candidates, {} off-canvas, {} too bright, {} too small, {} motifs",
        config.layout,
        stats.candidates,
        stats.dropped_perspective,
        stats.skipped_bright,
        stats.skipped_small,
        stats.emitted
    );

    Ok(Plan { viewport, placements, stats })
}

/// Build the document tree for a plan.
pub fn assemble<'a>(plan: &Plan, fragments: &'a [PatternFragment], background: &str) -> SvgDocument<'a> {
    let mut doc = SvgDocument::new(plan.viewport, background);
    for placement in &plan.placements {
        doc.push_motif(*placement, &fragments[placement.fragment_index].inner);
    }
    doc
}

// ============================================================================
// TESTS
// ============================================================================
