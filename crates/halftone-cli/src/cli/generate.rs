//! Generate command implementation.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use log::info;
use serde::Serialize;

use halftone::{GenerationConfig, GenerationStats, Layout, Placement, Viewport, generate};

use super::common::{load_config, load_fragments, load_image, write_output};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source image (PNG or JPEG), converted to grayscale
    pub image: PathBuf,

    /// Pattern SVG files, ordered from lightest to heaviest motif
    #[arg(required = true)]
    pub patterns: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// YAML or JSON file with generation settings; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sample layout: grid or spiral
    #[arg(short, long)]
    pub layout: Option<Layout>,

    /// Grid columns, or spiral base count
    #[arg(short, long)]
    pub density: Option<u32>,

    #[arg(long)]
    pub max_scale: Option<f64>,

    #[arg(long)]
    pub min_scale: Option<f64>,

    /// Invert image brightness before sampling
    #[arg(long)]
    pub invert: bool,

    #[arg(long, allow_negative_numbers = true)]
    pub perspective_x: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub perspective_y: Option<f64>,

    /// Random offset as a fraction of cell size (0-1)
    #[arg(long)]
    pub jitter: Option<f64>,

    /// Rotate each motif by a random angle
    #[arg(long)]
    pub rotate: bool,

    /// Seed for jitter and rotation
    #[arg(long, conflicts_with = "randomize")]
    pub seed: Option<u64>,

    /// Draw a fresh seed for this run (it is logged)
    #[arg(long)]
    pub randomize: bool,

    /// Skip samples at or above this brightness
    #[arg(long)]
    pub brightness_cutoff: Option<f64>,

    /// Skip motifs smaller than this scale
    #[arg(long)]
    pub min_visible_scale: Option<f64>,

    /// Spiral point count multiplier
    #[arg(long)]
    pub spiral_multiplier: Option<u32>,

    /// Background fill
    #[arg(long)]
    pub background: Option<String>,

    /// Emit a JSON placement report instead of SVG
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Start from the config file (or defaults) and apply flag overrides.
    pub fn resolve_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GenerationConfig::default(),
        };

        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(density) = self.density {
            config.density = density;
        }
        if let Some(v) = self.max_scale {
            config.max_scale = v;
        }
        if let Some(v) = self.min_scale {
            config.min_scale = v;
        }
        if self.invert {
            config.invert = true;
        }
        if let Some(v) = self.perspective_x {
            config.perspective_x = v;
        }
        if let Some(v) = self.perspective_y {
            config.perspective_y = v;
        }
        if let Some(v) = self.jitter {
            config.jitter = v;
        }
        if self.rotate {
            config.rotate = true;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.randomize {
            config.seed = rand::random();
            info!("Randomized seed: {}", config.seed);
        }
        if let Some(v) = self.brightness_cutoff {
            config.brightness_cutoff = v;
        }
        if let Some(v) = self.min_visible_scale {
            config.min_visible_scale = v;
        }
        if let Some(v) = self.spiral_multiplier {
            config.spiral_multiplier = v;
        }
        if let Some(bg) = &self.background {
            config.background = bg.clone();
        }

        Ok(config)
    }
}

/// JSON report of one run.
#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a GenerationConfig,
    viewport: Viewport,
    stats: GenerationStats,
    placements: &'a [Placement],
}

/// Execute the generate command.
pub fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let config = args.resolve_config()?;
    config.validate()?;
    if config.uses_randomness() && !args.randomize {
        info!("Seed: {}", config.seed);
    }

    let fragments = load_fragments(&args.patterns)?;
    let image = load_image(&args.image)?;

    let start = Instant::now();
    let halftone = generate(&image, &fragments, &config)?;
    info!(
        "Placed {} motifs on a {}x{} {} field in {:?}",
        halftone.stats.emitted,
        halftone.viewport.width,
        halftone.viewport.height,
        config.layout,
        start.elapsed()
    );

    let output = if args.json {
        serde_json::to_string_pretty(&JsonReport {
            config: &config,
            viewport: halftone.viewport,
            stats: halftone.stats,
            placements: &halftone.placements,
        })?
    } else {
        halftone.svg
    };

    write_output(args.output.as_deref(), &output)
}
