//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use halftone::{GenerationConfig, PatternFragment, SourceImage, parse_fragments};

/// Decode an image file to 8-bit luminance.
pub fn load_image(path: &Path) -> Result<SourceImage> {
    let gray = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?
        .to_luma8();
    let image = SourceImage::try_from(gray)
        .with_context(|| format!("image {} has no pixels", path.display()))?;
    info!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Read and parse pattern files, dropping the ones that do not parse.
pub fn load_fragments(paths: &[PathBuf]) -> Result<Vec<PatternFragment>> {
    let sources = paths
        .iter()
        .map(|path| fs::read(path).with_context(|| format!("failed to read pattern {}", path.display())))
        .collect::<Result<Vec<_>>>()?;

    for (i, path) in paths.iter().enumerate() {
        debug!("pattern #{} = {}", i, path.display());
    }

    let fragments = parse_fragments(&sources);
    info!("Loaded {} of {} patterns", fragments.len(), paths.len());
    Ok(fragments)
}

/// Load a YAML or JSON config file, chosen by extension.
pub fn load_config(path: &Path) -> Result<GenerationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON config {}", path.display()))?
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML config {}", path.display()))?
    };
    Ok(config)
}

/// Write to a file, or stdout for `None` / `-`.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) if path != Path::new("-") => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote: {}", path.display());
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
