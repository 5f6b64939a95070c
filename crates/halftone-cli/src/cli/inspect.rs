//! Inspect and layouts command implementations.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use halftone::{Layout, parse_fragment};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Pattern SVG files
    #[arg(required = true)]
    pub patterns: Vec<PathBuf>,
}

/// Print each pattern's resolved box, or why it would be dropped.
pub fn cmd_inspect(args: InspectArgs) -> Result<()> {
    let mut usable = 0;

    for (i, path) in args.patterns.iter().enumerate() {
        let bytes = fs::read(path).with_context(|| format!("failed to read pattern {}", path.display()))?;
        match parse_fragment(&bytes) {
            Ok(fragment) => {
                usable += 1;
                println!(
                    "#{:<3} {}  viewBox=\"{}\"  {} bytes of content",
                    i,
                    path.display(),
                    fragment.view_box,
                    fragment.inner.len()
                );
            }
            Err(e) => println!("#{:<3} {}  dropped: {}", i, path.display(), e),
        }
    }

    println!();
    println!("{} of {} patterns usable", usable, args.patterns.len());
    Ok(())
}

/// List available sample layouts.
pub fn cmd_layouts() {
    println!("Available layouts:");
    for layout in Layout::all() {
        let description = match layout {
            Layout::Grid => "cell centers of a grid, rows follow the image aspect ratio",
            Layout::Spiral => "Fibonacci sunflower spiral on a square canvas",
        };
        println!("  {:<8} {}", layout.name(), description);
    }
}
