//! halftone - CLI for vector halftone generation
//!
//! Usage:
//!   halftone generate <image> <pattern.svg>...   Build a halftone SVG
//!   halftone inspect <pattern.svg>...            Show how patterns parse
//!   halftone layouts                             List sample layouts

use clap::{Parser, Subcommand};

mod cli;

use cli::{GenerateArgs, InspectArgs, cmd_generate, cmd_inspect, cmd_layouts};

#[derive(Parser)]
#[command(name = "halftone", version, about = "Vector halftone mosaics from SVG pattern fragments")]
struct Opts {
    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a halftone SVG from an image and pattern fragments
    Generate(GenerateArgs),
    /// Parse pattern files and report their boxes
    Inspect(InspectArgs),
    /// List available sample layouts
    Layouts,
}

fn main() {
    let opts = Opts::parse();

    let default_level = if opts.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = match opts.command {
        Command::Generate(args) => cmd_generate(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Layouts => {
            cmd_layouts();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
