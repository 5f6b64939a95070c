//! CLI command implementations.
//!
//! - `generate` - Build a halftone SVG (or JSON placement report)
//! - `inspect` - Show how pattern files parse
//! - `layouts` - List sample layouts

pub mod common;
pub mod generate;
pub mod inspect;

pub use generate::{GenerateArgs, cmd_generate};
pub use inspect::{InspectArgs, cmd_inspect, cmd_layouts};
