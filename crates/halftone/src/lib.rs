//! # halftone
//!
//! Turns a grayscale image into a vector mosaic of repeated SVG motifs whose
//! size, choice, position and orientation follow local brightness.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! The modules follow the pipeline, leaves first: `fragment`, `field`,
//! `distort`, `raster`, `weight`, `compose`, `document`, and `engine`
//! tying them together.

pub mod compose;
pub mod config;
pub mod distort;
pub mod document;
pub mod engine;
pub mod error;
pub mod field;
pub mod fragment;
pub mod geometry;
pub mod raster;
pub mod weight;

// Re-export common types at crate root for convenience.
pub use compose::Placement;
pub use config::{GenerationConfig, Layout};
pub use engine::{GenerationStats, Halftone, Plan, generate, plan, plan_with_rng};
pub use error::{FragmentError, HalftoneError};
pub use fragment::{PatternFragment, ViewBox, parse_fragment, parse_fragments};
pub use geometry::{Point, VIEWPORT_WIDTH, Viewport};
pub use raster::SourceImage;
