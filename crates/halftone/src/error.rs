//! Error types for the halftone engine.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. Each failure the engine
//! can report is one enum variant, so callers `match` on exactly what
//! went wrong instead of parsing message strings.

/// Failures that stop a generation run.
#[derive(Debug, Clone, PartialEq)]
pub enum HalftoneError {
    /// Every supplied pattern fragment was dropped (or none were given).
    NoFragments,
    /// Image has a zero dimension or a pixel buffer of the wrong length.
    EmptyImage,
    /// A configuration value is outside its documented range.
    InvalidConfig(String),
}

impl std::fmt::Display for HalftoneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HalftoneError::NoFragments => {
                write!(f, "no valid pattern fragments: at least one parsable SVG pattern is required")
            }
            HalftoneError::EmptyImage => write!(f, "source image is empty"),
            HalftoneError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for HalftoneError {}

/// Why a single pattern fragment was rejected.
///
/// These never stop a run on their own; see [`crate::fragment::parse_fragments`].
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentError {
    /// Bytes are not valid UTF-8.
    Decode,
    /// The XML reader rejected the markup.
    Xml(String),
    /// No root element at all.
    MissingRoot,
    /// A second element follows the closed root.
    MultipleRoots,
    /// Input ended before the root was closed.
    UnclosedRoot,
    /// Character data outside the root element.
    StrayContent,
}

impl std::fmt::Display for FragmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FragmentError::Decode => write!(f, "pattern is not valid UTF-8"),
            FragmentError::Xml(msg) => write!(f, "XML parse error: {}", msg),
            FragmentError::MissingRoot => write!(f, "no root element found"),
            FragmentError::MultipleRoots => write!(f, "more than one root element"),
            FragmentError::UnclosedRoot => write!(f, "root element is never closed"),
            FragmentError::StrayContent => write!(f, "text content outside the root element"),
        }
    }
}

impl std::error::Error for FragmentError {}
