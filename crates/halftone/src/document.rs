//! Output document assembly.
//!
//! The document is a flat node list serialized once. Motif content is the
//! fragment's inner markup, passed through untouched.

use std::fmt;

use crate::compose::Placement;
use crate::geometry::Viewport;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// One child of the root element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    /// Full-viewport opaque rectangle.
    Background { fill: String },
    /// A transformed group wrapping fragment content.
    Motif { placement: Placement, content: &'a str },
}

/// A complete halftone document, borrowing fragment markup.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument<'a> {
    pub viewport: Viewport,
    pub nodes: Vec<Node<'a>>,
}

impl<'a> SvgDocument<'a> {
    /// Empty document with its background already in place.
    pub fn new(viewport: Viewport, background: &str) -> Self {
        Self {
            viewport,
            nodes: vec![Node::Background { fill: background.to_string() }],
        }
    }

    pub fn push_motif(&mut self, placement: Placement, content: &'a str) {
        self.nodes.push(Node::Motif { placement, content });
    }

}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Background { fill } => {
                write!(f, r#"<rect width="100%" height="100%" fill="{}"/>"#, fill)
            }
            Node::Motif { placement, content } => {
                write!(f, r#"<g transform="{}">{}</g>"#, placement.transform(), content)
            }
        }
    }
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Viewport { width, height } = self.viewport;
        write!(
            f,
            r#"<svg xmlns="{}" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            SVG_NS, width, height, width, height
        )?;
        for node in &self.nodes {
            write!(f, "{}", node)?;
        }
        f.write_str("</svg>")
    }
}
