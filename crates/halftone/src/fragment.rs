//! Pattern fragment parsing - extract drawable content from SVG motifs.
//!
//! Each uploaded pattern is a complete SVG document. We keep two things:
//! - the markup between the root's opening and closing tags, verbatim
//! - the native coordinate box the motif was drawn in
//!
//! The inner markup is opaque, caller-trusted content. It is never
//! re-serialized or validated; quick-xml only walks the document far enough
//! to prove there is exactly one well-formed root and to find its byte span.

use std::str::FromStr;

use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Serialize;

use crate::error::FragmentError;

/// Box edge used when a document declares no size, and divisor used when a
/// declared width is zero.
pub const FALLBACK_EXTENT: f64 = 100.0;

/// Native coordinate extents of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self { min_x, min_y, width, height }
    }

    /// Parse `"min-x min-y width height"` (comma or whitespace separated).
    ///
    /// Returns `None` unless there are exactly four finite numbers and both
    /// extents are non-negative.
    pub fn parse(value: &str) -> Option<Self> {
        let numbers: Vec<f64> = svgtypes::NumberListParser::from(value)
            .collect::<Result<_, _>>()
            .ok()?;
        match numbers.as_slice() {
            &[x, y, w, h] if numbers.iter().all(|n| n.is_finite()) && w >= 0.0 && h >= 0.0 => {
                Some(Self::new(x, y, w, h))
            }
            _ => None,
        }
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::new(0.0, 0.0, FALLBACK_EXTENT, FALLBACK_EXTENT)
    }
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

/// One reusable vector motif.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternFragment {
    /// Markup between the root tags, copied verbatim.
    pub inner: String,
    pub view_box: ViewBox,
}

impl PatternFragment {
    pub fn new(inner: impl Into<String>, view_box: ViewBox) -> Self {
        Self { inner: inner.into(), view_box }
    }

    /// Width to divide by when normalizing this fragment to a target size.
    #[inline]
    pub fn width_divisor(&self) -> f64 {
        if self.view_box.width == 0.0 {
            FALLBACK_EXTENT
        } else {
            self.view_box.width
        }
    }

    /// Center of the native box in the fragment's own coordinates.
    #[inline]
    pub fn local_center(&self) -> (f64, f64) {
        let ViewBox { min_x, min_y, width, height } = self.view_box;
        (min_x + width / 2.0, min_y + height / 2.0)
    }
}

impl FromStr for PatternFragment {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fragment_str(s)
    }
}

/// Parse raw bytes of an SVG document into a fragment.
pub fn parse_fragment(bytes: &[u8]) -> Result<PatternFragment, FragmentError> {
    let content = std::str::from_utf8(bytes).map_err(|_| FragmentError::Decode)?;
    parse_fragment_str(content)
}

/// Parse many documents, silently dropping the ones that fail.
///
/// Order of the survivors follows the input order; it matters because the
/// weight mapper picks higher indices for darker samples.
pub fn parse_fragments<I, B>(sources: I) -> Vec<PatternFragment>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    sources
        .into_iter()
        .enumerate()
        .filter_map(|(i, src)| match parse_fragment(src.as_ref()) {
            Ok(fragment) => Some(fragment),
            Err(e) => {
                warn!("dropping pattern #{}: {}", i, e);
                None
            }
        })
        .collect()
}

/// Parse an SVG document held in a string.
pub fn parse_fragment_str(content: &str) -> Result<PatternFragment, FragmentError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);

    let mut depth = 0usize;
    let mut root_closed = false;
    let mut view_box: Option<ViewBox> = None;
    let mut inner_start = 0usize;
    let mut inner_end = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| FragmentError::Xml(format!("at position {}: {}", reader.error_position(), e)))?;

        match event {
            Event::Start(ref e) => {
                if root_closed {
                    return Err(FragmentError::MultipleRoots);
                }
                if depth == 0 {
                    view_box = Some(resolve_view_box(e));
                    inner_start = reader.buffer_position() as usize;
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                if root_closed {
                    return Err(FragmentError::MultipleRoots);
                }
                if depth == 0 {
                    // <svg/> has nothing to draw, but it is still a valid document
                    view_box = Some(resolve_view_box(e));
                    inner_start = reader.buffer_position() as usize;
                    inner_end = inner_start;
                    root_closed = true;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let tag_end = reader.buffer_position() as usize;
                    inner_end = content[inner_start..tag_end]
                        .rfind("</")
                        .map(|offset| inner_start + offset)
                        .ok_or(FragmentError::UnclosedRoot)?;
                    root_closed = true;
                }
            }
            Event::Text(ref t) if depth == 0 => {
                if !t.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(FragmentError::StrayContent);
                }
            }
            Event::CData(_) if depth == 0 => return Err(FragmentError::StrayContent),
            Event::Eof => break,
            // Declarations, comments, doctypes and processing instructions
            _ => {}
        }
    }

    if depth > 0 {
        return Err(FragmentError::UnclosedRoot);
    }
    let view_box = view_box.ok_or(FragmentError::MissingRoot)?;

    Ok(PatternFragment::new(&content[inner_start..inner_end], view_box))
}

/// Work out the native box from the root element's attributes.
///
/// `viewBox` wins; otherwise `0 0 width height` with unit suffixes stripped
/// and `100` for anything missing or unreadable.
fn resolve_view_box(root: &BytesStart) -> ViewBox {
    let mut declared: Option<ViewBox> = None;
    let mut width: Option<f64> = None;
    let mut height: Option<f64> = None;

    for attr in root.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
        let value = std::str::from_utf8(&attr.value).unwrap_or("");

        match key {
            "viewBox" | "viewbox" => declared = ViewBox::parse(value),
            "width" => width = parse_extent(value),
            "height" => height = parse_extent(value),
            _ => {}
        }
    }

    declared.unwrap_or_else(|| {
        ViewBox::new(
            0.0,
            0.0,
            width.unwrap_or(FALLBACK_EXTENT),
            height.unwrap_or(FALLBACK_EXTENT),
        )
    })
}

/// Read a length attribute such as `"64"`, `"64px"` or `"2.5mm"` as a bare number.
fn parse_extent(value: &str) -> Option<f64> {
    let length = svgtypes::Length::from_str(value.trim()).ok()?;
    (length.number.is_finite() && length.number >= 0.0).then_some(length.number)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_inner_content_verbatim() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle cx="50" cy="50" r="40"/>  <rect x="1" y="1" width="2" height="2"/></svg>"#;
        let fragment = parse_fragment(svg.as_bytes()).unwrap();
        assert_eq!(
            fragment.inner,
            r#"<circle cx="50" cy="50" r="40"/>  <rect x="1" y="1" width="2" height="2"/>"#
        );
        assert_eq!(fragment.view_box, ViewBox::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn keeps_nested_groups_and_whitespace() {
        let svg = "<?xml version=\"1.0\"?>\n<!-- motif -->\n<svg viewBox=\"0,0,24,12\">\n  <g><path d=\"M0 0L1 1\"/></g>\n</svg>\n";
        let fragment = parse_fragment(svg.as_bytes()).unwrap();
        assert_eq!(fragment.inner, "\n  <g><path d=\"M0 0L1 1\"/></g>\n");
        assert_eq!(fragment.view_box.width, 24.0);
        assert_eq!(fragment.view_box.height, 12.0);
    }

    #[test]
    fn synthesizes_box_from_width_and_height() {
        let svg = r#"<svg width="64px" height="32"><rect width="64" height="32"/></svg>"#;
        let fragment = parse_fragment(svg.as_bytes()).unwrap();
        assert_eq!(fragment.view_box, ViewBox::new(0.0, 0.0, 64.0, 32.0));
    }

    #[test]
    fn missing_dimension_defaults_to_100() {
        let svg = r#"<svg width="50"><rect/></svg>"#;
        let fragment = parse_fragment(svg.as_bytes()).unwrap();
        assert_eq!(fragment.view_box, ViewBox::new(0.0, 0.0, 50.0, 100.0));

        let bare = parse_fragment(b"<svg><rect/></svg>").unwrap();
        assert_eq!(bare.view_box, ViewBox::default());
    }

    #[test]
    fn unreadable_view_box_falls_back_to_dimensions() {
        let svg = r#"<svg viewBox="0 0 abc" width="10" height="20"><rect/></svg>"#;
        let fragment = parse_fragment(svg.as_bytes()).unwrap();
        assert_eq!(fragment.view_box, ViewBox::new(0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn zero_width_uses_fallback_divisor() {
        let fragment = parse_fragment(br#"<svg viewBox="0 0 0 10"><rect/></svg>"#).unwrap();
        assert_eq!(fragment.view_box.width, 0.0);
        assert_eq!(fragment.width_divisor(), FALLBACK_EXTENT);
    }

    #[test]
    fn self_closing_root_has_empty_content() {
        let fragment = parse_fragment(br#"<svg viewBox="0 0 5 5"/>"#).unwrap();
        assert_eq!(fragment.inner, "");
        assert_eq!(fragment.view_box.width, 5.0);
    }

    #[test]
    fn rejects_malformed_markup() {
        assert!(parse_fragment(b"<svg><g></svg>").is_err());
        assert!(parse_fragment(b"not xml at all").is_err());
        assert!(matches!(parse_fragment(b""), Err(FragmentError::MissingRoot)));
        assert!(matches!(parse_fragment(b"<svg><rect/>"), Err(FragmentError::UnclosedRoot) | Err(FragmentError::Xml(_))));
    }

    #[test]
    fn rejects_second_root() {
        let result = parse_fragment(b"<svg></svg><svg></svg>");
        assert!(matches!(result, Err(FragmentError::MultipleRoots)));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let result = parse_fragment(&[0x3c, 0x73, 0xff, 0xfe]);
        assert!(matches!(result, Err(FragmentError::Decode)));
    }

    #[test]
    fn batch_parse_drops_failures_and_keeps_order() {
        let sources = vec![
            br#"<svg viewBox="0 0 10 10"><rect/></svg>"#.to_vec(),
            b"<broken".to_vec(),
            br#"<svg viewBox="0 0 20 20"><circle/></svg>"#.to_vec(),
        ];
        let fragments = parse_fragments(&sources);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].view_box.width, 10.0);
        assert_eq!(fragments[1].view_box.width, 20.0);
    }

    #[test]
    fn from_str_matches_byte_parser() {
        let svg = r#"<svg viewBox="0 0 8 8"><rect/></svg>"#;
        let a: PatternFragment = svg.parse().unwrap();
        let b = parse_fragment(svg.as_bytes()).unwrap();
        assert_eq!(a, b);
    }
}
