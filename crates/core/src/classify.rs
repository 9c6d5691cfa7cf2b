//! Line classification for the post formatter.
//!
//! Extracted documents are already linear text, so classification is a
//! per-line shape test rather than a structural parse: a line either starts
//! with a list marker or it is a paragraph. Titles are positional (the first
//! line) and are assigned by the formatter.

use std::sync::LazyLock;

use regex::Regex;

/// A bullet (`•`, `·`, `-`, `*`) or an ASCII number followed by `.` or `)`, then whitespace.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:[•·\-*]|[0-9]+[.)])\s+").unwrap());

/// The role a line plays in the rendered post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    ListItem,
    Paragraph,
}

/// Classifies a trimmed line by shape.
///
/// Never returns [`LineKind::Title`]; that depends on position.
pub fn classify_line(line: &str) -> LineKind {
    if LIST_MARKER.is_match(line) { LineKind::ListItem } else { LineKind::Paragraph }
}

/// Removes a leading list marker and the whitespace after it.
///
/// Lines without a marker are returned unchanged.
pub fn strip_list_marker(line: &str) -> &str {
    match LIST_MARKER.find(line) {
        Some(marker) => &line[marker.end()..],
        None => line,
    }
}
