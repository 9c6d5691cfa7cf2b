//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing a
//! page snapshot and querying it with CSS selectors. Nothing here mutates the
//! parsed tree.
//!
//! # Example
//!
//! ```rust
//! use postcraft_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let paragraph = doc.select_first("p.content").unwrap().unwrap();
//! assert_eq!(paragraph.inner_text(), "Paragraph");
//! ```

use scraper::{ElementRef, Html, Node, Selector};

use crate::{PostcraftError, Result};

/// Elements whose content is never rendered.
const SKIPPED_TAGS: [&str; 7] = ["script", "style", "noscript", "template", "head", "iframe", "svg"];

/// Block elements that start and end on their own line.
const LINE_BLOCKS: [&str; 30] = [
    "address",
    "article",
    "aside",
    "blockquote",
    "caption",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "header",
    "hgroup",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "pre",
    "section",
    "summary",
    "table",
    "tr",
    "ul",
    "textarea",
];

/// Block elements separated from their neighbours by a blank line.
const PARAGRAPH_BLOCKS: [&str; 7] = ["p", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use postcraft_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// The HTML5 parser recovers from any malformed input, so this only
    /// returns a `Result` to keep the call sites uniform.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Gets the raw HTML representation.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects every element matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`PostcraftError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use postcraft_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector, in document order.
    ///
    /// An absent element is `Ok(None)`; only an invalid selector is an error.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Gets the `<body>` element, if the parser produced one.
    pub fn body(&self) -> Option<Element<'_>> {
        let selector = Selector::parse("body").ok()?;
        self.html.select(&selector).next().map(|el| Element { element: el })
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PostcraftError::HtmlParseError(format!("Invalid selector {selector:?}: {e}")))
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use postcraft_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the raw text content (every descendant text node, unrendered).
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the rendered text of this element.
    ///
    /// Approximates what a browser would show: hidden and non-content
    /// elements are skipped, whitespace is collapsed outside `pre`, and block
    /// elements are placed on their own lines.
    pub fn inner_text(&self) -> String {
        TextRenderer::default().render(self.element)
    }

    /// Rendered text, or the raw text when nothing renders.
    pub fn visible_text(&self) -> String {
        let rendered = self.inner_text();
        if rendered.is_empty() { self.text() } else { rendered }
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name (e.g., "div", "a", "span").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if value.attr("hidden").is_some() {
        return true;
    }
    if value.attr("aria-hidden").is_some_and(|v| v.eq_ignore_ascii_case("true")) {
        return true;
    }
    value.attr("style").is_some_and(|style| {
        let compact: String = style.chars().filter(|c| !c.is_whitespace()).collect();
        compact.to_ascii_lowercase().contains("display:none")
    })
}

/// Walks an element and builds its rendered text.
///
/// Line breaks requested by blocks are kept pending and only written when
/// more text follows, so the output never starts or ends with a break.
#[derive(Default)]
struct TextRenderer {
    out: String,
    pending_breaks: usize,
    pending_space: bool,
    pending_tab: bool,
    preformatted: usize,
}

impl TextRenderer {
    fn render(mut self, root: ElementRef<'_>) -> String {
        self.walk(root);
        self.out
    }

    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text),
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.visit(child_element);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        if SKIPPED_TAGS.contains(&name) || is_hidden(element) {
            return;
        }

        match name {
            "br" => {
                self.flush();
                self.trim_trailing_blanks();
                self.out.push('\n');
                self.pending_space = false;
                return;
            }
            "td" | "th" => {
                if !self.out.is_empty() && self.pending_breaks == 0 && !self.out.ends_with('\n') {
                    self.pending_tab = true;
                }
                self.walk(element);
                return;
            }
            _ => {}
        }

        let breaks = if PARAGRAPH_BLOCKS.contains(&name) {
            2
        } else if LINE_BLOCKS.contains(&name) {
            1
        } else {
            0
        };
        let preformatted = matches!(name, "pre" | "textarea");

        self.require_breaks(breaks);
        if preformatted {
            self.preformatted += 1;
        }
        self.walk(element);
        if preformatted {
            self.preformatted -= 1;
        }
        self.require_breaks(breaks);
    }

    fn require_breaks(&mut self, count: usize) {
        if count > 0 && !self.out.is_empty() {
            self.pending_breaks = self.pending_breaks.max(count);
        }
    }

    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }

        if self.preformatted > 0 {
            self.flush();
            self.out.push_str(raw);
            return;
        }

        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let leading_space = raw.starts_with(char::is_whitespace);
        let trailing_space = raw.ends_with(char::is_whitespace);

        if collapsed.is_empty() {
            self.pending_space = true;
            return;
        }

        self.flush();
        if (leading_space || self.pending_space) && !self.out.is_empty() && !self.out.ends_with(char::is_whitespace) {
            self.out.push(' ');
        }
        self.out.push_str(&collapsed);
        self.pending_space = trailing_space;
    }

    fn flush(&mut self) {
        if self.pending_breaks > 0 {
            self.trim_trailing_blanks();
            for _ in 0..self.pending_breaks {
                self.out.push('\n');
            }
            self.pending_breaks = 0;
            self.pending_space = false;
            self.pending_tab = false;
        } else if self.pending_tab {
            self.out.push('\t');
            self.pending_tab = false;
            self.pending_space = false;
        }
    }

    fn trim_trailing_blanks(&mut self) {
        let trimmed = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(trimmed);
    }
}
