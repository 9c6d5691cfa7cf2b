use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::Result;
use crate::noise::NoiseFilter;
use crate::parse::Document;

/// Default minimum trimmed length an element needs to be accepted
pub const DEFAULT_MIN_ELEMENT_LENGTH: usize = 50;

/// Default minimum length of extracted text worth converting
pub const DEFAULT_MIN_USABLE_LENGTH: usize = 10;

/// Label reported when the whole page body was used
pub const DEFAULT_FALLBACK_LABEL: &str = "body (fallback)";

/// Content selectors, most specific first
const DEFAULT_SELECTORS: [&str; 14] = [
    "[class*=\"docx-render\"]",
    "[class*=\"doc-render\"]",
    ".doc-content",
    ".lark-doc-content",
    "[class*=\"wiki-content\"]",
    "[data-testid=\"doc-content\"]",
    ".editor-content",
    "article",
    "[role=\"article\"]",
    "[role=\"main\"]",
    ".document-content",
    "[class*=\"article\"]",
    "[class*=\"editor\"]",
    "main",
];

/// One step of the selector cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorRule {
    /// CSS selector; only its first match in document order is considered
    pub selector: String,
    /// The match is accepted only if its trimmed text is longer than this
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

fn default_min_length() -> usize {
    DEFAULT_MIN_ELEMENT_LENGTH
}

impl SelectorRule {
    pub fn new(selector: impl Into<String>, min_length: usize) -> Self {
        Self { selector: selector.into(), min_length }
    }
}

/// Configuration for content extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Ordered selector cascade
    pub selectors: Vec<SelectorRule>,
    /// UI-noise post-processing
    pub noise: NoiseFilter,
    /// Source label used when falling back to `<body>`
    pub fallback_label: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_SELECTORS
                .iter()
                .map(|s| SelectorRule::new(*s, DEFAULT_MIN_ELEMENT_LENGTH))
                .collect(),
            noise: NoiseFilter::default(),
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }
}

impl ExtractConfig {
    /// Applies one acceptance threshold to every selector in the cascade.
    pub fn with_min_element_length(mut self, min_length: usize) -> Self {
        for rule in &mut self.selectors {
            rule.min_length = min_length;
        }
        self
    }
}

/// How usable an extraction is for conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStatus {
    /// Enough text to convert
    Usable,
    /// Every selector and the body fallback were empty
    NoContentFound,
    /// Some text, but less than the usable minimum
    InsufficientContent { length: usize, minimum: usize },
}

/// The result of content extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Cleaned plain text
    pub text: String,
    /// The selector that produced the text, or the fallback label
    pub source_label: String,
    /// Length of `text` in characters
    pub length: usize,
}

impl ExtractionResult {
    fn new(text: String, source_label: impl Into<String>) -> Self {
        let length = text.chars().count();
        Self { text, source_label: source_label.into(), length }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the text came from the body fallback rather than a selector.
    pub fn is_fallback(&self, config: &ExtractConfig) -> bool {
        self.source_label == config.fallback_label
    }

    /// Classifies the extraction against a minimum usable length.
    pub fn status(&self, min_usable: usize) -> ContentStatus {
        let length = self.text.trim().chars().count();
        if length == 0 {
            ContentStatus::NoContentFound
        } else if length < min_usable {
            ContentStatus::InsufficientContent { length, minimum: min_usable }
        } else {
            ContentStatus::Usable
        }
    }
}

/// Extract the document body text from a page
///
/// Tries each selector of the cascade in order and accepts the first element
/// whose trimmed visible text is longer than the rule's threshold. When none
/// qualifies, the whole `<body>` is used. The accepted text is then run
/// through the noise filter.
///
/// Finding nothing is not an error: the result is simply empty. Only an
/// invalid selector in `config` produces an `Err`.
pub fn extract_content(doc: &Document, config: &ExtractConfig) -> Result<ExtractionResult> {
    let (raw, label) = match select_candidate(doc, config)? {
        Some(found) => found,
        None => {
            debug!("no selector matched, falling back to body");
            let body_text = doc.body().map(|body| body.visible_text()).unwrap_or_default();
            (body_text, config.fallback_label.clone())
        }
    };

    let text = if raw.trim().is_empty() { String::new() } else { config.noise.clean(&raw) };
    let result = ExtractionResult::new(text, label);

    debug!(source = %result.source_label, length = result.length, "extraction finished");
    Ok(result)
}

/// Walk the selector cascade and return the first accepted element's text
fn select_candidate(doc: &Document, config: &ExtractConfig) -> Result<Option<(String, String)>> {
    for rule in &config.selectors {
        let Some(element) = doc.select_first(&rule.selector)? else {
            trace!(selector = %rule.selector, "no match");
            continue;
        };

        let text = element.visible_text();
        let length = text.trim().chars().count();
        trace!(selector = %rule.selector, length, "matched element");

        if length > rule.min_length {
            debug!(selector = %rule.selector, length, "accepted candidate");
            return Ok(Some((text, rule.selector.clone())));
        }
    }

    Ok(None)
}
