//! End-to-end conversion API.
//!
//! [`Converter`] runs the extractor and then the post formatter on a page
//! snapshot. Unlike [`extract_content`], which reports an empty page as an
//! empty result, the converter turns unusable extractions into
//! [`PostcraftError::NoContent`] or [`PostcraftError::InsufficientContent`]
//! so a front-end can show a message instead of an empty post.
//!
//! # Example
//!
//! ```rust
//! use postcraft_core::Converter;
//!
//! let html = r#"<html><body><article>
//!     <h1>Weekly notes</h1>
//!     <p>Three things worth sharing from this week's reading list.</p>
//!     <ul><li>- Ship smaller changes</li><li>- Write the test first</li></ul>
//! </article></body></html>"#;
//!
//! let conversion = Converter::new().convert_html(html).unwrap();
//! assert_eq!(conversion.extraction.source_label, "article");
//! assert!(conversion.post.contains("Weekly notes"));
//! ```

use rand::Rng;
use tracing::{debug, info};
use url::Url;

use crate::config::PostcraftConfig;
use crate::decoration::DecorationSet;
use crate::extract::{ContentStatus, DEFAULT_MIN_USABLE_LENGTH, ExtractConfig, ExtractionResult, extract_content};
use crate::formatters::PostFormatter;
use crate::parse::Document;
use crate::{PostcraftError, Result};

/// Hosts serving the documents the default selector cascade targets.
pub const DEFAULT_DOCUMENT_HOSTS: [&str; 4] = ["feishu.cn", "larksuite.com", "feishu.com", "larkoffice.com"];

/// The output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// What the extractor found
    pub extraction: ExtractionResult,
    /// The decorated post
    pub post: String,
}

/// Extracts a page's body text and formats it as a post.
#[derive(Debug, Clone)]
pub struct Converter {
    extract: ExtractConfig,
    formatter: PostFormatter,
    min_usable_length: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Creates a converter with the default policy.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for configuring a converter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use postcraft_core::Converter;
    ///
    /// let converter = Converter::builder()
    ///     .min_element_length(20)
    ///     .min_usable_length(5)
    ///     .build();
    /// ```
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    /// Creates a converter from a loaded configuration file.
    pub fn from_config(config: &PostcraftConfig) -> Self {
        Self::builder()
            .extract_config(config.extract.clone())
            .decorations(config.decorations.clone())
            .min_usable_length(config.min_usable_length)
            .build()
    }

    pub fn extract_config(&self) -> &ExtractConfig {
        &self.extract
    }

    pub fn min_usable_length(&self) -> usize {
        self.min_usable_length
    }

    /// Runs only the extraction stage.
    pub fn extract(&self, doc: &Document) -> Result<ExtractionResult> {
        extract_content(doc, &self.extract)
    }

    /// Parses `html` and converts it.
    pub fn convert_html(&self, html: &str) -> Result<Conversion> {
        let doc = Document::parse(html)?;
        self.convert_document(&doc)
    }

    /// Converts an already parsed document with the thread-local RNG.
    pub fn convert_document(&self, doc: &Document) -> Result<Conversion> {
        self.convert_with_rng(doc, &mut rand::thread_rng())
    }

    /// Converts a document, drawing decorations from `rng`.
    pub fn convert_with_rng<R: Rng + ?Sized>(&self, doc: &Document, rng: &mut R) -> Result<Conversion> {
        let extraction = self.extract(doc)?;
        info!(source = %extraction.source_label, length = extraction.length, "extracted content");

        match extraction.status(self.min_usable_length) {
            ContentStatus::Usable => {}
            ContentStatus::NoContentFound => return Err(PostcraftError::NoContent),
            ContentStatus::InsufficientContent { length, minimum } => {
                return Err(PostcraftError::InsufficientContent { length, minimum });
            }
        }

        let post = self.formatter.format_with_rng(&extraction.text, rng);
        debug!(length = post.chars().count(), "formatted post");

        Ok(Conversion { extraction, post })
    }
}

/// Builder for [`Converter`].
pub struct ConverterBuilder {
    extract: ExtractConfig,
    decorations: DecorationSet,
    min_usable_length: usize,
}

impl ConverterBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            extract: ExtractConfig::default(),
            decorations: DecorationSet::default(),
            min_usable_length: DEFAULT_MIN_USABLE_LENGTH,
        }
    }

    /// Replaces the whole extraction policy.
    pub fn extract_config(mut self, config: ExtractConfig) -> Self {
        self.extract = config;
        self
    }

    /// Sets the acceptance threshold of every selector.
    pub fn min_element_length(mut self, value: usize) -> Self {
        self.extract = self.extract.with_min_element_length(value);
        self
    }

    /// Sets the minimum length of text worth converting.
    pub fn min_usable_length(mut self, value: usize) -> Self {
        self.min_usable_length = value;
        self
    }

    /// Sets the decoration pools.
    pub fn decorations(mut self, value: DecorationSet) -> Self {
        self.decorations = value;
        self
    }

    /// Builds the converter.
    pub fn build(self) -> Converter {
        Converter {
            extract: self.extract,
            formatter: PostFormatter::new(self.decorations),
            min_usable_length: self.min_usable_length,
        }
    }
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `url` is served by one of `hosts` or a subdomain of one.
///
/// # Errors
///
/// Returns [`PostcraftError::InvalidUrl`] if `url` cannot be parsed or has no host.
pub fn is_document_host<S: AsRef<str>>(url: &str, hosts: &[S]) -> Result<bool> {
    let parsed = Url::parse(url).map_err(|e| PostcraftError::InvalidUrl(format!("{url}: {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| PostcraftError::InvalidUrl(format!("{url}: missing host")))?
        .to_ascii_lowercase();

    Ok(hosts.iter().any(|candidate| {
        let candidate = candidate.as_ref().to_ascii_lowercase();
        host == candidate || host.ends_with(&format!(".{candidate}"))
    }))
}
