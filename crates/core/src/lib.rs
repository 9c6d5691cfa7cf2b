pub mod classify;
pub mod config;
pub mod decoration;
pub mod error;
pub mod extract;
pub mod formatters;
pub mod noise;
pub mod parse;
pub mod pipeline;

pub use classify::{LineKind, classify_line, strip_list_marker};
pub use config::{ConfigLoader, PostcraftConfig};
pub use decoration::{DecorationSet, Pool};
pub use error::{PostcraftError, Result};
pub use extract::{
    ContentStatus, DEFAULT_FALLBACK_LABEL, DEFAULT_MIN_ELEMENT_LENGTH, DEFAULT_MIN_USABLE_LENGTH, ExtractConfig,
    ExtractionResult, SelectorRule, extract_content,
};
pub use formatters::{JsonConfig, JsonOutput, PostFormatter, convert_to_json, format_post, format_post_with_rng};
pub use noise::{DEFAULT_UI_NOISE, NoiseFilter};
pub use parse::{Document, Element};
pub use pipeline::{Conversion, Converter, ConverterBuilder, DEFAULT_DOCUMENT_HOSTS, is_document_host};
