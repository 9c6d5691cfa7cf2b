use crate::pipeline::Conversion;
use crate::{PostcraftError, Result};
use serde::Serialize;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Selector (or fallback label) the text came from
    pub source_label: &'a str,
    /// Length of the extracted text in characters
    pub length: usize,
    /// Extracted plain text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    /// Decorated post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<&'a str>,
}

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Include the extracted text
    pub include_text: bool,
    /// Include the decorated post
    pub include_post: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { include_text: true, include_post: true, pretty: true }
    }
}

/// Convert a conversion result to JSON
pub fn convert_to_json(conversion: &Conversion, config: &JsonConfig) -> Result<String> {
    let extraction = &conversion.extraction;
    let output = JsonOutput {
        source_label: &extraction.source_label,
        length: extraction.length,
        text: config.include_text.then_some(extraction.text.as_str()),
        post: config.include_post.then_some(conversion.post.as_str()),
    };

    let json = if config.pretty { serde_json::to_string_pretty(&output) } else { serde_json::to_string(&output) };
    json.map_err(|e| PostcraftError::SerializeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractionResult;

    fn sample() -> Conversion {
        Conversion {
            extraction: ExtractionResult {
                text: "Title\nBody line".to_string(),
                source_label: "main".to_string(),
                length: 15,
            },
            post: "✨ Title ✨\n\nBody line".to_string(),
        }
    }

    #[test]
    fn test_convert_to_json() {
        let json = convert_to_json(&sample(), &JsonConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source_label"], "main");
        assert_eq!(value["length"], 15);
        assert_eq!(value["text"], "Title\nBody line");
        assert!(value["post"].as_str().unwrap().starts_with("✨ Title"));
    }

    #[test]
    fn test_convert_to_json_without_post() {
        let config = JsonConfig { include_post: false, pretty: false, ..Default::default() };
        let json = convert_to_json(&sample(), &config).unwrap();

        assert!(!json.contains("\"post\""));
        assert!(!json.contains('\n'));
    }
}
