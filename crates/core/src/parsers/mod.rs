//! Parsers module for loading value trees
//!
//! This module turns JSON or YAML text into a [`Value`] tree. Parsing is
//! delegated to serde; object keys keep their document order and numbers
//! must be integers.

mod json;
mod yaml;

pub use json::JsonParser;
pub use yaml::YamlParser;

use crate::value::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Parser errors
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    #[default]
    Json,
    Yaml,
}

impl InputFormat {
    /// Determine input format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(InputFormat::Json),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            _ => None,
        }
    }

    /// Parse a format name as given on a command line
    pub fn from_name(name: &str) -> Result<Self, ParserError> {
        Self::from_extension(name).ok_or_else(|| ParserError::UnsupportedFormat(name.to_string()))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InputFormat::Json => "JSON",
            InputFormat::Yaml => "YAML",
        }
    }
}

/// Trait for format-specific parsers
pub trait ValueParser {
    /// Get the format this parser handles
    fn format(&self) -> InputFormat;

    /// Parse source text into a value tree
    fn parse(&self, source: &str) -> Result<Value, ParserError>;
}

/// Create a parser for the specified format
pub fn create_parser(format: InputFormat) -> Box<dyn ValueParser> {
    match format {
        InputFormat::Json => Box::new(JsonParser),
        InputFormat::Yaml => Box::new(YamlParser),
    }
}

/// Parse source text in the given format
pub fn parse_str(source: &str, format: InputFormat) -> Result<Value, ParserError> {
    create_parser(format).parse(source)
}

/// Read and parse a file
///
/// Without an explicit format the file extension decides; unknown
/// extensions are read as JSON.
pub fn parse_file(path: &Path, format: Option<InputFormat>) -> Result<Value, ParserError> {
    let format = format
        .or_else(|| {
            path.extension()
                .and_then(|ext| InputFormat::from_extension(&ext.to_string_lossy()))
        })
        .unwrap_or_default();

    let source = fs::read_to_string(path)?;
    tracing::debug!(
        path = %path.display(),
        format = format.display_name(),
        bytes = source.len(),
        "parsing input"
    );
    parse_str(&source, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path as ValuePath;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_extension("JSON"), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_extension("yml"), Some(InputFormat::Yaml));
        assert_eq!(InputFormat::from_extension("toml"), None);
        assert!(matches!(
            InputFormat::from_name("xml"),
            Err(ParserError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_file_by_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "name: lens\ntags:\n  - a\n  - b").unwrap();

        let value = parse_file(&path, None).unwrap();
        assert_eq!(
            value.get(&ValuePath::root().key("tags").index(1)),
            Some(&Value::string("b"))
        );
    }

    #[test]
    fn test_parse_file_unknown_extension_is_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, r#"{"a": [1, 2]}"#).unwrap();

        let value = parse_file(&path, None).unwrap();
        assert_eq!(
            value.get(&ValuePath::root().key("a").index(0)),
            Some(&Value::number(1))
        );
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = parse_file(&dir.path().join("nope.json"), None).unwrap_err();
        assert!(matches!(err, ParserError::IoError(_)));
    }
}
