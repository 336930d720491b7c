//! YAML input parser

use super::{InputFormat, ParserError, ValueParser};
use crate::value::Value;

/// Parser for YAML documents
///
/// Mapping keys must be strings; integer-only numbers apply as for JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl ValueParser for YamlParser {
    fn format(&self) -> InputFormat {
        InputFormat::Yaml
    }

    fn parse(&self, source: &str) -> Result<Value, ParserError> {
        serde_yaml::from_str(source).map_err(ParserError::from)
    }
}
