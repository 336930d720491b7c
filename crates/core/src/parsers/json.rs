//! JSON input parser

use super::{InputFormat, ParserError, ValueParser};
use crate::value::Value;

/// Parser for JSON documents
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ValueParser for JsonParser {
    fn format(&self) -> InputFormat {
        InputFormat::Json
    }

    fn parse(&self, source: &str) -> Result<Value, ParserError> {
        serde_json::from_str(source).map_err(ParserError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let value = JsonParser.parse(r#"{"a": 1, "b": "qrs", "c": [true, null]}"#).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(map.get("b"), Some(&Value::string("qrs")));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let value = JsonParser.parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::number(3)));
    }

    #[test]
    fn test_float_rejected() {
        let err = JsonParser.parse(r#"{"pi": 3.14}"#).unwrap_err();
        assert!(matches!(err, ParserError::JsonError(_)));
    }

    #[test]
    fn test_malformed() {
        assert!(JsonParser.parse(r#"{"a": "#).is_err());
    }
}
