//! JSON output formatter

use crate::models::QueryResult;
use crate::output::FormatError;

/// Format a query result as pretty-printed JSON
pub fn format_json(data: &QueryResult) -> Result<String, FormatError> {
    serde_json::to_string_pretty(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::create_test_data;

    #[test]
    fn test_format_json() {
        let json = format_json(&create_test_data()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["matches"][0]["path"], serde_json::json!(["a"]));
        assert_eq!(parsed["matches"][1]["path"], serde_json::json!(["b", 0]));
        assert_eq!(parsed["matches"][1]["value"]["name"], "lens");
        assert_eq!(parsed["stats"]["match_count"], 2);
    }
}
