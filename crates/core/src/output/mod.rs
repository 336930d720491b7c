//! Output formatting module
//!
//! This module provides formatters for JSON, YAML, ANSI and plain-text
//! output of query results and single values.

pub mod ansi;
mod json;
mod yaml;

pub use ansi::{format_ansi, format_value_ansi};
pub use json::format_json;
pub use yaml::format_yaml;

use crate::models::QueryResult;
use crate::value::Value;
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Plain text summary
    Summary,
}

/// Format a query result in the specified format
pub fn format_output(data: &QueryResult, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
        OutputFormat::Ansi => format_ansi(data),
        OutputFormat::Summary => format_summary(data),
    }
}

/// Format a single value in the specified format
pub fn format_value(value: &Value, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(FormatError::from),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(FormatError::from),
        OutputFormat::Ansi => format_value_ansi(value),
        OutputFormat::Summary => serde_json::to_string(value).map_err(FormatError::from),
    }
}

/// Format as plain text summary
fn format_summary(data: &QueryResult) -> Result<String, FormatError> {
    let mut output = String::new();

    output.push_str("Query Results\n");
    output.push_str("=============\n\n");
    output.push_str(&format!("Matcher: {}\n", data.metadata.matcher));
    output.push_str(&format!("Matches: {}\n", data.stats.match_count));
    output.push_str(&format!("Nodes Visited: {}\n", data.stats.nodes_visited));
    output.push_str(&format!("Max Depth: {}\n", data.stats.max_depth_reached));
    if data.stats.stopped_early {
        output.push_str("Stopped early\n");
    }

    if !data.matches.is_empty() {
        output.push('\n');
    }
    for m in &data.matches {
        output.push_str(&format!(
            "{} = {}\n",
            m.path,
            serde_json::to_string(&m.value)?
        ));
    }

    output.push_str(&format!(
        "\nTraversal Duration: {}us\n",
        data.metadata.duration_us
    ));

    Ok(output)
}


#[cfg(test)]
mod tests {
    use super::test_support::create_test_data;
    use super::*;

    #[test]
    fn test_format_summary() {
        let summary = format_output(&create_test_data(), OutputFormat::Summary).unwrap();
        assert!(summary.contains("Matcher: all-keys"));
        assert!(summary.contains("Matches: 2"));
        assert!(summary.contains("$['a'] = 1\n"));
        assert!(summary.contains("$['b'][0] = {\"name\":\"lens\"}\n"));
        assert!(!summary.contains("Stopped early"));
    }

    #[test]
    fn test_format_value() {
        let value = Value::array([Value::number(1), Value::null()]);
        assert_eq!(format_value(&value, OutputFormat::Summary).unwrap(), "[1,null]");
        assert_eq!(format_value(&value, OutputFormat::Yaml).unwrap(), "- 1\n- null\n");
    }
}
