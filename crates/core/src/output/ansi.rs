//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for query results.

use crate::models::{Match, QueryResult};
use crate::output::FormatError;
use crate::path::{Path, PathStep};
use crate::value::{Value, ValueKind};

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

// Colors
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// Bright colors
const BRIGHT_BLUE: &str = "\x1b[94m";
const BRIGHT_CYAN: &str = "\x1b[96m";

// Background colors
const BG_BLUE: &str = "\x1b[44m";

/// Get color for value kind
fn kind_color(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::String => GREEN,
        ValueKind::Number => YELLOW,
        ValueKind::Bool => MAGENTA,
        ValueKind::Null => DIM,
        ValueKind::Object | ValueKind::Array => WHITE,
    }
}

/// Format a query result as ANSI colored text
pub fn format_ansi(data: &QueryResult) -> Result<String, FormatError> {
    let mut output = String::new();

    // Header
    output.push_str(&format!(
        "\n{}{}  Query Results  {}{}\n\n",
        BOLD, BG_BLUE, RESET, RESET
    ));

    output.push_str(&format!(
        "{}Matcher:{} {}\n",
        BOLD, RESET, data.metadata.matcher
    ));
    output.push_str(&format!(
        "{}Matches:{} {}  {}Nodes:{} {}  {}Depth:{} {}\n\n",
        BOLD,
        RESET,
        data.stats.match_count,
        BOLD,
        RESET,
        data.stats.nodes_visited,
        BOLD,
        RESET,
        data.stats.max_depth_reached
    ));

    for m in &data.matches {
        output.push_str(&format_match_ansi(m)?);
    }

    // Footer
    let stopped = if data.stats.stopped_early {
        ", stopped early"
    } else {
        ""
    };
    output.push_str(&format!(
        "\n{}Traversal completed in {}us{}{}\n",
        DIM, data.metadata.duration_us, stopped, RESET
    ));

    Ok(output)
}

/// Format a single value as ANSI colored text
pub fn format_value_ansi(value: &Value) -> Result<String, FormatError> {
    let text = serde_json::to_string_pretty(value)?;
    Ok(format!("{}{}{}", kind_color(value.kind()), text, RESET))
}

/// Format one match as `path  kind  value`
fn format_match_ansi(m: &Match) -> Result<String, FormatError> {
    let kind = m.value.kind();
    Ok(format!(
        "  {}  {}{:<6}{}  {}{}{}\n",
        format_path_ansi(&m.path),
        DIM,
        kind.label(),
        RESET,
        kind_color(kind),
        serde_json::to_string(&m.value)?,
        RESET
    ))
}

/// Format a path with keys and indices in distinct colors
pub fn format_path_ansi(path: &Path) -> String {
    let mut output = format!("{}{}${}", BOLD, BRIGHT_BLUE, RESET);
    for step in path {
        let color = match step {
            PathStep::Key(_) => BRIGHT_CYAN,
            PathStep::Index(_) => CYAN,
        };
        output.push_str(&format!("{}{}{}", color, step, RESET));
    }
    output
}
