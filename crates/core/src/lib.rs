//! json_lens_core - Core library for path-aware queries over value trees
//!
//! This crate walks an in-memory JSON-like [`Value`] tree, records the
//! [`Path`] to every node and lets a pluggable [`Matcher`] decide what to
//! collect and when to stop.
//!
//! # Features
//!
//! - **Value Model**: Six-shape value enum with integer-only numbers and
//!   insertion-ordered objects.
//! - **Paths**: Immutable key/index step sequences, usable for direct lookup
//!   through [`Value::get`].
//! - **Composable Matchers**: Key, index, pattern and predicate matchers with
//!   `or`, `limit` and `max_depth` combinators.
//! - **Early Termination**: Matchers can prune a subtree or stop the whole
//!   traversal.
//! - **Multiple Input/Output Formats**: JSON and YAML input; JSON, YAML, ANSI
//!   and plain-text output.
//!
//! # Example
//!
//! ```rust
//! use json_lens_core::{match_key, traverse, Path, Value};
//!
//! let value = Value::object([
//!     ("a", Value::number(1)),
//!     ("b", Value::object([("a", Value::number(2))])),
//! ]);
//!
//! let matches = traverse(&value, match_key("a"));
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[1].path, Path::root().key("b").key("a"));
//!
//! // Paths from earlier matches resolve directly
//! assert_eq!(value.get(&matches[1].path), Some(&Value::number(2)));
//! ```

pub mod config;
pub mod engine;
pub mod matcher;
pub mod models;
pub mod output;
pub mod parsers;
pub mod path;
pub mod value;

// Re-exports for convenience
pub use config::{ConfigError, TraversalConfig};
pub use engine::{traverse, Traverser};
pub use matcher::{
    from_fn, match_all_keys, match_first_key, match_index, match_key, match_key_pattern,
    match_where, Flow, Matcher, MatcherExt, Visit,
};
pub use models::{Match, QueryMetadata, QueryResult, TraversalStats};
pub use output::{format_output, format_value, FormatError, OutputFormat};
pub use parsers::{create_parser, parse_file, parse_str, InputFormat, ParserError, ValueParser};
pub use path::{Path, PathStep};
pub use value::{Map, Value, ValueKind};
