//! Data models for traversal results
//!
//! This module defines the records a traversal hands back to its caller:
//! individual matches, per-run statistics and the metadata wrapper used by
//! the output formatters.

use crate::path::Path;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A value found at a path
///
/// Matches own their path and value; they keep no reference into the tree
/// they were produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Location of the value, root to node
    pub path: Path,

    /// The value found at `path`
    pub value: Value,
}

impl Match {
    /// Create a new match from borrowed tree data
    pub fn new(path: &Path, value: &Value) -> Self {
        Self {
            path: path.clone(),
            value: value.clone(),
        }
    }

    /// Depth of the matched node (0 = root)
    pub fn depth(&self) -> usize {
        self.path.depth()
    }
}

/// Summary statistics for a traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStats {
    /// Number of matcher invocations (one per visited node)
    pub nodes_visited: usize,

    /// Deepest node visited (0 = root only)
    pub max_depth_reached: usize,

    /// Number of matches returned
    pub match_count: usize,

    /// Whether traversal ended before visiting every node
    pub stopped_early: bool,
}

/// Metadata about the query run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMetadata {
    /// Description of the matcher that drove the traversal
    pub matcher: String,

    /// Duration of traversal in microseconds
    pub duration_us: u64,

    /// ISO timestamp of the run
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

/// Complete result of a traversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Matches in traversal (pre-order) sequence
    pub matches: Vec<Match>,

    /// Summary statistics
    pub stats: TraversalStats,

    /// Run metadata
    pub metadata: QueryMetadata,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matched values in order
    pub fn values(&self) -> Vec<&Value> {
        self.matches.iter().map(|m| &m.value).collect()
    }

    /// Matched paths in order
    pub fn paths(&self) -> Vec<&Path> {
        self.matches.iter().map(|m| &m.path).collect()
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_owns_its_data() {
        let path = Path::root().key("a");
        let value = Value::array([Value::number(1)]);
        let m = Match::new(&path, &value);
        drop(value);

        assert_eq!(m.path, Path::root().key("a"));
        assert_eq!(m.value, Value::array([Value::number(1)]));
        assert_eq!(m.depth(), 1);
    }

    #[test]
    fn test_query_result_accessors() {
        let result = QueryResult {
            matches: vec![
                Match::new(&Path::root().key("a"), &Value::number(1)),
                Match::new(&Path::root().key("b").index(0), &Value::string("x")),
            ],
            stats: TraversalStats::default(),
            metadata: QueryMetadata {
                matcher: "custom".to_string(),
                duration_us: 0,
                timestamp: String::new(),
                tool_version: String::new(),
            },
        };

        assert!(!result.is_empty());
        assert_eq!(result.values(), vec![&Value::number(1), &Value::string("x")]);
        assert_eq!(
            result.paths(),
            vec![&Path::root().key("a"), &Path::root().key("b").index(0)]
        );
        assert_eq!(result.into_matches().len(), 2);
    }

    #[test]
    fn test_match_serde_shape() {
        let m = Match::new(&Path::root().index(1).key("x"), &Value::bool(true));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"path":[1,"x"],"value":true}"#);
    }
}
