//! Traversal engine module
//!
//! This module provides the depth-first walker that drives a [`Matcher`]
//! over every node of a [`Value`] tree.
//!
//! Nodes are visited in pre-order, root first. Object entries are walked in
//! insertion order and array elements by ascending index. The matcher is
//! called exactly once per node: with no step at the root and with the
//! producing step everywhere else, so a container child is seen before any
//! of its descendants.

use crate::config::{ConfigError, TraversalConfig};
use crate::matcher::{Flow, Matcher};
use crate::models::{Match, QueryMetadata, QueryResult, TraversalStats};
use crate::path::{Path, PathStep};
use crate::value::Value;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Main traversal driver
#[derive(Debug, Clone, Default)]
pub struct Traverser {
    config: TraversalConfig,
}

impl Traverser {
    /// Create a new traverser with the given configuration
    pub fn new(config: TraversalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Walk `root` with `matcher` and return matches, stats and metadata
    pub fn run<M: Matcher + ?Sized>(&self, root: &Value, matcher: &mut M) -> QueryResult {
        let start = Instant::now();
        let description = matcher.describe();
        tracing::debug!(matcher = %description, "starting traversal");

        let mut walk = Walk {
            matcher,
            config: &self.config,
            matches: Vec::new(),
            stats: TraversalStats::default(),
        };
        let stopped = walk.walk(&Path::root(), root, None).is_break();

        let Walk {
            matches, mut stats, ..
        } = walk;
        stats.match_count = matches.len();
        stats.stopped_early = stopped;

        let duration = start.elapsed();
        tracing::debug!(
            nodes = stats.nodes_visited,
            matches = stats.match_count,
            stopped = stats.stopped_early,
            "traversal finished"
        );

        QueryResult {
            matches,
            stats,
            metadata: QueryMetadata {
                matcher: description,
                duration_us: whole_micros(duration),
                timestamp: chrono::Utc::now().to_rfc3339(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Walk `root` with `matcher` and return the matches in pre-order
///
/// An empty result means nothing matched; traversal has no error channel.
pub fn traverse<M: Matcher>(root: &Value, mut matcher: M) -> Vec<Match> {
    Traverser::default().run(root, &mut matcher).into_matches()
}

/// Elapsed time in microseconds, saturating at `u64::MAX`
fn whole_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// State of one traversal
struct Walk<'a, M: ?Sized> {
    matcher: &'a mut M,
    config: &'a TraversalConfig,
    matches: Vec<Match>,
    stats: TraversalStats,
}

impl<M: Matcher + ?Sized> Walk<'_, M> {
    /// Visit a node, then its children. `Break` aborts the whole walk.
    fn walk(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> ControlFlow<()> {
        self.stats.nodes_visited += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(path.depth());

        let visit = self.matcher.visit(path, value, step);
        self.record(visit.matches)?;

        match visit.flow {
            Flow::Continue => {}
            Flow::Skip => {
                tracing::trace!(path = %path, "matcher pruned subtree");
                return ControlFlow::Continue(());
            }
            Flow::Stop => {
                tracing::trace!(path = %path, "matcher stopped traversal");
                return ControlFlow::Break(());
            }
        }

        if self.config.max_depth.is_some_and(|max| path.depth() >= max) {
            return ControlFlow::Continue(());
        }

        match value {
            Value::Object(map) => {
                for (key, child) in map.iter() {
                    let child_path = path.key(key);
                    self.walk(&child_path, child, child_path.last())?;
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    let child_path = path.index(index);
                    self.walk(&child_path, child, child_path.last())?;
                }
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
        }

        ControlFlow::Continue(())
    }

    /// Append matches, honoring the configured limit
    fn record(&mut self, found: Vec<Match>) -> ControlFlow<()> {
        let Some(limit) = self.config.match_limit else {
            self.matches.extend(found);
            return ControlFlow::Continue(());
        };

        let room = limit.saturating_sub(self.matches.len());
        self.matches.extend(found.into_iter().take(room));
        if self.matches.len() >= limit {
            tracing::trace!(limit, "match limit reached");
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
