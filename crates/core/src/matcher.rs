//! Matcher protocol
//!
//! A [`Matcher`] is consulted once for every node of a traversal. It sees the
//! path to the node, the node's value and the step that produced it (`None`
//! only at the root), and answers with a [`Visit`]: zero or more matches plus
//! a [`Flow`] signal telling the engine how to proceed.
//!
//! Matchers compose through [`MatcherExt`]:
//!
//! ```rust
//! use json_lens_core::{match_key, traverse, MatcherExt, Value};
//!
//! let value = Value::object([
//!     ("id", Value::number(1)),
//!     ("child", Value::object([("id", Value::number(2))])),
//! ]);
//!
//! let matches = traverse(&value, match_key("id").limit(1));
//! assert_eq!(matches.len(), 1);
//! ```

use crate::models::Match;
use crate::path::{Path, PathStep};
use crate::value::Value;
use regex::Regex;

/// How traversal proceeds after a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep walking, including this node's children
    #[default]
    Continue,

    /// Do not descend below this node, but keep walking elsewhere
    Skip,

    /// Abandon the whole traversal now
    Stop,
}

impl Flow {
    /// Signal for two matchers consulted side by side.
    ///
    /// Either one stopping stops; pruning needs both to agree.
    pub fn either(self, other: Flow) -> Flow {
        match (self, other) {
            (Flow::Stop, _) | (_, Flow::Stop) => Flow::Stop,
            (Flow::Skip, Flow::Skip) => Flow::Skip,
            _ => Flow::Continue,
        }
    }
}

/// Answer of a matcher for a single node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visit {
    /// Matches to record, in order
    pub matches: Vec<Match>,

    /// What the engine should do next
    pub flow: Flow,
}

impl Visit {
    /// No matches, keep going
    pub fn none() -> Self {
        Self::default()
    }

    /// A single match, keep going
    pub fn matched(m: Match) -> Self {
        Self {
            matches: vec![m],
            flow: Flow::Continue,
        }
    }

    /// No matches, stop the traversal
    pub fn stop() -> Self {
        Self {
            matches: Vec::new(),
            flow: Flow::Stop,
        }
    }

    /// No matches, prune below this node
    pub fn skip() -> Self {
        Self {
            matches: Vec::new(),
            flow: Flow::Skip,
        }
    }

    /// Replace the flow signal (builder pattern)
    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flow = flow;
        self
    }

    pub fn is_stop(&self) -> bool {
        self.flow == Flow::Stop
    }
}

/// Trait for node matchers driven by the traversal engine
pub trait Matcher {
    /// Inspect one node and decide what to record and how to proceed
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit;

    /// Short description used in logs and result metadata
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

impl<M: Matcher + ?Sized> Matcher for &mut M {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        (**self).visit(path, value, step)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        (**self).visit(path, value, step)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Matcher backed by a closure, see [`from_fn`]
pub struct FnMatcher<F> {
    f: F,
}

impl<F> Matcher for FnMatcher<F>
where
    F: FnMut(&Path, &Value, Option<&PathStep>) -> Visit,
{
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        (self.f)(path, value, step)
    }
}

/// Build a matcher from a closure
///
/// The closure may keep its own state; the engine calls it exactly once per
/// node, in traversal order.
pub fn from_fn<F>(f: F) -> FnMatcher<F>
where
    F: FnMut(&Path, &Value, Option<&PathStep>) -> Visit,
{
    FnMatcher { f }
}

/// Matches nodes reached through a map-key step equal to a given key
#[derive(Debug, Clone)]
pub struct MatchKey {
    key: String,
}

impl Matcher for MatchKey {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        match step.and_then(PathStep::as_key) {
            Some(key) if key == self.key => Visit::matched(Match::new(path, value)),
            _ => Visit::none(),
        }
    }

    fn describe(&self) -> String {
        format!("key({:?})", self.key)
    }
}

pub fn match_key(key: impl Into<String>) -> MatchKey {
    MatchKey { key: key.into() }
}

/// Matches every node reached through any map-key step
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAllKeys;

impl Matcher for MatchAllKeys {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        match step {
            Some(PathStep::Key(_)) => Visit::matched(Match::new(path, value)),
            _ => Visit::none(),
        }
    }

    fn describe(&self) -> String {
        "all-keys".to_string()
    }
}

pub fn match_all_keys() -> MatchAllKeys {
    MatchAllKeys
}

/// Matches the first node reached through a map-key step, then stops
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchFirstKey;

impl Matcher for MatchFirstKey {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        match step {
            Some(PathStep::Key(_)) => {
                tracing::trace!(path = %path, "first key found");
                Visit::matched(Match::new(path, value)).with_flow(Flow::Stop)
            }
            _ => Visit::none(),
        }
    }

    fn describe(&self) -> String {
        "first-key".to_string()
    }
}

pub fn match_first_key() -> MatchFirstKey {
    MatchFirstKey
}

/// Matches nodes reached through a given array index
#[derive(Debug, Clone, Copy)]
pub struct MatchIndex {
    index: usize,
}

impl Matcher for MatchIndex {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        match step.and_then(PathStep::as_index) {
            Some(index) if index == self.index => Visit::matched(Match::new(path, value)),
            _ => Visit::none(),
        }
    }

    fn describe(&self) -> String {
        format!("index({})", self.index)
    }
}

pub fn match_index(index: usize) -> MatchIndex {
    MatchIndex { index }
}

/// Matches nodes reached through a map-key step whose key matches a regex
#[derive(Debug, Clone)]
pub struct MatchKeyPattern {
    pattern: Regex,
}

impl Matcher for MatchKeyPattern {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        match step.and_then(PathStep::as_key) {
            Some(key) if self.pattern.is_match(key) => Visit::matched(Match::new(path, value)),
            _ => Visit::none(),
        }
    }

    fn describe(&self) -> String {
        format!("key-pattern(/{}/)", self.pattern.as_str())
    }
}

pub fn match_key_pattern(pattern: Regex) -> MatchKeyPattern {
    MatchKeyPattern { pattern }
}

/// Matches nodes accepted by a predicate; never stops
pub struct MatchWhere<F> {
    predicate: F,
}

impl<F> Matcher for MatchWhere<F>
where
    F: FnMut(&Path, &Value, Option<&PathStep>) -> bool,
{
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        if (self.predicate)(path, value, step) {
            Visit::matched(Match::new(path, value))
        } else {
            Visit::none()
        }
    }

    fn describe(&self) -> String {
        "where".to_string()
    }
}

pub fn match_where<F>(predicate: F) -> MatchWhere<F>
where
    F: FnMut(&Path, &Value, Option<&PathStep>) -> bool,
{
    MatchWhere { predicate }
}

/// Runs two matchers on every node, see [`MatcherExt::or`]
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A: Matcher, B: Matcher> Matcher for Or<A, B> {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        let mut visit = self.first.visit(path, value, step);
        let other = self.second.visit(path, value, step);
        visit.matches.extend(other.matches);
        visit.flow = visit.flow.either(other.flow);
        visit
    }

    fn describe(&self) -> String {
        format!("{} | {}", self.first.describe(), self.second.describe())
    }
}

/// Caps the number of matches, see [`MatcherExt::limit`]
#[derive(Debug, Clone)]
pub struct Limit<M> {
    inner: M,
    limit: usize,
    remaining: usize,
}

impl<M: Matcher> Matcher for Limit<M> {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        if self.remaining == 0 {
            return Visit::stop();
        }

        let mut visit = self.inner.visit(path, value, step);
        visit.matches.truncate(self.remaining);
        self.remaining -= visit.matches.len();
        if self.remaining == 0 {
            visit.flow = Flow::Stop;
        }
        visit
    }

    fn describe(&self) -> String {
        format!("limit({}, {})", self.limit, self.inner.describe())
    }
}

/// Prunes the walk below a depth, see [`MatcherExt::max_depth`]
#[derive(Debug, Clone)]
pub struct MaxDepth<M> {
    inner: M,
    depth: usize,
}

impl<M: Matcher> Matcher for MaxDepth<M> {
    fn visit(&mut self, path: &Path, value: &Value, step: Option<&PathStep>) -> Visit {
        if path.depth() > self.depth {
            return Visit::skip();
        }

        let visit = self.inner.visit(path, value, step);
        if path.depth() == self.depth && visit.flow == Flow::Continue {
            return visit.with_flow(Flow::Skip);
        }
        visit
    }

    fn describe(&self) -> String {
        format!("max-depth({}, {})", self.depth, self.inner.describe())
    }
}

/// Combinators available on every matcher
pub trait MatcherExt: Matcher + Sized {
    /// Consult `self` then `other` at every node and keep both sets of matches
    fn or<B: Matcher>(self, other: B) -> Or<Self, B> {
        Or {
            first: self,
            second: other,
        }
    }

    /// Forward at most `n` matches, then stop the traversal
    fn limit(self, n: usize) -> Limit<Self> {
        Limit {
            inner: self,
            limit: n,
            remaining: n,
        }
    }

    /// Only consult `self` down to `depth`; nothing below it is visited
    fn max_depth(self, depth: usize) -> MaxDepth<Self> {
        MaxDepth { inner: self, depth }
    }
}

impl<M: Matcher> MatcherExt for M {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> PathStep {
        PathStep::key(k)
    }

    #[test]
    fn test_match_key_only_on_equal_key_step() {
        let mut m = match_key("a");
        let path = Path::root().key("a");
        let value = Value::number(1);

        let hit = m.visit(&path, &value, Some(&key("a")));
        assert_eq!(hit.matches, vec![Match::new(&path, &value)]);
        assert_eq!(hit.flow, Flow::Continue);

        assert!(m.visit(&path, &value, Some(&key("b"))).matches.is_empty());
        assert!(m.visit(&path, &value, Some(&PathStep::index(0))).matches.is_empty());
        assert!(m.visit(&Path::root(), &value, None).matches.is_empty());
    }

    #[test]
    fn test_match_all_keys_ignores_indices_and_root() {
        let mut m = match_all_keys();
        let value = Value::null();
        assert_eq!(m.visit(&Path::root().key("x"), &value, Some(&key("x"))).matches.len(), 1);
        assert!(m.visit(&Path::root().index(0), &value, Some(&PathStep::index(0))).matches.is_empty());
        assert!(m.visit(&Path::root(), &value, None).matches.is_empty());
    }

    #[test]
    fn test_match_first_key_stops() {
        let mut m = match_first_key();
        let value = Value::null();
        let miss = m.visit(&Path::root(), &value, None);
        assert_eq!(miss, Visit::none());

        let hit = m.visit(&Path::root().key("x"), &value, Some(&key("x")));
        assert_eq!(hit.matches.len(), 1);
        assert!(hit.is_stop());
    }

    #[test]
    fn test_match_index() {
        let mut m = match_index(2);
        let value = Value::bool(false);
        assert_eq!(
            m.visit(&Path::root().index(2), &value, Some(&PathStep::index(2))).matches.len(),
            1
        );
        assert!(m.visit(&Path::root().key("2"), &value, Some(&key("2"))).matches.is_empty());
    }

    #[test]
    fn test_match_key_pattern() {
        let mut m = match_key_pattern(Regex::new("^user_").unwrap());
        let value = Value::null();
        assert_eq!(
            m.visit(&Path::root().key("user_id"), &value, Some(&key("user_id"))).matches.len(),
            1
        );
        assert!(m.visit(&Path::root().key("id"), &value, Some(&key("id"))).matches.is_empty());
        assert_eq!(m.describe(), "key-pattern(/^user_/)");
    }

    #[test]
    fn test_match_where() {
        let mut m = match_where(|_path: &Path, value: &Value, _step: Option<&PathStep>| {
            value.as_i64().is_some()
        });
        let path = Path::root().key("n");

        let hit = m.visit(&path, &Value::number(3), Some(&key("n")));
        assert_eq!(hit.matches, vec![Match::new(&path, &Value::number(3))]);
        assert_eq!(hit.flow, Flow::Continue);

        let miss = m.visit(&path, &Value::string("3"), Some(&key("n")));
        assert!(miss.matches.is_empty());
        assert_eq!(miss.flow, Flow::Continue);

        let root = m.visit(&Path::root(), &Value::number(0), None);
        assert_eq!(root.matches.len(), 1);
        assert_eq!(root.flow, Flow::Continue);
        assert_eq!(m.describe(), "where");
    }

    #[test]
    fn test_limit_truncates_and_stops() {
        let mut m = from_fn(|path: &Path, value: &Value, _step: Option<&PathStep>| Visit {
            matches: vec![Match::new(path, value); 3],
            flow: Flow::Continue,
        })
        .limit(2);

        let visit = m.visit(&Path::root(), &Value::null(), None);
        assert_eq!(visit.matches.len(), 2);
        assert!(visit.is_stop());
        assert_eq!(m.visit(&Path::root(), &Value::null(), None), Visit::stop());
    }

    #[test]
    fn test_or_concatenates_and_merges_flow() {
        let mut m = match_key("a").or(match_first_key());
        let path = Path::root().key("a");
        let value = Value::number(7);
        let visit = m.visit(&path, &value, Some(&key("a")));
        assert_eq!(visit.matches.len(), 2);
        assert!(visit.is_stop());
        assert_eq!(m.describe(), "key(\"a\") | first-key");
    }

    #[test]
    fn test_flow_either() {
        assert_eq!(Flow::Skip.either(Flow::Skip), Flow::Skip);
        assert_eq!(Flow::Skip.either(Flow::Continue), Flow::Continue);
        assert_eq!(Flow::Continue.either(Flow::Stop), Flow::Stop);
    }

    #[test]
    fn test_max_depth_prunes_at_boundary() {
        let mut m = match_all_keys().max_depth(1);
        let value = Value::null();
        let at_boundary = m.visit(&Path::root().key("a"), &value, Some(&key("a")));
        assert_eq!(at_boundary.matches.len(), 1);
        assert_eq!(at_boundary.flow, Flow::Skip);

        let below = m.visit(&Path::root().key("a").key("b"), &value, Some(&key("b")));
        assert_eq!(below, Visit::skip());
    }
}
