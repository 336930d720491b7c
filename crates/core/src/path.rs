//! Path model
//!
//! A [`Path`] addresses a node from the root of a value tree as an ordered
//! sequence of [`PathStep`]s. Paths are values: extending one produces a new
//! path and leaves its parent untouched, so a path handed out in a match never
//! changes afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single step from a container into one of its children
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    /// Descend into an object by key
    Key(String),

    /// Descend into an array by position
    Index(usize),
}

impl PathStep {
    /// Create a map-key step
    pub fn key(key: impl Into<String>) -> Self {
        PathStep::Key(key.into())
    }

    /// Create an array-index step
    pub fn index(index: usize) -> Self {
        PathStep::Index(index)
    }

    /// The key, if this is a map-key step
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathStep::Key(key) => Some(key.as_str()),
            PathStep::Index(_) => None,
        }
    }

    /// The index, if this is an array-index step
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Key(_) => None,
            PathStep::Index(index) => Some(*index),
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, PathStep::Key(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => {
                f.write_str("['")?;
                for ch in key.chars() {
                    match ch {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                f.write_str("']")
            }
            PathStep::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

/// Ordered sequence of steps from the root to a node (empty for the root)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The empty path, addressing the root itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from a list of steps
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// Return a new path with `step` appended; `self` is unchanged
    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }

    /// Return a new path extended by a map-key step
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(PathStep::Key(key.into()))
    }

    /// Return a new path extended by an array-index step
    pub fn index(&self, index: usize) -> Self {
        self.child(PathStep::Index(index))
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Depth of the addressed node (0 = root)
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// The step that produced the addressed node (`None` for the root)
    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// The path of the parent node (`None` for the root)
    pub fn parent(&self) -> Option<Path> {
        self.steps
            .split_last()
            .map(|(_, rest)| Path::new(rest.to_vec()))
    }

    pub fn into_steps(self) -> Vec<PathStep> {
        self.steps
    }
}

impl fmt::Display for Path {
    /// Normalized path form, e.g. `$['store'][0]['name']`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = serde_json::Error;

    /// Parse a path written as a JSON array of steps, e.g. `["store", 0]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
