//! Configuration module for the traversal engine
//!
//! This module provides the limits a [`Traverser`](crate::Traverser) applies
//! on top of whatever the matcher decides.

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Configuration for a traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Deepest level to descend to (None = unlimited, 0 = root only)
    pub max_depth: Option<usize>,

    /// Stop once this many matches are collected (None = unlimited)
    pub match_limit: Option<usize>,
}

impl TraversalConfig {
    /// Create an unlimited config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum descent depth (builder pattern)
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set match limit (builder pattern)
    pub fn with_match_limit(mut self, limit: usize) -> Self {
        self.match_limit = Some(limit);
        self
    }

    /// Check the configuration for values that can never be satisfied
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.match_limit == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "match limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TraversalConfig::new().with_max_depth(3).with_match_limit(10);

        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.match_limit, Some(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = TraversalConfig::new().with_match_limit(0).validate().unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_default_is_unlimited() {
        let config = TraversalConfig::default();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.match_limit, None);
    }
}
