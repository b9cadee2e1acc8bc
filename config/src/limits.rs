//! Validated tunables for the AST generator.

use thiserror::Error;

use crate::constants::MAX_RECURSION_DEPTH;

/// Bounds applied while walking a CST.
///
/// # Examples
/// ```
/// use config::limits::GeneratorLimits;
/// use config::constants::MAX_RECURSION_DEPTH;
///
/// let limits = GeneratorLimits::default();
/// assert_eq!(limits.max_depth, MAX_RECURSION_DEPTH);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorLimits {
    /// Deepest statement or expression nesting accepted before the
    /// generator reports the input as too deeply nested.
    pub max_depth: usize,
}

impl GeneratorLimits {
    /// Builds limits, rejecting a zero depth.
    ///
    /// # Examples
    /// ```
    /// use config::limits::{ConfigError, GeneratorLimits};
    ///
    /// assert!(GeneratorLimits::new(16).is_ok());
    /// assert_eq!(GeneratorLimits::new(0), Err(ConfigError::InvalidDepth(0)));
    /// ```
    pub fn new(max_depth: usize) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::InvalidDepth(max_depth));
        }
        Ok(Self { max_depth })
    }
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_RECURSION_DEPTH,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Raised when the nesting limit would reject every statement.
    #[error("max_depth must be at least 1: {0}")]
    InvalidDepth(usize),
}
