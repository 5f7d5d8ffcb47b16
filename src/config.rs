//! Zoom configuration.
//!
//! `ZoomConfig` controls the defaults and limits a
//! [`ZoomContextManager`](crate::context::ZoomContextManager) applies when
//! creating browsing contexts: the zoom level a fresh registry starts from
//! and how many contexts may exist at once.
//!
//! `ZoomConfig` provides sensible defaults via [`Default`] and a fluent
//! [`ZoomConfig::builder()`] for customization with validation.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use hostzoom::config::ZoomConfig;
//! let cfg = ZoomConfig::default();
//! assert_eq!(cfg.default_zoom_level, 0.0);
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use hostzoom::config::ZoomConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ZoomConfig::builder()
//!     .default_zoom_level(1.0)
//!     .max_contexts(8)
//!     .build()?; // returns Result<ZoomConfig, ZoomConfigError>
//! # Ok(()) }
//! ```

use std::fmt;

#[derive(Debug, Clone)]
pub struct ZoomConfig {
    /// Zoom level newly created registries start from and fall back to.
    pub default_zoom_level: f64,
    /// Maximum number of browsing contexts a manager will hold.
    pub max_contexts: usize,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            default_zoom_level: 0.0,
            max_contexts: 64,
        }
    }
}

impl ZoomConfig {
    pub fn builder() -> ZoomConfigBuilder {
        ZoomConfigBuilder::default()
    }
}

/// Builder for [`ZoomConfig`].
#[derive(Debug, Clone)]
pub struct ZoomConfigBuilder {
    inner: ZoomConfig,
}

impl Default for ZoomConfigBuilder {
    fn default() -> Self {
        Self { inner: ZoomConfig::default() }
    }
}

impl ZoomConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut ZoomConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn default_zoom_level(self, level: f64) -> Self { self.map(|c| c.default_zoom_level = level) }
    pub fn max_contexts(self, n: usize) -> Self { self.map(|c| c.max_contexts = n) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut ZoomConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<ZoomConfig, ZoomConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone)]
pub enum ZoomConfigError {
    NonFiniteDefaultLevel(f64),
    ZeroContexts,
}

impl fmt::Display for ZoomConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomConfigError::NonFiniteDefaultLevel(l) =>
                write!(f, "default_zoom_level {l} is not a finite number"),
            ZoomConfigError::ZeroContexts =>
                write!(f, "max_contexts must be at least 1"),
        }
    }
}
impl std::error::Error for ZoomConfigError {}

fn validate(c: &ZoomConfig) -> Result<(), ZoomConfigError> {
    if !c.default_zoom_level.is_finite() {
        return Err(ZoomConfigError::NonFiniteDefaultLevel(c.default_zoom_level));
    }
    if c.max_contexts == 0 {
        return Err(ZoomConfigError::ZeroContexts);
    }
    Ok(())
}
