//! Error types for field setup and configuration
//!
//! Nothing in the per-tick simulation is fallible. Errors only come from
//! resolving sprite names at setup time and from loading configuration.

use thiserror::Error;

/// Sprite/animation lookup failures during field setup.
///
/// The field never aborts on these: the affected entity is logged and falls
/// back to an inert default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("can not find object [{name}]")]
    MissingObject { name: String },

    #[error("object [{object}] has no animation [{animation}]")]
    MissingAnimation { object: String, animation: String },

    /// Animation exists but has no frames (zero duration)
    #[error("animation [{animation}] of object [{object}] has no frames")]
    EmptyAnimation { object: String, animation: String },
}

/// Configuration loading and validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}
