//! Error types for the sandbox.

use thiserror::Error;

/// Workspace-wide error type.
///
/// Gameplay failures (nothing under the crosshair, empty inventory, placing
/// inside the player) are not errors; they surface as outcome values from the
/// interaction engine. This type covers setup and strict lookups.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is out of its accepted range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A handle or position no longer refers to a live block
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
