//! Error types for the fan-out core.

use thiserror::Error;

/// Result type alias for forwarder operations.
pub type ForwardResult<T> = Result<T, ForwardError>;

/// Errors surfaced by the forwarder and its publication seam.
///
/// No variant is fatal to the forwarder: publish failures are logged and the
/// cycle continues, and thread-spawn failures abort construction only.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The transport rejected or lost a message.
    #[error("publish failed on channel '{channel}': {reason}")]
    PublishFailed {
        channel: &'static str,
        reason: String,
    },

    /// A publisher thread could not be spawned at construction.
    #[error("failed to spawn publisher thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),
}
