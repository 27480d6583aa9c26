use camgrid_common::FrameError;
use thiserror::Error;

/// Errors that can occur while feeding the camera grid.
///
/// None of these ever reach the grid itself. They are recorded on the
/// [`FeedContext`](crate::FeedContext) so a host page can show them if it
/// wants to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// A feed message could not be read as a snapshot.
    ///
    /// The store is reset to "no snapshot" when this happens.
    #[error("invalid snapshot message: {0}")]
    Decode(#[from] FrameError),

    /// WebSocket error occurred.
    #[error("WebSocket error: {message}")]
    WebSocket {
        /// Error message from the WebSocket layer
        message: String,
    },

    /// A configuration value is out of range or malformed.
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}
