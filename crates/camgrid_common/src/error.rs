use thiserror::Error;

/// Errors produced while turning a feed message into a [`Snapshot`](crate::Snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// A binary message did not carry UTF-8 text.
    #[error("snapshot message is not valid UTF-8: {0}")]
    NotUtf8(String),

    /// The message is not well-formed JSON.
    #[error("snapshot message is not valid JSON: {0}")]
    InvalidJson(String),

    /// The message is JSON, but its top level is not an object of frames.
    #[error("snapshot message is not a mapping of source ids to frames: {0}")]
    NotAMapping(String),

    /// A snapshot could not be written out.
    #[error("failed to serialize snapshot: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => FrameError::NotAMapping(err.to_string()),
            Category::Io | Category::Syntax | Category::Eof => FrameError::InvalidJson(err.to_string()),
        }
    }
}
