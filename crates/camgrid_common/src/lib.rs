//! # camgrid common
//!
//! Data model for a live multi-camera feed: named sources, their latest
//! encoded still frame, and the keyed snapshot that carries all of them in one
//! message.
//!
//! The payloads are treated as opaque base64 text. Nothing in this crate
//! decodes or validates image data; a frame is only ever turned into a
//! `data:` URI for the browser to display.
//!
//! ## Example
//!
//! ```rust
//! use camgrid_common::codec::decode_snapshot;
//!
//! let snapshot = decode_snapshot(r#"{"cam1": "/9j/4AAQ", "cam2": ""}"#)
//!     .unwrap()
//!     .unwrap_or_default();
//!
//! let live: Vec<&str> = snapshot.present().map(|(id, _)| id.as_str()).collect();
//! assert_eq!(live, vec!["cam1"]);
//! ```

pub mod codec;
pub mod error;
pub mod frame;
pub mod snapshot;

pub use error::FrameError;
pub use frame::{FrameBlob, SourceId, JPEG_DATA_URI_PREFIX};
pub use snapshot::Snapshot;
