use codee::{Decoder, Encoder};

use crate::error::FrameError;

/// Socket codec that leaves every message undecoded.
///
/// The frame feed is receive-only and each message is parsed exactly once, by
/// [`decode_snapshot`](super::decode_snapshot) or
/// [`decode_snapshot_bytes`](super::decode_snapshot_bytes) in the socket's raw
/// message callbacks. Plugging this codec into the socket keeps it from
/// parsing the JSON a second time and from holding its own copy of the
/// payloads.
///
/// ## Usage
///
/// ```rust,ignore
/// use camgrid_common::codec::UndecodedCodec;
///
/// let ws = use_websocket_with_options::<(), (), UndecodedCodec, (), DummyEncoder>(
///     "ws://127.0.0.1:8765/frames",
///     UseWebSocketOptions::default().on_message_raw(|text: &str| { /* decode here */ }),
/// );
/// ```
pub struct UndecodedCodec;

impl Encoder<()> for UndecodedCodec {
    type Error = FrameError;
    type Encoded = String;

    fn encode(_: &()) -> Result<Self::Encoded, Self::Error> {
        Ok(String::new())
    }
}

impl Decoder<()> for UndecodedCodec {
    type Error = FrameError;
    type Encoded = str;

    fn decode(_: &Self::Encoded) -> Result<(), Self::Error> {
        Ok(())
    }
}
