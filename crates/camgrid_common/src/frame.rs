use std::borrow::Borrow;
use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix that turns a base64 JPEG payload into something an `<img src>` accepts.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Stable name of one camera source.
///
/// Source ids are unique within a snapshot and double as the reconciliation
/// key of the grid, so the same camera keeps its tile across updates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Latest encoded still frame of one source.
///
/// The payload is base64 JPEG text exactly as it arrived on the wire. It is
/// never decoded here; an empty payload means the source currently has no
/// frame to show.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct FrameBlob(String);

impl FrameBlob {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    /// A blob standing for "no frame".
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The payload as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `data:image/jpeg;base64,<payload>`, or `None` when there is no frame.
    ///
    /// The payload is concatenated verbatim, it is not re-encoded or trimmed.
    pub fn data_uri(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut uri = String::with_capacity(JPEG_DATA_URI_PREFIX.len() + self.0.len());
        uri.push_str(JPEG_DATA_URI_PREFIX);
        uri.push_str(&self.0);
        Some(uri)
    }
}

// Payloads can be hundreds of kilobytes, keep them out of debug output.
impl fmt::Debug for FrameBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBlob")
            .field("payload_len", &self.0.len())
            .finish()
    }
}

impl From<&str> for FrameBlob {
    fn from(payload: &str) -> Self {
        Self(payload.to_string())
    }
}

impl From<String> for FrameBlob {
    fn from(payload: String) -> Self {
        Self(payload)
    }
}

impl From<Option<String>> for FrameBlob {
    fn from(payload: Option<String>) -> Self {
        payload.map(Self).unwrap_or_default()
    }
}

impl Serialize for FrameBlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Any value that is not a string reads as an empty frame.
impl<'de> Deserialize<'de> for FrameBlob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FrameBlobVisitor)
    }
}

struct FrameBlobVisitor;

impl<'de> Visitor<'de> for FrameBlobVisitor {
    type Value = FrameBlob;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a base64 frame payload, an empty string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FrameBlob, E> {
        Ok(FrameBlob::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FrameBlob, E> {
        Ok(FrameBlob(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<FrameBlob, E> {
        Ok(FrameBlob::empty())
    }

    fn visit_unit<E: de::Error>(self) -> Result<FrameBlob, E> {
        Ok(FrameBlob::empty())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<FrameBlob, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<FrameBlob, E> {
        Ok(FrameBlob::empty())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<FrameBlob, E> {
        Ok(FrameBlob::empty())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<FrameBlob, E> {
        Ok(FrameBlob::empty())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<FrameBlob, E> {
        Ok(FrameBlob::empty())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FrameBlob, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(FrameBlob::empty())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FrameBlob, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(FrameBlob::empty())
    }
}
