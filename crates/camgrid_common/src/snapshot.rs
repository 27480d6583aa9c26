use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::frame::{FrameBlob, SourceId};

/// The latest complete keyed set of frames.
///
/// Entries keep the order they arrived in and every [`SourceId`] appears at
/// most once. Inserting an id that is already present replaces its frame in
/// place, so iterating a snapshot never yields duplicates or skips a key.
///
/// On the wire a snapshot is a JSON object:
///
/// ```json
/// { "cam1": "<base64 jpeg>", "cam2": "", "cam3": null }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Snapshot {
    entries: Vec<(SourceId, FrameBlob)>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Set the frame for `id`, returning the frame it replaced.
    pub fn insert(&mut self, id: impl Into<SourceId>, frame: impl Into<FrameBlob>) -> Option<FrameBlob> {
        let id = id.into();
        let frame = frame.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, frame)),
            None => {
                self.entries.push((id, frame));
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<FrameBlob> {
        let index = self.entries.iter().position(|(existing, _)| existing.as_str() == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, id: &str) -> Option<&FrameBlob> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == id)
            .map(|(_, frame)| frame)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of sources, including those without a frame.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, &FrameBlob)> {
        self.entries.iter().map(|(id, frame)| (id, frame))
    }

    pub fn keys(&self) -> impl Iterator<Item = &SourceId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Entries that currently carry a frame, in arrival order.
    pub fn present(&self) -> impl Iterator<Item = (&SourceId, &FrameBlob)> {
        self.iter().filter(|(_, frame)| !frame.is_empty())
    }

    /// True when at least one source has a frame to show.
    pub fn has_frames(&self) -> bool {
        self.present().next().is_some()
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<SourceId>,
    V: Into<FrameBlob>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut snapshot = Snapshot::with_capacity(iter.size_hint().0);
        for (id, frame) in iter {
            snapshot.insert(id, frame);
        }
        snapshot
    }
}

impl IntoIterator for Snapshot {
    type Item = (SourceId, FrameBlob);
    type IntoIter = std::vec::IntoIter<(SourceId, FrameBlob)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, frame) in &self.entries {
            map.serialize_entry(id, frame)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = Snapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of source ids to frame payloads")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Snapshot, A::Error> {
        let mut snapshot = Snapshot::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((id, frame)) = map.next_entry::<SourceId, FrameBlob>()? {
            snapshot.insert(id, frame);
        }
        Ok(snapshot)
    }
}
