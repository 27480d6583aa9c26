//! Keyed reconciliation of tiles across render passes.
//!
//! Each pass hands the freshly projected tiles to [`KeyedTiles::reconcile`].
//! Sources that were already on screen keep their handle and are patched in
//! place, new sources get a new handle, and handles of sources that
//! disappeared are dropped.

use std::collections::HashMap;
use std::fmt;

use camgrid_common::SourceId;

use crate::grid::Tile;

/// Identity of one mounted tile.
///
/// A source keeps its `TileId` for as long as it stays in the snapshot. Once
/// it drops out and comes back it is a different tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u64);

impl TileId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug)]
pub struct Reconciled<H> {
    /// Handles in display order.
    pub handles: Vec<H>,
    pub added: Vec<SourceId>,
    /// Sorted by source id.
    pub removed: Vec<SourceId>,
    pub retained: Vec<SourceId>,
    /// Retained tiles changed their relative order.
    pub reordered: bool,
}

impl<H> Reconciled<H> {
    /// No tile was created or torn down.
    pub fn is_stable(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// The displayed sequence of tiles differs from the previous pass.
    ///
    /// When this is false every handle was patched in place and the mounted
    /// list can stay as it is.
    pub fn changes_layout(&self) -> bool {
        !self.is_stable() || self.reordered
    }
}

/// Stable `SourceId -> handle` map kept between render passes.
#[derive(Debug)]
pub struct KeyedTiles<H> {
    handles: HashMap<SourceId, H>,
    /// Display order of the previous pass.
    order: Vec<SourceId>,
    next_id: u64,
}

impl<H> Default for KeyedTiles<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
        }
    }
}

impl<H: Clone> KeyedTiles<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `tiles` against the handles of the previous pass.
    ///
    /// `create` builds a handle for a source seen for the first time, `update`
    /// patches a retained handle with the tile's current frame. A source that
    /// appears twice in `tiles` is only drawn once.
    pub fn reconcile<C, U>(&mut self, tiles: &[Tile], mut create: C, mut update: U) -> Reconciled<H>
    where
        C: FnMut(TileId, &Tile) -> H,
        U: FnMut(&mut H, &Tile),
    {
        let mut next = HashMap::with_capacity(tiles.len());
        let mut handles = Vec::with_capacity(tiles.len());
        let mut order = Vec::with_capacity(tiles.len());
        let mut added = Vec::new();
        let mut retained = Vec::new();

        for tile in tiles {
            if next.contains_key(&tile.source) {
                continue;
            }

            let handle = match self.handles.remove(&tile.source) {
                Some(mut handle) => {
                    update(&mut handle, tile);
                    retained.push(tile.source.clone());
                    handle
                }
                None => {
                    let id = TileId(self.next_id);
                    self.next_id += 1;
                    added.push(tile.source.clone());
                    create(id, tile)
                }
            };

            handles.push(handle.clone());
            order.push(tile.source.clone());
            next.insert(tile.source.clone(), handle);
        }

        let mut removed: Vec<SourceId> = self.handles.drain().map(|(source, _)| source).collect();
        removed.sort();

        // Previous sources still present are exactly the retained ones.
        let reordered = !self
            .order
            .iter()
            .filter(|source| next.contains_key(*source))
            .eq(retained.iter());

        self.handles = next;
        self.order = order;

        Reconciled {
            handles,
            added,
            removed,
            retained,
            reordered,
        }
    }

    pub fn get(&self, source: &str) -> Option<&H> {
        self.handles.get(source)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
