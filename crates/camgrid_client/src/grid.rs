//! Snapshot to tile projection.

use camgrid_common::{Snapshot, SourceId};
use serde::{Deserialize, Serialize};

/// One cell of the grid for the current render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub source: SourceId,
    /// `data:image/jpeg;base64,<payload>`
    pub image_src: String,
}

/// Display order of tiles.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TileOrder {
    /// Order of the keys in the latest snapshot message.
    #[default]
    Arrival,
    /// Sorted by source id, independent of how the feed orders its keys.
    SourceIdAscending,
}

/// Project a snapshot into the tiles to draw.
///
/// Exactly one tile per source whose frame is non-empty. An absent snapshot,
/// an empty one, and one where every frame is empty all give no tiles.
pub fn project_tiles(snapshot: Option<&Snapshot>, order: TileOrder) -> Vec<Tile> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };

    let mut tiles: Vec<Tile> = snapshot
        .present()
        .filter_map(|(source, frame)| {
            Some(Tile {
                source: source.clone(),
                image_src: frame.data_uri()?,
            })
        })
        .collect();

    if order == TileOrder::SourceIdAscending {
        tiles.sort_by(|a, b| a.source.cmp(&b.source));
    }

    tiles
}
