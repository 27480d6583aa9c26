use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// Sizing of the camera grid.
///
/// The grid is a wrapping flex row. Every tile gets `1 / columns` of the
/// container width minus its own horizontal margins, so with the defaults two
/// tiles share a row:
///
/// ```text
/// width: calc(50% - 20px); margin: 10px;
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GridLayout {
    /// Tiles per row.
    pub columns: u32,
    /// Outer margin on every side of a tile, in CSS pixels.
    pub tile_margin_px: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 2,
            tile_margin_px: 10,
        }
    }
}

/// Largest accepted tile margin, in CSS pixels.
pub const MAX_TILE_MARGIN_PX: u32 = 1000;

impl GridLayout {
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.columns == 0 {
            return Err(FeedError::InvalidConfig {
                field: "layout.columns",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.tile_margin_px > MAX_TILE_MARGIN_PX {
            return Err(FeedError::InvalidConfig {
                field: "layout.tile_margin_px",
                reason: format!("must be at most {MAX_TILE_MARGIN_PX}, got {}", self.tile_margin_px),
            });
        }
        Ok(())
    }

    /// Page container: full viewport height, controls stacked above the grid.
    pub fn page_style(&self) -> &'static str {
        "display: flex; flex-direction: column; height: 100vh; box-sizing: border-box;"
    }

    /// Grid region below the controls.
    pub fn grid_style(&self) -> &'static str {
        "display: flex; flex-direction: row; flex-wrap: wrap; \
         justify-content: center; align-items: center; \
         flex: 1 1 auto; min-height: 0;"
    }

    /// Tile box. Also used for layouts that never went through
    /// [`validate`](Self::validate), so the arithmetic saturates.
    pub fn tile_style(&self) -> String {
        format!(
            "width: calc({} - {}px); margin: {}px; box-sizing: border-box;",
            self.column_share(),
            self.tile_margin_px.saturating_mul(2),
            self.tile_margin_px
        )
    }

    /// Scale to the tile width, keep the aspect ratio, never overflow the tile.
    pub fn image_style(&self) -> &'static str {
        "display: block; width: 100%; height: auto; max-height: 100%; object-fit: contain;"
    }

    fn column_share(&self) -> String {
        let columns = self.columns.max(1);
        if 100 % columns == 0 {
            format!("{}%", 100 / columns)
        } else {
            format!("100% / {columns}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_two_per_row() {
        let layout = GridLayout::default();
        assert_eq!(layout.tile_style(), "width: calc(50% - 20px); margin: 10px; box-sizing: border-box;");
    }

    #[test]
    fn test_uneven_columns_use_division() {
        let layout = GridLayout {
            columns: 3,
            tile_margin_px: 4,
        };
        assert!(layout.tile_style().starts_with("width: calc(100% / 3 - 8px); margin: 4px;"));
    }

    #[test]
    fn test_single_column() {
        let layout = GridLayout {
            columns: 1,
            tile_margin_px: 0,
        };
        assert!(layout.tile_style().starts_with("width: calc(100% - 0px);"));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let layout = GridLayout {
            columns: 0,
            tile_margin_px: 10,
        };
        assert!(matches!(
            layout.validate(),
            Err(FeedError::InvalidConfig { field: "layout.columns", .. })
        ));
    }

    #[test]
    fn test_oversized_margin_rejected() {
        let layout = GridLayout {
            columns: 2,
            tile_margin_px: MAX_TILE_MARGIN_PX + 1,
        };
        assert!(matches!(
            layout.validate(),
            Err(FeedError::InvalidConfig { field: "layout.tile_margin_px", .. })
        ));

        let largest = GridLayout {
            columns: 2,
            tile_margin_px: MAX_TILE_MARGIN_PX,
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_unvalidated_max_margin_renders() {
        let layout = GridLayout {
            columns: 2,
            tile_margin_px: u32::MAX,
        };
        assert_eq!(
            layout.tile_style(),
            format!("width: calc(50% - {}px); margin: {}px; box-sizing: border-box;", u32::MAX, u32::MAX)
        );
    }

    #[test]
    fn test_grid_wraps_and_centers() {
        let style = GridLayout::default().grid_style();
        assert!(style.contains("flex-wrap: wrap"));
        assert!(style.contains("justify-content: center"));
        assert!(style.contains("align-items: center"));
    }

    #[test]
    fn test_image_is_contained() {
        let style = GridLayout::default().image_style();
        assert!(style.contains("width: 100%"));
        assert!(style.contains("max-height: 100%"));
        assert!(style.contains("object-fit: contain"));
    }
}
