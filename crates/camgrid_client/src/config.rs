use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::grid::TileOrder;
use crate::layout::GridLayout;

/// Default feed endpoint.
pub const DEFAULT_FEED_URL: &str = "ws://127.0.0.1:8765/frames";

/// Settings for the frame feed and the grid that shows it.
///
/// Every field has a default, so a host can provide as little as
/// `{"url": "wss://cams.example/frames"}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct FeedConfig {
    /// WebSocket endpoint that pushes snapshot messages.
    pub url: String,
    /// Connect on mount instead of waiting for the connect button.
    pub auto_connect: bool,
    pub order: TileOrder,
    /// Caption every tile with its source id.
    pub show_labels: bool,
    pub layout: GridLayout,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            auto_connect: false,
            order: TileOrder::default(),
            show_labels: false,
            layout: GridLayout::default(),
        }
    }
}

impl FeedConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        let config: FeedConfig = serde_json::from_str(json).map_err(|e| FeedError::InvalidConfig {
            field: "config",
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FeedError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(FeedError::InvalidConfig {
                field: "url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(FeedError::InvalidConfig {
                field: "url",
                reason: format!("expected a ws:// or wss:// URL, got '{url}'"),
            });
        }
        self.layout.validate()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_auto_connect(mut self, auto_connect: bool) -> Self {
        self.auto_connect = auto_connect;
        self
    }

    pub fn with_order(mut self, order: TileOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }
}
