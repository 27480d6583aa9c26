//! # camgrid client
//!
//! Reactive camera grid for live frame feeds, built on Leptos.
//!
//! A feed pushes complete snapshots (`source id -> base64 JPEG`) over a
//! WebSocket. [`FrameFeedProvider`] keeps the latest one in a shared
//! [`FrameStore`]; [`CameraGrid`] projects it into a wrapping grid with one
//! tile per camera that currently has a frame.
//!
//! ## Features
//!
//! - **Keyed tiles**: a camera keeps its tile across updates, only its image
//!   source is patched
//! - **Empty frames hidden**: missing or empty frames produce no tile
//! - **Responsive layout**: two tiles per row by default, images contained in
//!   their tile
//! - **Lifecycle management**: subscribe to the store on mount, unsubscribe on
//!   unmount
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leptos::prelude::*;
//! use camgrid_client::{CameraGrid, FeedConfig, FrameFeedProvider};
//!
//! #[component]
//! fn App() -> impl IntoView {
//!     let config = FeedConfig::default().with_url("ws://127.0.0.1:8765/frames");
//!
//!     view! {
//!         <FrameFeedProvider config=config>
//!             <CameraGrid/>
//!         </FrameFeedProvider>
//!     }
//! }
//! ```
//!
//! ## Feeding the store yourself
//!
//! ```rust,ignore
//! use camgrid_client::{CameraGrid, FrameStore, FrameStoreProvider};
//!
//! #[component]
//! fn Replay(store: FrameStore) -> impl IntoView {
//!     view! {
//!         <FrameStoreProvider store=store>
//!             <CameraGrid/>
//!         </FrameStoreProvider>
//!     }
//! }
//! ```

// Module declarations
mod components;
mod config;
mod context;
mod error;
mod grid;
mod hooks;
mod layout;
mod provider;
mod reconcile;
mod store;

// Re-exports
pub use components::{CameraGrid, ConnectButton, FrameTile, TileView};
pub use config::{DEFAULT_FEED_URL, FeedConfig};
pub use context::{FeedConnection, FeedContext, connect_label, connection_status};
pub use error::FeedError;
pub use grid::{Tile, TileOrder, project_tiles};
pub use hooks::{use_feed_connection, use_feed_context, use_frame_snapshot, use_frame_store};
pub use layout::{GridLayout, MAX_TILE_MARGIN_PX};
pub use provider::{FrameFeedProvider, FrameStoreProvider};
pub use reconcile::{KeyedTiles, Reconciled, TileId};
pub use store::{FrameStore, FrameSubscription};

// Re-export the data model for convenience
pub use camgrid_common::{FrameBlob, FrameError, Snapshot, SourceId};

// Re-export ConnectionReadyState for convenience
pub use leptos_use::core::ConnectionReadyState;
