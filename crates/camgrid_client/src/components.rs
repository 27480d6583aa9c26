//! Ready-to-use components for the camera grid.

use camgrid_common::SourceId;
use leptos::prelude::*;

use crate::config::FeedConfig;
use crate::context::{FeedContext, connect_label, connection_status};
use crate::grid::{Tile, TileOrder, project_tiles};
use crate::hooks::use_frame_snapshot;
use crate::layout::GridLayout;
use crate::reconcile::{KeyedTiles, TileId};

/// Handle of a mounted tile.
///
/// The image source is its own signal, so a new frame for a source that is
/// already on screen patches the `<img>` without rebuilding the tile.
#[derive(Clone)]
pub struct TileView {
    pub id: TileId,
    pub source: SourceId,
    pub image_src: ArcRwSignal<String>,
}

impl TileView {
    fn new(id: TileId, tile: &Tile) -> Self {
        Self {
            id,
            source: tile.source.clone(),
            image_src: ArcRwSignal::new(tile.image_src.clone()),
        }
    }

    fn refresh(&mut self, tile: &Tile) {
        if self.image_src.with_untracked(|current| *current != tile.image_src) {
            self.image_src.set(tile.image_src.clone());
        }
    }
}

/// Live camera grid.
///
/// Renders the connect button, then one tile per camera that currently has a
/// frame. With no snapshot, or no camera with a frame, only the button is
/// shown.
///
/// Settings not given as props come from the [`FeedContext`] config when
/// there is one, and from [`FeedConfig::default`] otherwise.
///
/// # Panics
///
/// Panics if used outside of a `FrameFeedProvider` or `FrameStoreProvider`.
#[component]
pub fn CameraGrid(
    /// Tile order
    #[prop(optional)]
    order: Option<TileOrder>,
    /// Grid sizing
    #[prop(optional)]
    layout: Option<GridLayout>,
    /// Caption every tile with its source id
    #[prop(optional)]
    show_labels: Option<bool>,
) -> impl IntoView {
    let defaults = use_context::<FeedContext>()
        .map(|ctx| ctx.config)
        .unwrap_or_else(FeedConfig::default);
    let order = order.unwrap_or(defaults.order);
    let layout = layout.unwrap_or(defaults.layout);
    let show_labels = show_labels.unwrap_or(defaults.show_labels);

    let snapshot = use_frame_snapshot();
    let keyed: StoredValue<KeyedTiles<TileView>> = StoredValue::new(KeyedTiles::new());
    let tiles = RwSignal::new(Vec::<TileView>::new());

    // Snapshot -> tiles -> keyed handles. Retained handles are patched inside
    // reconcile; the list itself is only replaced when membership or order
    // changes.
    Effect::new(move |_| {
        let projected = snapshot.with(|s| project_tiles(s.as_ref(), order));

        let Some(reconciled) =
            keyed.try_update_value(|keyed| keyed.reconcile(&projected, TileView::new, TileView::refresh))
        else {
            return;
        };

        if !reconciled.is_stable() {
            log::debug!(
                "[CameraGrid] tiles added: {:?}, removed: {:?}",
                reconciled.added,
                reconciled.removed
            );
        }

        if reconciled.changes_layout() {
            tiles.set(reconciled.handles);
        }
    });

    view! {
        <div class="camgrid" style=layout.page_style()>
            <ConnectButton/>
            <Show when=move || tiles.with(|tiles| !tiles.is_empty())>
                <div class="camgrid-grid" style=layout.grid_style()>
                    // TileId is minted once per source lifetime, so keying on it
                    // keys on the source while telling a re-added source apart.
                    <For
                        each=move || tiles.get()
                        key=|tile| tile.id
                        children=move |tile| {
                            view! { <FrameTile tile=tile layout=layout show_label=show_labels/> }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}

/// A single camera frame, scaled to fit its tile.
#[component]
pub fn FrameTile(
    /// Mounted tile handle
    tile: TileView,
    /// Grid sizing
    layout: GridLayout,
    /// Caption the tile with its source id
    #[prop(optional)]
    show_label: bool,
) -> impl IntoView {
    let TileView { source, image_src, .. } = tile;
    let name = source.to_string();
    let alt = name.clone();
    let caption = show_label.then(|| view! { <span class="camgrid-tile-label">{name.clone()}</span> });

    view! {
        <div class="camgrid-tile" style=layout.tile_style() data-source=name>
            <img src=move || image_src.get() alt=alt style=layout.image_style()/>
            {caption}
        </div>
    }
}

/// Connect/disconnect control with a status readout.
///
/// Always rendered. Without a [`FeedContext`] there is nothing to connect, so
/// the button is disabled.
#[component]
pub fn ConnectButton() -> impl IntoView {
    let Some(connection) = use_context::<FeedContext>().map(|ctx| ctx.connection()) else {
        return view! {
            <div class="camgrid-controls">
                <button class="camgrid-connect" disabled=true>"Connect"</button>
            </div>
        }
        .into_any();
    };

    let ready_state = connection.ready_state;
    let on_click = move |_| connection.toggle();

    view! {
        <div class="camgrid-controls">
            <button class="camgrid-connect" on:click=on_click>
                {move || connect_label(ready_state.get())}
            </button>
            <span class="camgrid-status">{move || connection_status(ready_state.get())}</span>
        </div>
    }
    .into_any()
}
