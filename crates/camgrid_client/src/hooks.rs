use camgrid_common::Snapshot;
use leptos::prelude::*;

use crate::context::{FeedConnection, FeedContext};
use crate::store::FrameStore;

/// Hook to get the shared [`FrameStore`].
///
/// # Panics
///
/// Panics if called outside of a `FrameFeedProvider` or `FrameStoreProvider`.
pub fn use_frame_store() -> FrameStore {
    expect_context::<FrameStore>()
}

/// Hook to follow the latest snapshot.
///
/// Subscribes to the store when the calling component mounts and
/// unsubscribes when it unmounts.
///
/// # Panics
///
/// Panics if called outside of a `FrameFeedProvider` or `FrameStoreProvider`.
///
/// # Example
///
/// ```rust,ignore
/// use camgrid_client::use_frame_snapshot;
///
/// #[component]
/// fn LiveCount() -> impl IntoView {
///     let snapshot = use_frame_snapshot();
///     let live = move || snapshot.with(|s| s.as_ref().map_or(0, |s| s.present().count()));
///
///     view! { <span>{live} " cameras live"</span> }
/// }
/// ```
pub fn use_frame_snapshot() -> Signal<Option<Snapshot>> {
    let subscription = use_frame_store().subscribe();
    let snapshot = subscription.snapshot();
    on_cleanup(move || drop(subscription));
    snapshot
}

/// Hook to get the feed context.
///
/// # Panics
///
/// Panics if called outside of a `FrameFeedProvider`.
pub fn use_feed_context() -> FeedContext {
    expect_context::<FeedContext>()
}

/// Hook to get the feed connection control interface.
///
/// # Panics
///
/// Panics if called outside of a `FrameFeedProvider`.
pub fn use_feed_connection() -> FeedConnection {
    use_feed_context().connection()
}
