use std::sync::Arc;

use camgrid_common::codec::{UndecodedCodec, decode_snapshot, decode_snapshot_bytes};
use leptos::prelude::*;
use leptos_use::core::ConnectionReadyState;
use leptos_use::{
    DummyEncoder, ReconnectLimit, UseWebSocketError, UseWebSocketOptions, UseWebSocketReturn,
    use_websocket_with_options,
};

use crate::config::FeedConfig;
use crate::context::FeedContext;
use crate::error::FeedError;
use crate::store::FrameStore;

/// Provider component that connects to the frame feed and provides the
/// [`FrameStore`] and [`FeedContext`].
///
/// Every message on the socket is one complete snapshot and replaces the
/// previous one. A message that cannot be decoded resets the store to "no
/// snapshot" and is recorded in [`FeedContext::last_error`]. Closing the
/// socket keeps the last snapshot on screen, and the socket is never reopened
/// without the connect button.
///
/// A config that fails [`FeedConfig::validate`] is reported on
/// [`FeedContext::last_error`] and no socket is opened.
///
/// # Example
///
/// ```rust,ignore
/// use camgrid_client::{CameraGrid, FeedConfig, FrameFeedProvider};
///
/// #[component]
/// pub fn App() -> impl IntoView {
///     let config = FeedConfig::default().with_url("ws://127.0.0.1:8765/frames");
///
///     view! {
///         <FrameFeedProvider config=config>
///             <CameraGrid/>
///         </FrameFeedProvider>
///     }
/// }
/// ```
#[component]
pub fn FrameFeedProvider(
    /// Feed endpoint and grid settings (default: [`FeedConfig::default`])
    #[prop(optional)]
    config: Option<FeedConfig>,
    /// Child components
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();

    // Created first so a rejected config is visible on the context.
    let last_error = RwSignal::new(None::<FeedError>);

    let store = FrameStore::new();
    provide_context(store.clone());

    let ctx = match SocketPlan::for_config(&config) {
        Ok(plan) => connect_feed(store, config, plan, last_error),
        Err(e) => offline_context(store, config, last_error, e),
    };
    provide_context(ctx);

    children()
}

/// Socket settings derived from a [`FeedConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SocketPlan {
    /// Open the socket on mount.
    pub immediate: bool,
    pub reconnect_limit: ReconnectLimit,
}

impl SocketPlan {
    /// The feed never reconnects by itself; reconnecting is the host's call.
    pub const RECONNECT_LIMIT: ReconnectLimit = ReconnectLimit::Limited(0);

    pub fn for_config(config: &FeedConfig) -> Result<Self, FeedError> {
        config.validate()?;
        Ok(Self {
            immediate: config.auto_connect,
            reconnect_limit: Self::RECONNECT_LIMIT,
        })
    }
}

fn connect_feed(
    store: FrameStore,
    config: FeedConfig,
    plan: SocketPlan,
    last_error: RwSignal<Option<FeedError>>,
) -> FeedContext {
    let text_store = store.clone();
    let bytes_store = store.clone();

    let UseWebSocketReturn {
        ready_state,
        open,
        close,
        ..
    } = use_websocket_with_options::<(), (), UndecodedCodec, (), DummyEncoder>(
        &config.url,
        UseWebSocketOptions::default()
            .immediate(plan.immediate)
            .reconnect_limit(plan.reconnect_limit)
            .on_open(move |_| {
                log::info!("[FrameFeedProvider] feed connected");
            })
            .on_close(move |_| {
                log::info!("[FrameFeedProvider] feed disconnected");
            })
            .on_error(move |e| {
                // Binary messages are rejected by the text-only socket codec
                // after on_message_raw_bytes has already decoded them.
                if matches!(e, UseWebSocketError::Codec(_)) {
                    return;
                }
                log::warn!("[FrameFeedProvider] WebSocket error: {:?}", e);
                last_error.set(Some(FeedError::WebSocket {
                    message: format!("{:?}", e),
                }));
            })
            .on_message_raw(move |text: &str| {
                if let Err(e) = text_store.ingest(decode_snapshot(text)) {
                    last_error.set(Some(e));
                }
            })
            .on_message_raw_bytes(Arc::new(move |data: &[u8]| {
                if let Err(e) = bytes_store.ingest(decode_snapshot_bytes(data)) {
                    last_error.set(Some(e));
                }
            })),
    );

    FeedContext::new(
        store,
        config,
        ready_state,
        last_error.into(),
        Arc::new(move || open()),
        Arc::new(move || close()),
    )
}

/// Context for a config that was rejected: no socket is created, the error
/// stays on `last_error` and the connect button cannot open anything.
fn offline_context(
    store: FrameStore,
    config: FeedConfig,
    last_error: RwSignal<Option<FeedError>>,
    error: FeedError,
) -> FeedContext {
    log::warn!("[FrameFeedProvider] not connecting: {error}");
    last_error.set(Some(error.clone()));

    FeedContext::new(
        store,
        config,
        Signal::stored(ConnectionReadyState::Closed),
        last_error.into(),
        Arc::new(move || {
            log::warn!("[FrameFeedProvider] cannot connect: {error}");
        }),
        Arc::new(|| {}),
    )
}

/// Provides a bare [`FrameStore`] for hosts that fill it themselves.
///
/// The connect button renders disabled under this provider since there is no
/// feed connection to control.
#[component]
pub fn FrameStoreProvider(
    /// Store to share with the children
    store: FrameStore,
    /// Child components
    children: Children,
) -> impl IntoView {
    provide_context(store);
    children()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridLayout;

    #[test]
    fn test_plan_never_reconnects() {
        let plan = SocketPlan::for_config(&FeedConfig::default()).unwrap();
        assert_eq!(plan.reconnect_limit, ReconnectLimit::Limited(0));
        assert!(plan.reconnect_limit.is_exceeded_by(0));
        assert!(!plan.immediate);

        let plan = SocketPlan::for_config(&FeedConfig::default().with_auto_connect(true)).unwrap();
        assert!(plan.immediate);
        assert_eq!(plan.reconnect_limit, SocketPlan::RECONNECT_LIMIT);
    }

    #[test]
    fn test_plan_rejects_invalid_config() {
        let err = SocketPlan::for_config(&FeedConfig::default().with_url("http://cams.example")).unwrap_err();
        assert!(matches!(err, FeedError::InvalidConfig { field: "url", .. }));

        let layout = GridLayout {
            columns: 0,
            tile_margin_px: 10,
        };
        let err = SocketPlan::for_config(&FeedConfig::default().with_layout(layout)).unwrap_err();
        assert!(matches!(err, FeedError::InvalidConfig { field: "layout.columns", .. }));
    }

    #[test]
    fn test_rejected_config_is_reported_on_context() {
        let owner = Owner::new();
        owner.with(|| {
            let config = FeedConfig::default().with_url("").with_auto_connect(true);
            let err = SocketPlan::for_config(&config).unwrap_err();

            let last_error = RwSignal::new(None::<FeedError>);
            let ctx = offline_context(FrameStore::new(), config, last_error, err);

            assert!(matches!(
                ctx.last_error.get_untracked(),
                Some(FeedError::InvalidConfig { field: "url", .. })
            ));

            let connection = ctx.connection();
            connection.toggle();
            assert_eq!(connection.ready_state.get_untracked(), ConnectionReadyState::Closed);
            assert!(!connection.is_open());
            assert!(ctx.last_error.get_untracked().is_some());
        });
    }
}
