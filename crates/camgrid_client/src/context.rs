use std::sync::Arc;

use leptos::prelude::*;
use leptos_use::core::ConnectionReadyState;

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::store::FrameStore;

/// Connection control interface exposed to components.
///
/// This is all the connect button knows about the feed.
#[derive(Clone)]
pub struct FeedConnection {
    /// Current connection state
    pub ready_state: Signal<ConnectionReadyState>,
    /// Open the WebSocket connection
    pub open: Arc<dyn Fn() + Send + Sync>,
    /// Close the WebSocket connection
    pub close: Arc<dyn Fn() + Send + Sync>,
}

impl FeedConnection {
    pub fn is_open(&self) -> bool {
        self.ready_state.get_untracked() == ConnectionReadyState::Open
    }

    /// Close a live or pending connection, open otherwise.
    pub fn toggle(&self) {
        match self.ready_state.get_untracked() {
            ConnectionReadyState::Open | ConnectionReadyState::Connecting => (self.close)(),
            ConnectionReadyState::Closing | ConnectionReadyState::Closed => (self.open)(),
        }
    }
}

/// Button caption for a connection state.
pub fn connect_label(state: ConnectionReadyState) -> &'static str {
    match state {
        ConnectionReadyState::Open | ConnectionReadyState::Connecting => "Disconnect",
        ConnectionReadyState::Closing | ConnectionReadyState::Closed => "Connect",
    }
}

/// Status text shown next to the connect button.
pub fn connection_status(state: ConnectionReadyState) -> &'static str {
    match state {
        ConnectionReadyState::Connecting => "Connecting...",
        ConnectionReadyState::Open => "Connected",
        ConnectionReadyState::Closing => "Closing...",
        ConnectionReadyState::Closed => "Disconnected",
    }
}

/// Context provided by [`FrameFeedProvider`](crate::FrameFeedProvider).
#[derive(Clone)]
pub struct FeedContext {
    pub store: FrameStore,
    pub config: FeedConfig,
    /// Current connection state
    pub ready_state: Signal<ConnectionReadyState>,
    /// Last error that occurred
    pub last_error: Signal<Option<FeedError>>,
    open: Arc<dyn Fn() + Send + Sync>,
    close: Arc<dyn Fn() + Send + Sync>,
}

impl FeedContext {
    /// Create a new FeedContext.
    ///
    /// This is typically called by `FrameFeedProvider`, not by user code.
    pub fn new(
        store: FrameStore,
        config: FeedConfig,
        ready_state: Signal<ConnectionReadyState>,
        last_error: Signal<Option<FeedError>>,
        open: Arc<dyn Fn() + Send + Sync>,
        close: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        Self {
            store,
            config,
            ready_state,
            last_error,
            open,
            close,
        }
    }

    /// Get connection control interface.
    pub fn connection(&self) -> FeedConnection {
        FeedConnection {
            ready_state: self.ready_state,
            open: self.open.clone(),
            close: self.close.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn connection(state: ConnectionReadyState, opens: Arc<AtomicUsize>, closes: Arc<AtomicUsize>) -> FeedConnection {
        FeedConnection {
            ready_state: Signal::stored(state),
            open: Arc::new(move || {
                opens.fetch_add(1, Ordering::SeqCst);
            }),
            close: Arc::new(move || {
                closes.fetch_add(1, Ordering::SeqCst);
            }),
        }
    }

    #[test]
    fn test_toggle_opens_when_closed() {
        let owner = Owner::new();
        owner.with(|| {
            let opens = Arc::new(AtomicUsize::new(0));
            let closes = Arc::new(AtomicUsize::new(0));
            let conn = connection(ConnectionReadyState::Closed, opens.clone(), closes.clone());

            conn.toggle();

            assert_eq!(opens.load(Ordering::SeqCst), 1);
            assert_eq!(closes.load(Ordering::SeqCst), 0);
            assert!(!conn.is_open());
        });
    }

    #[test]
    fn test_toggle_closes_when_open() {
        let owner = Owner::new();
        owner.with(|| {
            let opens = Arc::new(AtomicUsize::new(0));
            let closes = Arc::new(AtomicUsize::new(0));
            let conn = connection(ConnectionReadyState::Open, opens.clone(), closes.clone());

            conn.toggle();

            assert_eq!(opens.load(Ordering::SeqCst), 0);
            assert_eq!(closes.load(Ordering::SeqCst), 1);
            assert!(conn.is_open());
        });
    }

    #[test]
    fn test_labels() {
        assert_eq!(connect_label(ConnectionReadyState::Closed), "Connect");
        assert_eq!(connect_label(ConnectionReadyState::Open), "Disconnect");
        assert_eq!(connection_status(ConnectionReadyState::Connecting), "Connecting...");
        assert_eq!(connection_status(ConnectionReadyState::Closed), "Disconnected");
    }
}
