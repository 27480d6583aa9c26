use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use camgrid_common::{FrameError, Snapshot};
use leptos::prelude::*;

use crate::error::FeedError;

/// Shared cell holding the most recent snapshot of every camera.
///
/// There is one writer, the feed adapter, and any number of readers.
/// Only the last value is kept. Readers follow it through
/// [`FrameStore::subscribe`], which hands back a reactive signal and keeps a
/// count of live subscriptions.
///
/// The store is `Clone`; clones share the same cell.
#[derive(Clone)]
pub struct FrameStore {
    latest: RwSignal<Option<Snapshot>>,
    subscribers: Arc<AtomicUsize>,
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStore {
    pub fn new() -> Self {
        Self {
            latest: RwSignal::new(None),
            subscribers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the current snapshot.
    ///
    /// Returns `false` and notifies nobody when `snapshot` equals what is
    /// already stored.
    pub fn publish(&self, snapshot: Option<Snapshot>) -> bool {
        if self.latest.with_untracked(|current| *current == snapshot) {
            return false;
        }

        log::debug!(
            "[FrameStore] publishing snapshot: {}",
            match &snapshot {
                Some(s) => format!("{} sources, {} with frames", s.len(), s.present().count()),
                None => "absent".to_string(),
            }
        );

        self.latest.set(snapshot);
        true
    }

    /// Forget the current snapshot. The grid collapses to its controls.
    pub fn clear(&self) -> bool {
        self.publish(None)
    }

    /// Publish the result of decoding one feed message.
    ///
    /// A message that could not be decoded leaves the store absent, never
    /// holding on to a stale snapshot, and the error is handed back to the
    /// caller.
    pub fn ingest(&self, decoded: Result<Option<Snapshot>, FrameError>) -> Result<bool, FeedError> {
        match decoded {
            Ok(snapshot) => Ok(self.publish(snapshot)),
            Err(err) => {
                log::warn!("[FrameStore] dropping undecodable snapshot: {err}");
                self.clear();
                Err(FeedError::Decode(err))
            }
        }
    }

    /// Latest snapshot, read without tracking.
    pub fn latest(&self) -> Option<Snapshot> {
        self.latest.get_untracked()
    }

    /// Reactive view of the latest snapshot.
    pub fn snapshot(&self) -> Signal<Option<Snapshot>> {
        self.latest.into()
    }

    /// Register a reader. Dropping the returned handle unregisters it.
    pub fn subscribe(&self) -> FrameSubscription {
        let count = self.subscribers.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("[FrameStore] subscribed, {count} active");

        FrameSubscription {
            snapshot: self.snapshot(),
            subscribers: self.subscribers.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::SeqCst)
    }
}

/// A live read handle on a [`FrameStore`].
pub struct FrameSubscription {
    snapshot: Signal<Option<Snapshot>>,
    subscribers: Arc<AtomicUsize>,
}

impl FrameSubscription {
    pub fn snapshot(&self) -> Signal<Option<Snapshot>> {
        self.snapshot
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        let previous = self.subscribers.fetch_sub(1, Ordering::SeqCst);
        log::debug!("[FrameStore] unsubscribed, {} active", previous.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, &str)]) -> Snapshot {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_starts_absent() {
        let owner = Owner::new();
        owner.with(|| {
            let store = FrameStore::new();
            assert_eq!(store.latest(), None);
            assert_eq!(store.subscriber_count(), 0);
        });
    }

    #[test]
    fn test_last_value_wins() {
        let owner = Owner::new();
        owner.with(|| {
            let store = FrameStore::new();

            assert!(store.publish(Some(snapshot(&[("cam1", "a")]))));
            assert!(store.publish(Some(snapshot(&[("cam2", "b")]))));

            let latest = store.latest().unwrap();
            assert!(!latest.contains("cam1"));
            assert!(latest.contains("cam2"));
        });
    }

    #[test]
    fn test_identical_publish_is_ignored() {
        let owner = Owner::new();
        owner.with(|| {
            let store = FrameStore::new();

            assert!(store.publish(Some(snapshot(&[("cam1", "a")]))));
            assert!(!store.publish(Some(snapshot(&[("cam1", "a")]))));
            assert!(store.clear());
            assert!(!store.clear());
        });
    }

    #[test]
    fn test_signal_sees_updates() {
        let owner = Owner::new();
        owner.with(|| {
            let store = FrameStore::new();
            let signal = store.snapshot();

            store.publish(Some(snapshot(&[("cam1", "a")])));
            assert_eq!(signal.get_untracked().map(|s| s.len()), Some(1));

            store.clear();
            assert_eq!(signal.get_untracked(), None);
        });
    }

    #[test]
    fn test_subscriptions_are_counted() {
        let owner = Owner::new();
        owner.with(|| {
            let store = FrameStore::new();

            let first = store.subscribe();
            let second = store.clone().subscribe();
            assert_eq!(store.subscriber_count(), 2);

            drop(first);
            assert_eq!(store.subscriber_count(), 1);

            store.publish(Some(snapshot(&[("cam1", "a")])));
            assert!(second.snapshot().get_untracked().is_some());

            drop(second);
            assert_eq!(store.subscriber_count(), 0);
        });
    }

    #[test]
    fn test_ingest_error_resets_to_absent() {
        let owner = Owner::new();
        owner.with(|| {
            let store = FrameStore::new();
            store.publish(Some(snapshot(&[("cam1", "a")])));

            let err = store
                .ingest(Err(FrameError::NotAMapping("expected a map".into())))
                .unwrap_err();

            assert!(matches!(err, FeedError::Decode(FrameError::NotAMapping(_))));
            assert_eq!(store.latest(), None);
        });
    }

    #[test]
    fn test_ingest_publishes_decoded_snapshot() {
        let owner = Owner::new();
        owner.with(|| {
            let store = FrameStore::new();

            let changed = store.ingest(Ok(Some(snapshot(&[("cam1", "a")])))).unwrap();

            assert!(changed);
            assert!(store.latest().unwrap().contains("cam1"));
        });
    }
}
