use tokio::sync::broadcast;

use crate::registry::event::ZoomChangeEvent;
use crate::registry::map::ZoomLevelRegistry;
use crate::registry::subscription::ZoomSubscription;
use crate::registry::DEFAULT_CHANNEL_CAPACITY;

/// Async consumer side of a registry's change notifications.
///
/// Produced by [`ZoomLevelRegistry::subscribe`]. Events are pushed into a
/// broadcast channel by a listener the stream owns; dropping the stream
/// drops that listener and detaches the bridge. A slow consumer that falls
/// more than [`DEFAULT_CHANNEL_CAPACITY`] events behind loses the oldest
/// events, not the newest.
pub struct ZoomEventStream {
    rx: broadcast::Receiver<ZoomChangeEvent>,
    _guard: ZoomSubscription,
}

impl ZoomEventStream {
    /// Drains one pending event without blocking, `None` when the queue is
    /// empty. Lag is logged and skipped over.
    pub fn try_recv(&mut self) -> Option<ZoomChangeEvent> {
        use broadcast::error::TryRecvError;

        loop {
            match self.rx.try_recv() {
                Ok(ev) => return Some(ev),
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("zoom event stream lagged, skipped {skipped} event(s)");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Waits for the next event. `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<ZoomChangeEvent> {
        use broadcast::error::RecvError;

        loop {
            match self.rx.recv().await {
                Ok(ev) => return Some(ev),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("zoom event stream lagged, skipped {skipped} event(s)");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl ZoomLevelRegistry {
    /// Bridges change notifications into an async broadcast channel.
    ///
    /// Useful for consumers living on a runtime (e.g. the layer pushing
    /// new levels to live renderer views) that want to `await` changes
    /// instead of taking a synchronous callback. Each call creates an
    /// independent stream with its own buffer.
    pub fn subscribe(&self) -> ZoomEventStream {
        let (tx, rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        let guard = self.add_change_listener(move |ev| {
            // send() only fails with zero receivers; dropping the event is
            // fine then, nobody is listening on this bridge anymore.
            let _ = tx.send(ev.clone());
        });
        ZoomEventStream { rx, _guard: guard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::event::ZoomChangeMode;
    use crate::view::ViewKey;

    #[test]
    fn try_recv_drains_in_order() {
        let reg = ZoomLevelRegistry::new(0.0);
        let mut stream = reg.subscribe();

        reg.set_level_for_host("example.com", 1.0);
        reg.set_temporary_level(ViewKey::new(1, 1), 2.0);

        let first = stream.try_recv().unwrap();
        assert_eq!(first.mode, ZoomChangeMode::HostChanged);
        assert_eq!(first.level, 1.0);

        let second = stream.try_recv().unwrap();
        assert_eq!(second.mode, ZoomChangeMode::TemporaryChanged);
        assert_eq!(second.level, 2.0);

        assert!(stream.try_recv().is_none());
    }

    #[test]
    fn dropping_the_stream_detaches_the_bridge() {
        let reg = ZoomLevelRegistry::new(0.0);
        let stream = reg.subscribe();
        drop(stream);

        // no receiver left; the mutation must not panic or block
        reg.set_level_for_host("example.com", 1.0);
        assert_eq!(reg.level_for("", "example.com"), 1.0);
    }

    #[test]
    fn streams_are_independent() {
        let reg = ZoomLevelRegistry::new(0.0);
        let mut a = reg.subscribe();
        let mut b = reg.subscribe();

        reg.set_default_level(0.5);

        assert_eq!(a.try_recv().unwrap().mode, ZoomChangeMode::DefaultChanged);
        assert_eq!(b.try_recv().unwrap().mode, ZoomChangeMode::DefaultChanged);
        assert!(a.try_recv().is_none());
    }

    #[tokio::test]
    async fn recv_wakes_for_a_change_from_another_task() {
        use std::sync::Arc;

        let reg = Arc::new(ZoomLevelRegistry::new(0.0));
        let mut stream = reg.subscribe();

        let writer = {
            let reg = reg.clone();
            tokio::task::spawn_blocking(move || {
                reg.set_level_for_scheme_and_host("https", "example.com", 1.5);
            })
        };

        let ev = stream.recv().await.unwrap();
        assert_eq!(ev.mode, ZoomChangeMode::SchemeHostChanged);
        assert_eq!(ev.host, "example.com");
        assert_eq!(ev.level, 1.5);

        writer.await.unwrap();
    }
}
