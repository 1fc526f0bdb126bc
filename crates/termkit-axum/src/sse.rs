//! SSE event broadcaster for hub events.
//!
//! Events are sent through a broadcast channel and streamed to every
//! connected client.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::Stream;
use termkit_core::HubEvent;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

#[derive(Debug, Clone)]
pub struct SseBroadcaster {
    sender: broadcast::Sender<HubEvent>,
}

impl SseBroadcaster {
    /// Create a broadcaster buffering up to `capacity` events.
    ///
    /// Slow clients may miss events if the buffer overflows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Broadcaster with the default capacity (256 events).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(256)
    }

    /// Send an event to all current subscribers.
    pub fn emit(&self, event: HubEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    /// Create an SSE stream for a new client connection.
    ///
    /// Includes a keep-alive ping every 30 seconds to prevent proxy timeouts.
    pub fn subscribe(
        self: Arc<Self>,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
        let receiver = self.sender.subscribe();
        let stream = BroadcastStream::new(receiver).filter_map(|result| match result {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => Some(Ok(Event::default().data(json))),
                Err(e) => {
                    tracing::warn!("Failed to serialize hub event: {}", e);
                    None
                }
            },
            Err(e) => {
                // Lagged receivers skip ahead
                tracing::debug!("SSE stream error: {}", e);
                None
            }
        });

        Sse::new(stream).keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(30))
                .text("ping"),
        )
    }

    /// Number of connected clients.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[cfg(test)]
    fn raw_subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_subscribers() {
        let sse = SseBroadcaster::with_defaults();
        let mut rx = sse.raw_subscribe();
        assert_eq!(sse.subscriber_count(), 1);

        sse.emit(HubEvent::FileDeleted {
            name: "a.txt".to_string(),
        });
        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            HubEvent::FileDeleted {
                name: "a.txt".to_string()
            }
        );
    }

    #[test]
    fn test_emit_without_subscribers_is_noop() {
        let sse = SseBroadcaster::new(4);
        sse.emit(HubEvent::FileDeleted {
            name: "a.txt".to_string(),
        });
        assert_eq!(sse.subscriber_count(), 0);
    }
}
