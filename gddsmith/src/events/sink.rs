//! Progress sink trait and implementations.

use crate::core::ProgressEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

/// Receives the progress events of one run, in order.
///
/// Emission never fails from the pipeline's point of view. A sink whose
/// consumer went away drops the event and the run carries on.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Delivers one event.
    async fn emit(&self, event: ProgressEvent);
}

/// Forwards events into a bounded channel, typically drained by an HTTP
/// response body.
#[derive(Debug, Clone)]
pub struct ChannelProgressSink {
    tx: mpsc::Sender<ProgressEvent>,
}

impl ChannelProgressSink {
    /// Wraps the sending half of a channel.
    #[must_use]
    pub fn new(tx: mpsc::Sender<ProgressEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink and its receiving half.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl ProgressSink for ChannelProgressSink {
    async fn emit(&self, event: ProgressEvent) {
        if let Err(err) = self.tx.send(event).await {
            debug!(
                step = err.0.step().unwrap_or("result"),
                "Progress receiver closed, dropping event"
            );
        }
    }
}

/// A collecting sink for tests.
#[derive(Debug, Default)]
pub struct CollectingProgressSink {
    events: parking_lot::RwLock<Vec<ProgressEvent>>,
}

impl CollectingProgressSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Step names of the collected progress events, in order.
    #[must_use]
    pub fn steps(&self) -> Vec<String> {
        self.events
            .read()
            .iter()
            .filter_map(|e| e.step().map(str::to_string))
            .collect()
    }

    /// Progress events whose step starts with the given prefix.
    #[must_use]
    pub fn events_of_step(&self, prefix: &str) -> Vec<ProgressEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.step().is_some_and(|s| s.starts_with(prefix)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProgressSink for CollectingProgressSink {
    async fn emit(&self, event: ProgressEvent) {
        self.events.write().push(event);
    }
}
