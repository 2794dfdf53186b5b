//! Event notifier adapters.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, trace};

use crate::domain::event::BlastedEvent;
use crate::domain::ports::EventNotifierPort;

/// Forwards events to an in-process listener over a channel.
#[derive(Debug, Clone)]
pub struct ChannelEventNotifier {
    tx: mpsc::UnboundedSender<BlastedEvent>,
}

impl ChannelEventNotifier {
    /// Creates a notifier and the receiver its listener drains.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BlastedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventNotifierPort for ChannelEventNotifier {
    fn emit(&self, event: &BlastedEvent) {
        if self.tx.send(event.clone()).is_err() {
            trace!(event = event.name(), "No listener subscribed, dropping event");
        }
    }
}

/// Writes events to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventNotifier;

impl EventNotifierPort for TracingEventNotifier {
    fn emit(&self, event: &BlastedEvent) {
        info!(event = event.name(), "{}", event.message());
    }
}

/// Delivers every event to each wrapped notifier in order.
#[derive(Clone, Default)]
pub struct FanoutEventNotifier {
    targets: Vec<Arc<dyn EventNotifierPort>>,
}

impl FanoutEventNotifier {
    /// Creates an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a notifier.
    #[must_use]
    pub fn with(mut self, notifier: Arc<dyn EventNotifierPort>) -> Self {
        self.targets.push(notifier);
        self
    }
}

impl EventNotifierPort for FanoutEventNotifier {
    fn emit(&self, event: &BlastedEvent) {
        for target in &self.targets {
            target.emit(event);
        }
    }
}
