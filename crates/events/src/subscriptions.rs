use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::sink::NotificationSink;

/// Sink handle shared between the registry and whoever registered it.
pub type SharedSink = Arc<dyn NotificationSink>;

/// Outcome of publishing one message to a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

impl DeliveryReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Ordered sinks per topic.
///
/// Sinks are never de-duplicated: registering the same sink twice delivers
/// every message to it twice.
#[derive(Default)]
pub struct Subscriptions {
    topics: HashMap<String, Vec<SharedSink>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sink` to the topic's list, creating the list on first use.
    pub fn subscribe(&mut self, topic: impl Into<String>, sink: SharedSink) {
        let topic = topic.into();
        let sinks = self.topics.entry(topic.clone()).or_default();
        sinks.push(sink);

        tracing::debug!(
            target: "shelf-events",
            %topic,
            subscribers = sinks.len(),
            "sink subscribed"
        );
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }

    /// Deliver `message` to every sink of `topic` in registration order.
    ///
    /// Each delivery is isolated: an error or panic from one sink is logged
    /// and counted, and the remaining sinks are still called.
    pub fn publish(&self, topic: &str, message: &str) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let Some(sinks) = self.topics.get(topic) else {
            return report;
        };

        for (position, sink) in sinks.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| sink.receive(message))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(err)) => {
                    report.failed += 1;
                    tracing::warn!(
                        target: "shelf-events",
                        %topic,
                        position,
                        error = %err,
                        "sink rejected notification"
                    );
                }
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(
                        target: "shelf-events",
                        %topic,
                        position,
                        "sink panicked during notification"
                    );
                }
            }
        }

        report
    }
}

impl fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .topics
            .iter()
            .map(|(topic, sinks)| (topic.as_str(), sinks.len()))
            .collect();
        f.debug_struct("Subscriptions")
            .field("topics", &counts)
            .finish()
    }
}
