//! Notification primitives: sinks that receive human-readable messages and a
//! per-topic subscription registry that delivers to them in order.

pub mod sink;
pub mod subscriptions;

pub use sink::{LogSink, MemorySink, NotificationSink};
pub use subscriptions::{DeliveryReport, SharedSink, Subscriptions};
