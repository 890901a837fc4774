use parking_lot::Mutex;

/// Receiver of notification messages.
///
/// Implementations run inline on the publisher's thread, so they should
/// return quickly. An error only affects this sink's delivery.
pub trait NotificationSink: Send + Sync {
    fn receive(&self, message: &str) -> anyhow::Result<()>;
}

impl<F> NotificationSink for F
where
    F: Fn(&str) -> anyhow::Result<()> + Send + Sync,
{
    fn receive(&self, message: &str) -> anyhow::Result<()> {
        self(message)
    }
}

/// Sink that turns every message into a tracing event for a named recipient.
#[derive(Debug, Clone)]
pub struct LogSink {
    recipient: String,
}

impl LogSink {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

impl NotificationSink for LogSink {
    fn receive(&self, message: &str) -> anyhow::Result<()> {
        tracing::info!(
            target: "shelf-events",
            recipient = %self.recipient,
            %message,
            "notification delivered"
        );
        Ok(())
    }
}

/// Sink that keeps every message it receives, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl NotificationSink for MemorySink {
    fn receive(&self, message: &str) -> anyhow::Result<()> {
        self.messages.lock().push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.receive("first").unwrap();
        sink.receive("second").unwrap();

        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn closures_are_sinks() {
        let sink = |message: &str| -> anyhow::Result<()> {
            anyhow::ensure!(!message.is_empty(), "empty message");
            Ok(())
        };

        assert!(sink.receive("hello").is_ok());
        assert!(sink.receive("").is_err());
    }

    #[test]
    fn log_sink_never_fails() {
        let sink = LogSink::new("Anna");
        assert_eq!(sink.recipient(), "Anna");
        assert!(sink.receive("The book 'Dune' is now available!").is_ok());
    }
}
