use std::fmt;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Sink for failures that a search could not recover from
///
/// Implementations must not panic; the caller is a worker thread with nobody
/// left to handle it.
pub trait FailureReporter: Send + Sync {
    fn report_failure(&self, summary: &str, detail: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub summary: String,
    pub detail: String,
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.detail)
    }
}

/// Forwards failures to whoever owns the receiving end (the UI loop or a CLI command)
pub struct ChannelReporter {
    sender: Sender<FailureReport>,
}

impl ChannelReporter {
    pub fn new() -> (Self, Receiver<FailureReport>) {
        let (sender, receiver) = channel();
        (Self { sender }, receiver)
    }
}

impl FailureReporter for ChannelReporter {
    fn report_failure(&self, summary: &str, detail: &str) {
        // Receiver gone means the view was torn down; nothing to tell
        let _ = self
            .sender
            .send(FailureReport { summary: summary.to_string(), detail: detail.to_string() });
    }
}
