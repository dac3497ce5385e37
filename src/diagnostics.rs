//! User-facing warnings, shown one at a time until acknowledged.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub raised_at: DateTime<Local>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.raised_at.format("%H:%M:%S"), self.message)
    }
}

/// FIFO of pending warnings. The front entry is the one on screen.
#[derive(Debug, Default)]
pub struct Diagnostics {
    queue: VecDeque<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.queue.push_back(Diagnostic {
            message,
            raised_at: Local::now(),
        });
    }

    /// The warning currently displayed, if any.
    pub fn current(&self) -> Option<&Diagnostic> {
        self.queue.front()
    }

    /// Acknowledges the displayed warning and returns the next one.
    pub fn dismiss(&mut self) -> Option<&Diagnostic> {
        self.queue.pop_front();
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_walks_queue_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push("first");
        diagnostics.push("second");

        assert_eq!(diagnostics.current().unwrap().message, "first");
        assert_eq!(diagnostics.dismiss().unwrap().message, "second");
        assert!(diagnostics.dismiss().is_none());
        assert!(diagnostics.is_empty());
    }
}
