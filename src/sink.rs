//! Injected logging and notification capabilities.
//!
//! The core never talks to a logging backend directly. It emits plain text
//! messages through [`MessageSink`], so orchestration logic stays testable
//! without a real backend. Messages carry their own `[WARN]`/`[ERROR]`
//! tags, as the reporting strings always have.

use std::sync::{Arc, Mutex};

/// A fire-and-forget text message sink. No return value is consumed.
pub trait MessageSink {
    /// Deliver one message.
    fn emit(&self, message: &str);
}

/// Bundles the log sink and the user-facing notification sink consumed by
/// the writer and the orchestrator.
#[derive(Debug, Clone)]
pub struct Reporter<L, N> {
    log: L,
    notify: N,
}

impl<L: MessageSink, N: MessageSink> Reporter<L, N> {
    /// Create a reporter from a log sink and a notification sink.
    pub fn new(log: L, notify: N) -> Self {
        Self { log, notify }
    }

    /// Emit a message to the log sink.
    pub fn log(&self, message: &str) {
        self.log.emit(message);
    }

    /// Emit a message to the notification sink.
    pub fn notify(&self, message: &str) {
        self.notify.emit(message);
    }
}

/// Sink that routes messages through the `tracing` crate, mapping the
/// message's own severity tag to the matching tracing level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn emit(&self, message: &str) {
        if message.starts_with("[ERROR]") {
            tracing::error!(target: "iconsync", "{message}");
        } else if message.starts_with("[WARN]") {
            tracing::warn!(target: "iconsync", "{message}");
        } else {
            tracing::info!(target: "iconsync", "{message}");
        }
    }
}

/// Sink that prints messages to standard output, used for user-facing
/// notifications in the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl MessageSink for StdoutSink {
    fn emit(&self, message: &str) {
        println!("{message}");
    }
}

/// Sink that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn emit(&self, _message: &str) {}
}

/// Sink that collects messages in memory for assertions in tests.
///
/// Cloning shares the underlying store, so a test can keep one clone while
/// handing the other to an updater.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message emitted so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Whether any emitted message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }

    /// Number of messages emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages().len()
    }

    /// Whether no messages have been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl MessageSink for MemorySink {
    fn emit(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
