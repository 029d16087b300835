//! Diagnostic tally layer for tracing
//!
//! This module provides a custom tracing layer that captures WARN and ERROR
//! events so a job can report how many themes needed attention, and notifies
//! a channel each time one is recorded.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Number of warnings and errors seen so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    pub warnings: usize,
    pub errors: usize,
}

impl DiagnosticCounts {
    pub fn is_clean(&self) -> bool {
        self.warnings == 0 && self.errors == 0
    }
}

#[derive(Default)]
struct DiagnosticState {
    counts: DiagnosticCounts,
    messages: Vec<(Level, String)>,
}

/// A tracing layer that records WARN+ events and notifies via channel
pub struct DiagnosticLayer {
    state: Arc<Mutex<DiagnosticState>>,
    sender: mpsc::Sender<Level>,
}

/// Handle returned from setup, used to read what the layer captured
pub struct DiagnosticHandle {
    state: Arc<Mutex<DiagnosticState>>,
    /// Receiver that gets the level of every captured event
    pub receiver: mpsc::Receiver<Level>,
}

impl DiagnosticHandle {
    pub fn counts(&self) -> DiagnosticCounts {
        self.state
            .lock()
            .map(|state| state.counts)
            .unwrap_or_default()
    }

    /// Consume pending notifications, returning how many there were
    pub fn drain(&self) -> usize {
        self.receiver.try_iter().count()
    }

    /// Captured messages in the order they were logged
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.state
            .lock()
            .map(|state| state.messages.clone())
            .unwrap_or_default()
    }
}

/// Create a diagnostic layer and its handle
///
/// Returns the layer (to add to tracing subscriber) and a handle (for the summary)
pub fn create() -> (DiagnosticLayer, DiagnosticHandle) {
    let state = Arc::new(Mutex::new(DiagnosticState::default()));
    let (sender, receiver) = mpsc::channel();

    let layer = DiagnosticLayer {
        state: Arc::clone(&state),
        sender,
    };

    (layer, DiagnosticHandle { state, receiver })
}

impl<S> Layer<S> for DiagnosticLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        // Only capture WARN and ERROR
        let level = *event.metadata().level();
        if level > Level::WARN {
            return;
        }

        let mut visitor = StringVisitor::default();
        event.record(&mut visitor);

        if let Ok(mut state) = self.state.lock() {
            if level == Level::ERROR {
                state.counts.errors += 1;
            } else {
                state.counts.warnings += 1;
            }
            state.messages.push((level, visitor.0));
        }

        let _ = self.sender.send(level);
    }
}

/// Simple visitor to extract message from event
#[derive(Default)]
struct StringVisitor(String);

impl tracing::field::Visit for StringVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        } else if !self.0.is_empty() {
            self.0.push_str(&format!(" {}={:?}", field.name(), value));
        } else {
            self.0 = format!("{}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        } else if !self.0.is_empty() {
            self.0.push_str(&format!(" {}={}", field.name(), value));
        } else {
            self.0 = format!("{}={}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tracing_subscriber::prelude::*;

    #[test]
    fn counts_warnings_and_errors_separately() {
        let (layer, handle) = create();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("theme.json not found in themes/empty");
            tracing::error!("Invalid JSON in themes/broken/theme.json");
            tracing::warn!("Unknown color: fooColor");
        });

        assert_eq!(
            handle.counts(),
            DiagnosticCounts {
                warnings: 2,
                errors: 1
            }
        );
        let messages: Vec<_> = handle.messages().into_iter().map(|(_, m)| m).collect();
        assert_eq!(
            messages,
            vec![
                "theme.json not found in themes/empty",
                "Invalid JSON in themes/broken/theme.json",
                "Unknown color: fooColor",
            ]
        );
    }

    #[test]
    fn ignores_info_and_debug() {
        let (layer, handle) = create();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Rebuilt theme: nord");
            tracing::debug!("Wrote 3 declarations");
        });

        assert!(handle.counts().is_clean());
        assert!(handle
            .receiver
            .recv_timeout(Duration::from_millis(100))
            .is_err());
    }

    #[test]
    fn notifies_once_per_captured_event() {
        let (layer, handle) = create();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("first");
            tracing::warn!("second");
        });

        assert_eq!(
            handle.receiver.recv_timeout(Duration::from_secs(1)),
            Ok(Level::ERROR)
        );
        assert_eq!(
            handle.receiver.recv_timeout(Duration::from_secs(1)),
            Ok(Level::WARN)
        );
    }

    #[test]
    fn drain_empties_the_channel() {
        let (layer, handle) = create();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("one");
            tracing::error!("two");
        });

        assert_eq!(handle.drain(), 2);
        assert_eq!(handle.drain(), 0);
        assert_eq!(handle.counts().errors, 1);
    }
}
