//! Watch loop that keeps the roster in sync with the server log.
//!
//! The monitor owns the only long-lived roster. Each modification signal
//! triggers one full reconciliation pass; resulting transitions are handed
//! to the notification sink on detached tasks so a slow webhook never
//! holds up the next pass.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::roster::{reconcile, Roster, Transition};
use crate::sink::{format_message, NotificationSink};
use crate::watcher::{LogReader, WatchSignal, WatcherError};

/// Keeps the player roster in sync with the server log.
pub struct RosterMonitor {
    reader: LogReader,
    sink: Arc<dyn NotificationSink>,
    roster: Roster,
}

impl RosterMonitor {
    /// Create a monitor with an empty roster.
    #[must_use]
    pub fn new(reader: LogReader, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            reader,
            sink,
            roster: Roster::new(),
        }
    }

    /// Current roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Load the roster already described by the log.
    ///
    /// With `announce` unset the initial players are adopted silently, so
    /// a restart does not re-announce everyone who is online. A failed
    /// read leaves the roster empty.
    pub async fn seed(&mut self, announce: bool) -> Vec<Transition> {
        match self.reader.read().await {
            Ok(lines) => {
                let result = reconcile(&lines, &self.roster);
                self.roster = result.roster;
                tracing::info!(
                    players = self.roster.len(),
                    path = %self.reader.path().display(),
                    "Loaded initial roster"
                );
                if announce {
                    self.announce(&result.transitions);
                }
                result.transitions
            }
            Err(e) => {
                tracing::warn!(error = %e, "Initial log read failed, starting with empty roster");
                Vec::new()
            }
        }
    }

    /// Re-read the log and announce any membership changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read; the roster is left
    /// untouched in that case.
    pub async fn refresh(&mut self) -> Result<Vec<Transition>, WatcherError> {
        let lines = self.reader.read().await?;
        let result = reconcile(&lines, &self.roster);

        for id in &result.unmatched_disconnects {
            tracing::debug!(id = %id, "Disconnect with no matching player");
        }

        self.roster = result.roster;
        self.announce(&result.transitions);
        Ok(result.transitions)
    }

    /// Handle one signal from the log watcher.
    ///
    /// Returns the transitions announced for it. Errors are logged and
    /// swallowed so the watch loop keeps running.
    pub async fn handle_signal(&mut self, signal: WatchSignal) -> Vec<Transition> {
        match signal {
            WatchSignal::Modified => match self.refresh().await {
                Ok(transitions) => transitions,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping reconciliation pass");
                    Vec::new()
                }
            },
            WatchSignal::Other(kind) => {
                tracing::trace!(kind = ?kind, "Ignoring non-modify event");
                Vec::new()
            }
            WatchSignal::Error(e) => {
                tracing::warn!(error = %e, "Log watcher error");
                Vec::new()
            }
        }
    }

    /// Process signals until the stream ends, then return the final roster.
    pub async fn run(mut self, mut signals: mpsc::UnboundedReceiver<WatchSignal>) -> Roster {
        while let Some(signal) = signals.recv().await {
            self.handle_signal(signal).await;
        }
        tracing::info!("Log watcher closed, stopping");
        self.roster
    }

    /// Log each transition and dispatch its message without waiting.
    fn announce(&self, transitions: &[Transition]) {
        for transition in transitions {
            let entry = transition.entry();
            match transition {
                Transition::Joined(_) => {
                    tracing::info!(player = %entry.name, id = %entry.id, "Player joined");
                }
                Transition::Left(_) => {
                    tracing::info!(player = %entry.name, id = %entry.id, "Player left");
                }
            }

            let message = format_message(transition);
            let sink = Arc::clone(&self.sink);
            tokio::spawn(async move {
                if let Err(e) = sink.send(&message).await {
                    tracing::error!(error = %e, message = %message, "Failed to deliver notification");
                }
            });
        }
    }
}
