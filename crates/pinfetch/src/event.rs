use std::sync::Arc;

use crate::outcome::{DownloadOutcome, Summary};
use crate::reference::RepoRef;

/// Structured progress records emitted during a run.
///
/// The core never prints. Callers decide whether events go to a console,
/// a log file, or nowhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A run started for `target`, writing under `destination`.
    Started { target: RepoRef, destination: String },
    /// The contents endpoint failed for `path`; retrying via the raw endpoint.
    Fallback { path: String, reason: String },
    /// One item finished, successfully or not.
    Item(DownloadOutcome),
    /// Every item has been attempted.
    Finished {
        attempted: usize,
        succeeded: usize,
        failed: usize,
    },
}

impl Event {
    pub(crate) fn finished(summary: &Summary) -> Self {
        Self::Finished {
            attempted: summary.total_attempted(),
            succeeded: summary.total_succeeded(),
            failed: summary.failures().len(),
        }
    }

    /// Returns true if this event reports a failure.
    pub fn is_failure(&self) -> bool {
        match self {
            Self::Item(outcome) => !outcome.success,
            Self::Finished { failed, .. } => *failed > 0,
            Self::Started { .. } | Self::Fallback { .. } => false,
        }
    }
}

/// Receives events from a run.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: Event) {
        (**self).emit(event)
    }
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn emit(&self, event: Event) {
        (**self).emit(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: Event) {}
}
