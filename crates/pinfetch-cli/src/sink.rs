use pinfetch::{Event, EventSink};

/// Forwards run events to `tracing`, which fans out to console and log file.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        match event {
            Event::Started {
                target,
                destination,
            } => {
                tracing::info!(%target, %destination, "starting download");
            }
            Event::Fallback { path, reason } => {
                tracing::warn!(%path, %reason, "contents API failed, trying raw URL");
            }
            Event::Item(outcome) if outcome.success => {
                tracing::info!(path = %outcome.path, "downloaded");
            }
            Event::Item(outcome) => {
                tracing::warn!(
                    path = %outcome.path,
                    category = %outcome.category.map(|c| c.to_string()).unwrap_or_default(),
                    error = %outcome.error_detail.unwrap_or_default(),
                    "download failed"
                );
            }
            Event::Finished {
                attempted,
                succeeded,
                failed,
            } => {
                tracing::info!(attempted, succeeded, failed, "download finished");
            }
        }
    }
}
