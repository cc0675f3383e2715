use crate::{EngineEvent, EntryFailure, ExportProgress};

/// Observer for export progress. Purely observational: implementations must
/// not influence the pipeline.
pub trait ProgressSink: Send + Sync {
    fn progress(&self, label: &str, percent: u8);

    fn entry_failed(&self, _failure: &EntryFailure) {}
}

/// Forwards progress and per-entry failures as [`EngineEvent`]s over a channel.
pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn progress(&self, label: &str, percent: u8) {
        let _ = self.tx.send(EngineEvent::Progress(ExportProgress {
            label: label.to_string(),
            percent,
        }));
    }

    fn entry_failed(&self, failure: &EntryFailure) {
        let _ = self.tx.send(EngineEvent::EntryFailed(failure.clone()));
    }
}
