use std::sync::{mpsc, Arc};
use std::thread;

use journal_logging::{journal_error, journal_info};
use tokio_util::sync::CancellationToken;

use crate::extract::{EntryExtractor, DEFAULT_MARKER_CLASS};
use crate::header::DateFormat;
use crate::index::load_index;
use crate::package::{ExportJob, Packager};
use crate::progress::ChannelProgressSink;
use crate::source::{FileSource, SourceError};
use crate::types::{EngineEvent, ExportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Class marking body paragraphs for the primary extraction strategy.
    pub marker_class: String,
    pub date_format: DateFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            date_format: DateFormat::default(),
        }
    }
}

enum EngineCommand {
    LoadIndex,
    Export(ExportJob),
}

/// Runs exports on a background thread, one at a time, and reports back
/// through [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn FileSource>, config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let extractor = EntryExtractor::new(config.marker_class, config.date_format);
        let packager = Packager::new(source.clone(), extractor);
        let worker_cancel = cancel.clone();

        thread::spawn(move || {
            // Entries are read and converted one after another on this thread.
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    journal_error!("Failed to start export runtime: {}", err);
                    while let Ok(command) = cmd_rx.recv() {
                        let event = match command {
                            EngineCommand::LoadIndex => EngineEvent::IndexLoaded(Err(SourceError::Io {
                                path: "index.html".to_string(),
                                source: std::io::Error::other(err.to_string()),
                            })),
                            EngineCommand::Export(_) => EngineEvent::ExportCompleted(Err(
                                ExportError::Packaging(format!("export runtime unavailable: {err}")),
                            )),
                        };
                        let _ = event_tx.send(event);
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(
                    source.as_ref(),
                    &packager,
                    command,
                    &event_tx,
                    &worker_cancel,
                ));
            }
        });

        Self {
            cmd_tx,
            event_rx,
            cancel,
        }
    }

    /// Locate and parse the source's index; answered with [`EngineEvent::IndexLoaded`].
    pub fn load_index(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadIndex);
    }

    pub fn start_export(&self, job: ExportJob) {
        journal_info!(
            "Starting export of {} entries as {:?}",
            job.entries.len(),
            job.mode
        );
        let _ = self.cmd_tx.send(EngineCommand::Export(job));
    }

    /// Stop the running export before its next entry; pending exports are
    /// cancelled as well. Partial output is discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    source: &dyn FileSource,
    packager: &Packager,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
    cancel: &CancellationToken,
) {
    match command {
        EngineCommand::LoadIndex => {
            let result = load_index(source).await;
            let _ = event_tx.send(EngineEvent::IndexLoaded(result));
        }
        EngineCommand::Export(job) => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = packager.export(job, &sink, cancel).await;
            let _ = event_tx.send(EngineEvent::ExportCompleted(result));
        }
    }
}
