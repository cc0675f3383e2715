use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use journal_core::{Effect, Msg};
use journal_engine::{
    AtomicFileWriter, EngineConfig, EngineEvent, EngineHandle, ExportJob, FileSource,
    ParsedIndex, SourceError,
};
use journal_logging::{journal_debug, journal_error, journal_info};

use super::config::Settings;

/// Executes core effects on the engine and feeds engine events back as messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    writer: AtomicFileWriter,
    today: NaiveDate,
}

impl EffectRunner {
    pub(crate) fn new(source: Arc<dyn FileSource>, settings: &Settings) -> Self {
        let config = EngineConfig {
            marker_class: settings.marker_class.clone(),
            date_format: settings.date_format.clone(),
        };
        Self {
            engine: EngineHandle::new(source, config),
            writer: AtomicFileWriter::new(settings.output_dir.clone()),
            today: Utc::now().date_naive(),
        }
    }

    pub(crate) fn load_index(&self) -> Result<ParsedIndex, SourceError> {
        self.engine.load_index();
        while let Some(event) = self.engine.recv() {
            if let EngineEvent::IndexLoaded(result) = event {
                return result;
            }
        }
        Err(engine_stopped())
    }

    /// Run `effects` to completion, dispatching every resulting message.
    pub(crate) fn run(&self, effects: Vec<Effect>, mut dispatch: impl FnMut(Msg)) {
        for effect in effects {
            match effect {
                Effect::StartExport { entries, mode } => {
                    journal_debug!("StartExport entries={} mode={:?}", entries.len(), mode);
                    self.engine.start_export(ExportJob {
                        entries,
                        mode,
                        today: self.today,
                    });
                    self.pump_until_complete(&mut dispatch);
                }
            }
        }
    }

    fn pump_until_complete(&self, dispatch: &mut impl FnMut(Msg)) {
        while let Some(event) = self.engine.recv() {
            match event {
                EngineEvent::IndexLoaded(_) => {}
                EngineEvent::Progress(progress) => dispatch(Msg::ExportProgress {
                    label: progress.label,
                    percent: progress.percent,
                }),
                EngineEvent::EntryFailed(failure) => dispatch(Msg::EntryFailed(failure.to_string())),
                EngineEvent::ExportCompleted(Ok(artifact)) => {
                    match self.writer.save_artifact(&artifact) {
                        Ok(path) => {
                            journal_info!("Saved export to {:?}", path);
                            dispatch(Msg::ExportFinished {
                                tally: artifact.tally,
                                artifact: path.display().to_string(),
                            });
                        }
                        Err(err) => {
                            journal_error!("Failed to save {}: {}", artifact.filename, err);
                            dispatch(Msg::ExportFailed(format!(
                                "failed to save {}: {err}",
                                artifact.filename
                            )));
                        }
                    }
                    return;
                }
                EngineEvent::ExportCompleted(Err(err)) => {
                    journal_error!("Export aborted: {}", err);
                    dispatch(Msg::ExportFailed(err.to_string()));
                    return;
                }
            }
        }
        dispatch(Msg::ExportFailed(engine_stopped().to_string()));
    }
}

fn engine_stopped() -> SourceError {
    SourceError::Io {
        path: "export engine".to_string(),
        source: std::io::Error::other("worker thread stopped"),
    }
}
