use crate::{AppState, Effect, ExportPhase, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::IndexParsed(entries) => {
            // A running export keeps its own snapshot; refuse to swap the set under it.
            if !state.is_exporting() {
                state.load_entries(entries);
            }
            Vec::new()
        }
        Msg::StartDateChanged(date) => {
            state.set_start(date);
            Vec::new()
        }
        Msg::EndDateChanged(date) => {
            state.set_end(date);
            Vec::new()
        }
        Msg::ModeChanged(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::ConvertClicked => {
            if state.fatal().is_some() || state.is_exporting() {
                return (state, Vec::new());
            }
            let entries = state.selected().map(|s| s.to_vec()).unwrap_or_default();
            if entries.is_empty() {
                state.set_notice(Notice::NothingToConvert);
                return (state, Vec::new());
            }
            let mode = state.mode();
            state.begin_export();
            vec![Effect::StartExport { entries, mode }]
        }
        Msg::ExportProgress { label, percent } => {
            if state.is_exporting() {
                state.set_phase(ExportPhase::Running {
                    label,
                    percent: percent.min(100),
                });
            }
            Vec::new()
        }
        Msg::EntryFailed(description) => {
            if state.is_exporting() {
                state.record_failure(description);
            }
            Vec::new()
        }
        Msg::ExportFinished { tally, artifact } => {
            state.set_phase(ExportPhase::Finished { tally, artifact });
            Vec::new()
        }
        Msg::ExportFailed(reason) => {
            state.set_phase(ExportPhase::Failed(reason));
            Vec::new()
        }
    };

    (state, effects)
}
