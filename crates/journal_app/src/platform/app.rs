use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use journal_core::{update, AppState, ExportPhase, Msg};
use journal_engine::{DirectorySource, FileSource, MemoryFileSource};
use journal_logging::{journal_debug, journal_info};

use super::config::{self, SETTINGS_FILENAME};
use super::effects::EffectRunner;
use super::{logging, render};
use crate::cli::Cli;

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::initialize(cli.log, cli.verbose);

    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));
    let mut settings = config::load_settings(&settings_path);
    settings.apply_cli(&cli)?;
    journal_debug!("Effective settings: {:?}", settings);

    let source = open_source(&cli.input)?;
    let runner = EffectRunner::new(source, &settings);
    let parsed = runner
        .load_index()
        .with_context(|| format!("could not read the journal index in {}", cli.input.display()))?;

    let mut state = apply(AppState::new(), Msg::IndexParsed(parsed.entries));
    state = apply(state, Msg::ModeChanged(settings.format.mode()));
    if let Some(start) = cli.start {
        state = apply(state, Msg::StartDateChanged(start));
    }
    if let Some(end) = cli.end {
        state = apply(state, Msg::EndDateChanged(end));
    }

    let view = state.view();
    if view.fatal.is_some() {
        if let Some(message) = render::blocking_message(&view) {
            println!("{message}");
        }
        return Ok(ExitCode::FAILURE);
    }
    for line in render::overview_lines(&view, &settings.date_format) {
        println!("{line}");
    }

    if cli.list {
        if let Some(selected) = state.selected() {
            for line in render::entry_lines(&selected) {
                println!("{line}");
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (next, effects) = update(state, Msg::ConvertClicked);
    state = next;
    if let Some(message) = render::blocking_message(&state.view()) {
        println!("{message}");
        return Ok(ExitCode::FAILURE);
    }
    state.consume_dirty();

    runner.run(effects, |msg| {
        state = apply(std::mem::take(&mut state), msg);
        if state.consume_dirty() {
            if let Some(line) = render::progress_line(&state.view()) {
                println!("{line}");
            }
        }
    });

    let view = state.view();
    for line in render::outcome_lines(&view) {
        println!("{line}");
    }
    match view.phase {
        ExportPhase::Finished { .. } => Ok(ExitCode::SUCCESS),
        _ => Ok(ExitCode::FAILURE),
    }
}

/// Messages handled here never produce effects; only ConvertClicked does.
fn apply(state: AppState, msg: Msg) -> AppState {
    update(state, msg).0
}

fn open_source(input: &Path) -> anyhow::Result<Arc<dyn FileSource>> {
    if input.is_dir() {
        journal_info!("Reading export folder {:?}", input);
        let source = DirectorySource::open(input)?;
        return Ok(Arc::new(source));
    }
    let is_zip = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if input.is_file() && is_zip {
        journal_info!("Reading export archive {:?}", input);
        let bytes =
            fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
        let source = MemoryFileSource::from_zip_bytes(&bytes)?;
        return Ok(Arc::new(source));
    }
    bail!(
        "{} is neither an export folder nor a .zip archive",
        input.display()
    )
}
