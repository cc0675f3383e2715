//! Journal core: entry model, date filtering and the pure session state machine.
mod effect;
mod entry;
mod export;
mod filter;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use entry::{parse_anchor_text, IndexEntry, UNTITLED};
pub use export::{ExportMode, ExportTally};
pub use filter::{filter_entries, FilterRange, FilteredEntries};
pub use msg::Msg;
pub use state::{AppState, ExportPhase, FatalState, Notice};
pub use update::update;
pub use view_model::AppViewModel;
