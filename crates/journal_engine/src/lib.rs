//! Journal engine: file sources, HTML extraction and export packaging.
mod convert;
mod decode;
mod engine;
mod extract;
mod filename;
mod header;
mod index;
mod package;
mod persist;
mod progress;
mod resolve;
mod source;
mod types;

pub use convert::{Html2MdConverter, MarkdownConverter};
pub use decode::{decode_document, DecodeError, DecodedDocument};
pub use engine::{EngineConfig, EngineHandle};
pub use extract::{
    EntryExtractor, ExtractedBody, ExtractionStrategy, MarkedParagraphs, NoiseStripping,
    DEFAULT_MARKER_CLASS, NOISE_SELECTOR,
};
pub use filename::{archive_filename, document_filename, entry_filename, sanitize_title};
pub use header::{build_entry_document, DateFormat, InvalidDateFormat, DEFAULT_DATE_FORMAT};
pub use index::{load_index, parse_index, ParsedIndex};
pub use package::{
    ConcatenatedDocument, ExportJob, OutputBundle, Packager, ZipBundle, ENTRY_SEPARATOR,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use progress::{ChannelProgressSink, ProgressSink};
pub use resolve::resolve_by_suffix;
pub use source::{locate_index, DirectorySource, FileSource, MemoryFileSource, SourceError};
pub use types::{EngineEvent, EntryFailure, ExportArtifact, ExportError, ExportProgress};
