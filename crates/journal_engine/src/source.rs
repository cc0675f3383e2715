use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use journal_logging::journal_debug;
use walkdir::WalkDir;

use crate::decode::DecodeError;
use crate::resolve::resolve_by_suffix;

const INDEX_FILENAME: &str = "index.html";
/// `index.html` itself or one folder below the root.
const INDEX_MAX_SEGMENTS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no files were supplied")]
    EmptySource,
    #[error("could not find index.html at the root of the export")]
    NoIndexFound,
    #[error("no file stored under {0}")]
    KeyNotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to walk export folder: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("failed to read export archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("index document is not readable text: {0}")]
    UnreadableIndex(#[from] DecodeError),
}

/// Read-only, flat `path -> content` collection backing one conversion run.
#[async_trait::async_trait]
pub trait FileSource: Send + Sync {
    /// All keys, in the order [`FileSource::resolve`] scans them.
    fn keys(&self) -> Vec<&str>;

    /// Key backing an index reference, using the suffix rule.
    fn resolve(&self, href: &str) -> Option<String> {
        resolve_by_suffix(self.keys(), href).map(str::to_string)
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, SourceError>;
}

/// Pick the export's `index.html`: the first key naming it at most one folder deep.
pub fn locate_index(source: &dyn FileSource) -> Result<String, SourceError> {
    let keys = source.keys();
    if keys.is_empty() {
        return Err(SourceError::EmptySource);
    }
    keys.into_iter()
        .find(|key| is_index_candidate(key))
        .map(str::to_string)
        .ok_or(SourceError::NoIndexFound)
}

fn is_index_candidate(key: &str) -> bool {
    let segments: Vec<&str> = key.split('/').collect();
    segments.len() <= INDEX_MAX_SEGMENTS && segments.last() == Some(&INDEX_FILENAME)
}

/// In-memory collection; keys iterate in lexicographic order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(key.into(), content.into());
    }

    pub fn with_file(mut self, key: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(key, content);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Load every file member of a zipped export into memory.
    pub fn from_zip_bytes(bytes: &[u8]) -> Result<Self, SourceError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut collection = Self::new();
        for i in 0..archive.len() {
            let mut member = archive.by_index(i)?;
            if member.is_dir() {
                continue;
            }
            let name = member.name().replace('\\', "/");
            let mut content = Vec::with_capacity(member.size() as usize);
            member
                .read_to_end(&mut content)
                .map_err(|source| SourceError::Io {
                    path: name.clone(),
                    source,
                })?;
            collection.insert(name, content);
        }
        journal_debug!("Loaded {} files from export archive", collection.len());
        Ok(collection)
    }
}

impl FromIterator<(String, Vec<u8>)> for MemoryFileSource {
    fn from_iter<T: IntoIterator<Item = (String, Vec<u8>)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl FileSource for MemoryFileSource {
    fn keys(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, SourceError> {
        self.files
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::KeyNotFound(key.to_string()))
    }
}

/// Export folder on disk.
///
/// Keys are `<folder name>/<relative path>` with `/` separators, the shape a
/// browser folder picker reports, so the same index references resolve.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    files: BTreeMap<String, PathBuf>,
}

impl DirectorySource {
    pub fn open(root: &Path) -> Result<Self, SourceError> {
        let prefix = root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();

        let mut files = BTreeMap::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let key = if prefix.is_empty() {
                relative
            } else {
                format!("{prefix}/{relative}")
            };
            files.insert(key, entry.path().to_path_buf());
        }
        journal_debug!("Found {} files under {:?}", files.len(), root);
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait::async_trait]
impl FileSource for DirectorySource {
    fn keys(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, SourceError> {
        let path = self
            .files
            .get(key)
            .ok_or_else(|| SourceError::KeyNotFound(key.to_string()))?;
        tokio::fs::read(path)
            .await
            .map_err(|source| SourceError::Io {
                path: key.to_string(),
                source,
            })
    }
}
