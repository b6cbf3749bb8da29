//! Repository snapshot: the fixed set of files analyzed in one run, plus the
//! capability to read their content.
//!
//! [`Snapshot`] owns the file records and doubles as the existence check used
//! by the resolvers, so a resolved edge can only ever point at a snapshot
//! member. Content is read through [`ContentSource`], implemented for the
//! real filesystem ([`FsSource`]) and for in-memory trees ([`MemorySource`]).

use crate::parse::resolver::FileIndex;
use crate::walk::Language;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use thiserror::Error;

/// Metadata about one file in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// POSIX-style path relative to the repository root
    pub relative_path: String,
    pub language: Language,
    pub size_bytes: u64,
}

impl FileRecord {
    /// Build a record, deriving the language from the path's extension.
    pub fn new(relative_path: impl Into<String>, size_bytes: u64) -> Self {
        let relative_path = relative_path.into();
        let language = Language::from_path(&relative_path);
        Self {
            relative_path,
            language,
            size_bytes,
        }
    }

    /// Directory portion of the relative path ("" for root-level files).
    pub fn dir(&self) -> &str {
        crate::parse::resolver::parent_dir(&self.relative_path)
    }
}

/// Ordered, immutable collection of file records.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    files: Vec<FileRecord>,
    index: HashSet<String>,
}

impl Snapshot {
    /// Build a snapshot. Records are sorted by path and duplicate paths
    /// collapse to the first occurrence.
    pub fn new(mut files: Vec<FileRecord>) -> Self {
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        files.dedup_by(|a, b| a.relative_path == b.relative_path);
        let index = files.iter().map(|f| f.relative_path.clone()).collect();
        Self { files, index }
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.index.contains(relative_path)
    }

    pub fn get(&self, relative_path: &str) -> Option<&FileRecord> {
        self.files
            .binary_search_by(|f| f.relative_path.as_str().cmp(relative_path))
            .ok()
            .map(|i| &self.files[i])
    }
}

impl FileIndex for Snapshot {
    fn is_file(&self, relative_path: &str) -> bool {
        self.contains(relative_path)
    }
}

/// Failure to read one file's content. Always recovered by skipping the file.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{path}: not found")]
    NotFound { path: String },

    #[error("{path}: not valid UTF-8")]
    Decode { path: String },

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Content-read capability for snapshot files.
///
/// Implementations must be safe to call from multiple threads concurrently.
pub trait ContentSource: Send + Sync {
    fn read(&self, relative_path: &str) -> Result<String, ReadError>;
}

fn decode(relative_path: &str, bytes: Vec<u8>) -> Result<String, ReadError> {
    String::from_utf8(bytes).map_err(|_| ReadError::Decode {
        path: relative_path.to_string(),
    })
}

/// Reads files from a repository checkout on disk.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentSource for FsSource {
    fn read(&self, relative_path: &str) -> Result<String, ReadError> {
        let full = self.root.join(relative_path);
        match std::fs::read(&full) {
            Ok(bytes) => decode(relative_path, bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ReadError::NotFound {
                path: relative_path.to_string(),
            }),
            Err(e) => Err(ReadError::Io {
                path: relative_path.to_string(),
                source: e,
            }),
        }
    }
}

/// In-memory file contents keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    contents: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, returning `self` for chaining.
    pub fn with_file(mut self, relative_path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(relative_path, content);
        self
    }

    pub fn insert(&mut self, relative_path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.contents.insert(relative_path.into(), content.into());
    }

    /// Build a snapshot covering every stored file.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.contents
                .iter()
                .map(|(path, bytes)| FileRecord::new(path.clone(), bytes.len() as u64))
                .collect(),
        )
    }
}

impl ContentSource for MemorySource {
    fn read(&self, relative_path: &str) -> Result<String, ReadError> {
        match self.contents.get(relative_path) {
            Some(bytes) => decode(relative_path, bytes.clone()),
            None => Err(ReadError::NotFound {
                path: relative_path.to_string(),
            }),
        }
    }
}
