//! File-level dependency extraction for Python, JavaScript/TypeScript, Rust
//! and Go repositories.
//!
//! A [`Snapshot`] lists the repository's files; each supported file is
//! scanned for import-like references, which are resolved against the
//! snapshot and folded into a [`DependencyGraph`] with forward and reverse
//! adjacency.

pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod git;
pub mod graph;
pub mod metrics;
pub mod output;
pub mod parse;
pub mod snapshot;
pub mod walk;

pub use errors::{DepAtlasError, Result};
pub use extract::{extract, ExtractStats, Extraction, Extractor};
pub use graph::{DependencyGraph, FileEdges, GraphBuilder};
pub use snapshot::{ContentSource, FileRecord, FsSource, MemorySource, ReadError, Snapshot};
pub use walk::Language;
