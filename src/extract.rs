//! Extraction pipeline: snapshot in, dependency graph out.
//!
//! Each file is scanned and resolved independently on the rayon pool; the
//! per-file results are then folded into a [`GraphBuilder`] by a single merge
//! step, so the hot path never touches shared state.

use crate::graph::{DependencyGraph, FileEdges, GraphBuilder};
use crate::parse::factory::frontend_for;
use crate::parse::resolver::FileIndex;
use crate::parse::ParseFrontend;
use crate::snapshot::{ContentSource, FileRecord, Snapshot};
use crate::walk::Language;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Counters collected during one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub files_total: usize,
    pub files_analyzed: usize,
    pub files_unsupported: usize,
    pub files_unreadable: usize,
    pub files_filtered: usize,
    pub bytes_analyzed: u64,
    pub references: usize,
    pub unresolved_references: usize,
    pub edge_count: usize,
    /// Analyzed files per language
    pub languages: BTreeMap<Language, usize>,
}

/// Result of an extraction run.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub graph: DependencyGraph,
    pub stats: ExtractStats,
}

/// Scan and resolution result for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    pub edges: FileEdges,
    pub references: usize,
    pub unresolved: usize,
}

enum FileOutcome {
    Unsupported,
    Filtered,
    Unreadable,
    Analyzed {
        language: Language,
        bytes: u64,
        analysis: FileAnalysis,
    },
}

/// Scan `content` and resolve every reference against `files`.
fn analyze_with(
    frontend: &dyn ParseFrontend,
    record: &FileRecord,
    content: &str,
    files: &dyn FileIndex,
) -> FileAnalysis {
    let relative_path = record.relative_path.as_str();
    let dir = record.dir();
    let references = frontend.scan(content);
    let mut targets = BTreeSet::new();
    let mut unresolved = 0;

    for reference in &references {
        match frontend.resolve(dir, reference, files) {
            Some(target) => {
                targets.insert(target);
            }
            None => {
                unresolved += 1;
                tracing::trace!("{relative_path}: unresolved {:?}", reference.text);
            }
        }
    }

    FileAnalysis {
        edges: FileEdges {
            source: relative_path.to_string(),
            targets,
        },
        references: references.len(),
        unresolved,
    }
}

/// Configurable extraction over a snapshot.
pub struct Extractor<'a> {
    snapshot: &'a Snapshot,
    source: &'a dyn ContentSource,
    only: Option<HashSet<String>>,
    progress: Option<ProgressBar>,
}

impl<'a> Extractor<'a> {
    pub fn new(snapshot: &'a Snapshot, source: &'a dyn ContentSource) -> Self {
        Self {
            snapshot,
            source,
            only: None,
            progress: None,
        }
    }

    /// Analyze only these source files. Every snapshot file remains a valid
    /// resolution target.
    pub fn only<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Advance `progress` once per snapshot file.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    fn process(&self, record: &FileRecord) -> FileOutcome {
        let outcome = self.process_inner(record);
        if let Some(ref pb) = self.progress {
            pb.inc(1);
        }
        outcome
    }

    fn process_inner(&self, record: &FileRecord) -> FileOutcome {
        let frontend = match frontend_for(record.language) {
            Some(f) => f,
            None => return FileOutcome::Unsupported,
        };
        if let Some(ref only) = self.only {
            if !only.contains(&record.relative_path) {
                return FileOutcome::Filtered;
            }
        }

        let content = match self.source.read(&record.relative_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Skipping {e}");
                return FileOutcome::Unreadable;
            }
        };

        let analysis = analyze_with(frontend, record, &content, self.snapshot);
        tracing::debug!(
            "{}: {} references, {} resolved targets",
            record.relative_path,
            analysis.references,
            analysis.edges.targets.len()
        );
        FileOutcome::Analyzed {
            language: record.language,
            bytes: record.size_bytes,
            analysis,
        }
    }

    /// Run the extraction. Never fails; problem files are skipped and counted.
    pub fn run(&self) -> Extraction {
        // Parallel map: each worker owns its file's result
        let outcomes: Vec<FileOutcome> = self
            .snapshot
            .files()
            .par_iter()
            .map(|record| self.process(record))
            .collect();

        // Single merge point, in snapshot order
        let mut builder = GraphBuilder::new();
        let mut stats = ExtractStats {
            files_total: self.snapshot.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                FileOutcome::Unsupported => stats.files_unsupported += 1,
                FileOutcome::Filtered => stats.files_filtered += 1,
                FileOutcome::Unreadable => stats.files_unreadable += 1,
                FileOutcome::Analyzed {
                    language,
                    bytes,
                    analysis,
                } => {
                    stats.files_analyzed += 1;
                    stats.bytes_analyzed += bytes;
                    stats.references += analysis.references;
                    stats.unresolved_references += analysis.unresolved;
                    *stats.languages.entry(language).or_default() += 1;
                    builder.add_edges(analysis.edges);
                }
            }
        }

        let graph = builder.build();
        stats.edge_count = graph.edge_count();
        tracing::info!(
            "Analyzed dependencies for {} of {} files ({} edges)",
            stats.files_analyzed,
            stats.files_total,
            stats.edge_count
        );

        Extraction { graph, stats }
    }
}

/// Extract the dependency graph of every supported file in the snapshot.
pub fn extract(snapshot: &Snapshot, source: &dyn ContentSource) -> Extraction {
    Extractor::new(snapshot, source).run()
}
