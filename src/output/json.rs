use crate::errors::Result;
use crate::extract::ExtractStats;
use crate::graph::ir::{Adjacency, DependencyGraph};
use crate::metrics::scc::Cycle;
use crate::metrics::summary::Summary;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct ScanOutput<'a> {
    pub metadata: &'a Metadata,
    pub summary: &'a Summary,
    pub cycles: &'a [Cycle],
    pub forward: &'a Adjacency,
    pub reverse: &'a Adjacency,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub root: PathBuf,
    #[serde(flatten)]
    pub stats: ExtractStats,
    /// Git range used to select analyzed files, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_since: Option<String>,
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct QueryOutput<'a> {
    pub file: &'a str,
    pub dependencies: Vec<&'a str>,
    pub dependents: Vec<&'a str>,
}

impl<'a> QueryOutput<'a> {
    pub fn new(graph: &'a DependencyGraph, file: &'a str) -> Self {
        Self {
            file,
            dependencies: graph.dependencies(file).iter().map(String::as_str).collect(),
            dependents: graph.dependents(file).iter().map(String::as_str).collect(),
        }
    }
}

/// Write scan output as JSON.
pub fn write_scan_json<W: Write>(
    writer: &mut W,
    graph: &DependencyGraph,
    summary: &Summary,
    cycles: &[Cycle],
    metadata: &Metadata,
) -> Result<()> {
    let output = ScanOutput {
        metadata,
        summary,
        cycles,
        forward: graph.forward(),
        reverse: graph.reverse(),
    };
    serde_json::to_writer_pretty(&mut *writer, &output)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a single file's neighbors as JSON.
pub fn write_query_json<W: Write>(writer: &mut W, graph: &DependencyGraph, file: &str) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &QueryOutput::new(graph, file))?;
    writeln!(writer)?;
    Ok(())
}
