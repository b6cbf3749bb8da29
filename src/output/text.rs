use crate::errors::Result;
use crate::graph::ir::DependencyGraph;
use crate::metrics::scc::Cycle;
use crate::metrics::summary::Summary;
use crate::output::json::Metadata;
use std::io::Write;

/// Write scan output as a human-readable report.
pub fn write_scan_text<W: Write>(
    writer: &mut W,
    graph: &DependencyGraph,
    summary: &Summary,
    cycles: &[Cycle],
    metadata: &Metadata,
) -> Result<()> {
    let stats = &metadata.stats;
    writeln!(writer, "Dependency Report")?;
    writeln!(writer, "=================")?;
    writeln!(writer)?;
    writeln!(writer, "Root:       {}", metadata.root.display())?;
    if let Some(ref range) = metadata.changed_since {
        writeln!(writer, "Changes:    {range}")?;
    }
    writeln!(
        writer,
        "Files:      {} analyzed of {} ({} unsupported, {} unreadable, {} filtered)",
        stats.files_analyzed,
        stats.files_total,
        stats.files_unsupported,
        stats.files_unreadable,
        stats.files_filtered
    )?;
    if !stats.languages.is_empty() {
        let langs: Vec<String> = stats
            .languages
            .iter()
            .map(|(lang, n)| format!("{lang}={n}"))
            .collect();
        writeln!(writer, "Languages:  {}", langs.join(" "))?;
    }
    writeln!(
        writer,
        "References: {} ({} unresolved)",
        stats.references, stats.unresolved_references
    )?;
    writeln!(writer)?;

    writeln!(writer, "Summary")?;
    writeln!(writer, "-------")?;
    writeln!(writer, "Nodes:    {}", summary.node_count)?;
    writeln!(writer, "Edges:    {}", summary.edge_count)?;
    writeln!(
        writer,
        "Fan-out:  mean={:.2}  max={}",
        summary.mean_fanout, summary.max_fanout
    )?;
    writeln!(
        writer,
        "Fan-in:   mean={:.2}  max={}",
        summary.mean_fanin, summary.max_fanin
    )?;
    writeln!(
        writer,
        "Cycles:   {} (largest: {}, self-loops: {})",
        summary.cycle_count, summary.largest_cycle_size, summary.self_loops
    )?;
    writeln!(writer)?;

    if !graph.forward().is_empty() {
        writeln!(writer, "Dependencies")?;
        writeln!(writer, "{:-<60}", "")?;
        for (source, targets) in graph.forward() {
            writeln!(
                writer,
                "{source} ({} deps, {} users)",
                targets.len(),
                graph.dependents(source).len()
            )?;
            for target in targets {
                writeln!(writer, "  -> {target}")?;
            }
        }
        writeln!(writer)?;
    }

    if !cycles.is_empty() {
        writeln!(writer, "Cycles")?;
        writeln!(writer, "{:-<60}", "")?;
        for cycle in cycles {
            writeln!(
                writer,
                "Cycle #{} (size={}, internal_edges={})",
                cycle.id, cycle.size, cycle.internal_edges
            )?;
            for member in &cycle.members {
                writeln!(writer, "  - {member}")?;
            }
            writeln!(writer)?;
        }
    }

    writeln!(
        writer,
        "Completed in {:.2}s",
        metadata.elapsed_ms as f64 / 1000.0
    )?;
    Ok(())
}

/// Write one file's dependencies and dependents as plain lists.
pub fn write_query_text<W: Write>(writer: &mut W, graph: &DependencyGraph, file: &str) -> Result<()> {
    writeln!(writer, "{file}")?;
    writeln!(writer, "Dependencies ({}):", graph.dependencies(file).len())?;
    for dep in graph.dependencies(file) {
        writeln!(writer, "  -> {dep}")?;
    }
    writeln!(writer, "Dependents ({}):", graph.dependents(file).len())?;
    for user in graph.dependents(file) {
        writeln!(writer, "  <- {user}")?;
    }
    Ok(())
}
