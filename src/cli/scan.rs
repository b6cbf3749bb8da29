use crate::cli::{TargetArgs, Workspace};
use crate::errors::Result;
use crate::git;
use crate::metrics::scc::find_cycles;
use crate::metrics::summary::Summary;
use crate::output::json::Metadata;
use crate::output::OutputFormat;
use clap::Args;
use std::io::Write;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Only analyze files changed since this git ref
    #[arg(long)]
    pub since: Option<String>,

    /// End of the change range (default HEAD)
    #[arg(long, requires = "since")]
    pub until: Option<String>,

    /// Only analyze files changed by the last commit (HEAD~1..HEAD)
    #[arg(long, conflicts_with = "since")]
    pub changed: bool,
}

impl ScanArgs {
    /// Label for the selected change range, if any.
    fn change_range(&self) -> Option<String> {
        match self.since {
            Some(ref base) => Some(format!(
                "{base}..{}",
                self.until.as_deref().unwrap_or("HEAD")
            )),
            None if self.changed => Some("HEAD~1..HEAD".to_string()),
            None => None,
        }
    }
}

pub fn run(args: &ScanArgs) -> Result<()> {
    let start = Instant::now();
    let workspace = Workspace::open(&args.target, args.format)?;

    let changed = match args.since {
        Some(ref base) => Some(git::changed_files(
            &workspace.root,
            base,
            args.until.as_deref(),
        )?),
        None if args.changed => Some(git::changed_in_head(&workspace.root)?),
        None => None,
    };

    let extraction = workspace.extract(changed.as_deref());
    let graph = &extraction.graph;
    let cycles = find_cycles(graph);
    let summary = Summary::from_graph(graph, &cycles);

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let metadata = Metadata {
        root: workspace.root.clone(),
        stats: extraction.stats.clone(),
        changed_since: args.change_range(),
        elapsed_ms,
    };

    let mut stdout = std::io::stdout().lock();
    match workspace.config.format {
        OutputFormat::Json => {
            crate::output::json::write_scan_json(&mut stdout, graph, &summary, &cycles, &metadata)?
        }
        OutputFormat::Text => {
            crate::output::text::write_scan_text(&mut stdout, graph, &summary, &cycles, &metadata)?
        }
        OutputFormat::Dot => crate::output::dot::write_dot(&mut stdout, graph)?,
    }
    stdout.flush()?;

    if !workspace.config.quiet && workspace.config.format != OutputFormat::Text {
        eprintln!(
            "Analyzed {} files ({} edges) in {:.2}s",
            extraction.stats.files_analyzed,
            extraction.stats.edge_count,
            elapsed_ms as f64 / 1000.0
        );
    }

    Ok(())
}
