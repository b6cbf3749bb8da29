use crate::cli::{TargetArgs, Workspace};
use crate::errors::{DepAtlasError, Result};
use crate::output::OutputFormat;
use crate::parse::resolver::normalize;
use clap::Args;
use std::io::Write;

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// File to query, relative to the repository root
    pub file: String,

    /// Output format (json or text)
    #[arg(long, value_parser = parse_query_format)]
    pub format: Option<OutputFormat>,
}

fn parse_query_format(s: &str) -> std::result::Result<OutputFormat, String> {
    match s.parse::<OutputFormat>()? {
        OutputFormat::Dot => Err("query output supports json or text".to_string()),
        format => Ok(format),
    }
}

pub fn run(args: &QueryArgs) -> Result<()> {
    let workspace = Workspace::open(&args.target, args.format)?;
    let file = normalize(&args.file.replace('\\', "/"))
        .filter(|f| !f.is_empty())
        .ok_or_else(|| DepAtlasError::Config(format!("not a repository path: {}", args.file)))?;
    match workspace.snapshot.get(&file) {
        None => tracing::warn!("{file} is not part of the scanned files"),
        Some(record) if !record.language.is_supported() => {
            tracing::warn!("{file} is not a supported source file; only dependents are reported")
        }
        Some(_) => {}
    }

    let extraction = workspace.extract(None);
    let graph = &extraction.graph;

    let mut stdout = std::io::stdout().lock();
    match workspace.config.format {
        OutputFormat::Json => crate::output::json::write_query_json(&mut stdout, graph, &file)?,
        // Configured dot output has no per-file rendering
        OutputFormat::Text | OutputFormat::Dot => {
            crate::output::text::write_query_text(&mut stdout, graph, &file)?
        }
    }
    stdout.flush()?;
    Ok(())
}
