pub mod query;
pub mod scan;

use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::errors::{DepAtlasError, Result};
use crate::extract::{Extraction, Extractor};
use crate::output::OutputFormat;
use crate::snapshot::{FsSource, Snapshot};
use crate::walk::{self, Language};
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "depatlas",
    version,
    about = "File-level dependency graph extractor for Python, JS/TS, Rust and Go"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the dependency graph of a repository
    Scan(scan::ScanArgs),
    /// Show what one file depends on and what depends on it
    Query(query::QueryArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan(args) => scan::run(&args),
        Commands::Query(args) => query::run(&args),
    }
}

/// Arguments shared by every command that walks a repository.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Repository root
    pub path: PathBuf,

    /// Only analyze these languages (repeatable)
    #[arg(long = "lang", value_parser = parse_language)]
    pub langs: Vec<Language>,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl TargetArgs {
    fn to_cli_overrides(&self, format: Option<OutputFormat>) -> CliOverrides {
        CliOverrides {
            format,
            quiet: self.quiet,
            languages: self.langs.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

fn parse_language(s: &str) -> std::result::Result<Language, String> {
    s.parse()
}

/// A walked repository with its resolved configuration.
pub(crate) struct Workspace {
    pub root: PathBuf,
    pub config: ResolvedConfig,
    pub snapshot: Snapshot,
}

impl Workspace {
    pub fn open(target: &TargetArgs, format: Option<OutputFormat>) -> Result<Self> {
        let root = target
            .path
            .canonicalize()
            .map_err(|_| DepAtlasError::NoFiles {
                path: target.path.clone(),
            })?;
        let config = resolve_config(&root, &target.to_cli_overrides(format))?;
        let snapshot = walk::discover_snapshot(&root, &config.include, &config.exclude)?;
        if snapshot.is_empty() {
            return Err(DepAtlasError::NoFiles { path: root });
        }
        tracing::info!("Discovered {} files under {}", snapshot.len(), root.display());

        Ok(Self {
            root,
            config,
            snapshot,
        })
    }

    /// Run extraction, analyzing only enabled languages and, when given,
    /// only the listed files. Every snapshot file stays a resolution target.
    pub fn extract(&self, changed: Option<&[String]>) -> Extraction {
        let source = FsSource::new(&self.root);
        let mut extractor = Extractor::new(&self.snapshot, &source);

        if changed.is_some() || !self.config.languages.is_empty() {
            let changed: Option<HashSet<&str>> =
                changed.map(|c| c.iter().map(String::as_str).collect());
            let selected = self
                .snapshot
                .files()
                .iter()
                .filter(|f| self.config.language_enabled(f.language))
                .filter(|f| {
                    changed
                        .as_ref()
                        .map_or(true, |c| c.contains(f.relative_path.as_str()))
                })
                .map(|f| f.relative_path.clone());
            extractor = extractor.only(selected);
        }

        let progress = if !self.config.quiet {
            let pb = indicatif::ProgressBar::new(self.snapshot.len() as u64);
            if let Ok(style) = indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };
        if let Some(ref pb) = progress {
            extractor = extractor.with_progress(pb.clone());
        }

        let extraction = extractor.run();
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        extraction
    }
}
