use crate::errors::Result;
use crate::snapshot::{FileRecord, Snapshot};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::Path;

/// Source language tag carried by each file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Rust,
    Go,
    Other,
}

impl Language {
    /// Languages with a scanner and resolver.
    pub const SUPPORTED: [Language; 5] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Rust,
        Language::Go,
    ];

    /// File extensions for this language.
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Python => &["py"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::TypeScript => &["ts", "tsx", "mts", "cts"],
            Language::Rust => &["rs"],
            Language::Go => &["go"],
            Language::Other => &[],
        }
    }

    /// Tag a path by its extension (case-insensitive).
    pub fn from_path(path: &str) -> Language {
        let ext = match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return Language::Other,
        };
        Self::SUPPORTED
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
            .unwrap_or(Language::Other)
    }

    pub fn is_supported(&self) -> bool {
        *self != Language::Other
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "rust" | "rs" => Ok(Language::Rust),
            "go" => Ok(Language::Go),
            _ => Err(format!("unsupported language: {s}")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Python => write!(f, "python"),
            Language::JavaScript => write!(f, "javascript"),
            Language::TypeScript => write!(f, "typescript"),
            Language::Rust => write!(f, "rust"),
            Language::Go => write!(f, "go"),
            Language::Other => write!(f, "other"),
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Per-directory ignore file with gitignore syntax.
pub const IGNORE_FILE: &str = ".depatlasignore";

/// Discover every file under `root` and record it in a snapshot.
///
/// - Respects `.gitignore` and `.depatlasignore` (in `root`, its
///   subdirectories and its ancestors), with or without a git checkout
/// - Keeps other hidden files
/// - Never descends into `.git/`
/// - Applies include/exclude glob patterns to the relative path
/// - Returns records sorted by path for deterministic output
pub fn discover_snapshot(
    root: &Path,
    include_patterns: &[String],
    exclude_patterns: &[String],
) -> Result<Snapshot> {
    let exclude_set = build_globset(exclude_patterns)?;
    let include_set = if include_patterns.is_empty() {
        None
    } else {
        Some(build_globset(include_patterns)?)
    };

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("walk error: {e}");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = match path.strip_prefix(root) {
            Ok(r) => r,
            Err(_) => continue,
        };
        let relative_path = to_posix(relative);

        if exclude_set.is_match(&relative_path) {
            continue;
        }
        if let Some(ref include) = include_set {
            if !include.is_match(&relative_path) {
                continue;
            }
        }

        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(FileRecord::new(relative_path, size_bytes));
    }

    Ok(Snapshot::new(files))
}

/// Join path components with `/` regardless of platform.
fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
