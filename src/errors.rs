use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DepAtlasError {
    #[error("No files found in {path}")]
    #[diagnostic(code(depatlas::no_files))]
    NoFiles { path: PathBuf },

    #[error("Could not resolve ref: {reference}")]
    #[diagnostic(code(depatlas::bad_ref))]
    BadRef { reference: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(depatlas::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(depatlas::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(depatlas::git))]
    Git(#[from] git2::Error),

    #[error(transparent)]
    #[diagnostic(code(depatlas::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(depatlas::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, DepAtlasError>;
