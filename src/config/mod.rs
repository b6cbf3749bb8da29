pub mod resolve;
pub mod schema;

use crate::output::OutputFormat;
use crate::walk::Language;
use std::path::PathBuf;

/// Fully resolved configuration with no Option fields.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub format: OutputFormat,
    pub quiet: bool,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,

    /// Languages to analyze; empty means every supported language
    pub languages: Vec<Language>,

    pub loaded_files: Vec<PathBuf>,
}

impl ResolvedConfig {
    pub fn language_enabled(&self, language: Language) -> bool {
        language.is_supported() && (self.languages.is_empty() || self.languages.contains(&language))
    }
}
