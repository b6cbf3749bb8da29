use crate::parse::common::{RawReference, ReferenceKind};
use crate::parse::resolver::{first_existing, join_normalized, FileIndex};
use crate::parse::ParseFrontend;
use regex::Regex;
use std::sync::LazyLock;

static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+.*?\s+from\s+['"]([^'"]+)['"]"#).expect("valid JS import pattern")
});

static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\s*\(['"]([^'"]+)['"]\)"#).expect("valid JS require pattern")
});

/// Suffixes tried, in order, after the literal specifier.
const EXTENSIONS: [&str; 5] = [".js", ".ts", ".jsx", ".tsx", ".vue"];

/// Frontend shared by JavaScript and TypeScript files.
pub struct JavaScriptFrontend;

impl JavaScriptFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaScriptFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseFrontend for JavaScriptFrontend {
    fn scan(&self, content: &str) -> Vec<RawReference> {
        let imports = IMPORT_FROM
            .captures_iter(content)
            .map(|caps| RawReference::from_specifier(&caps[1]));
        let requires = REQUIRE
            .captures_iter(content)
            .map(|caps| RawReference::from_specifier(&caps[1]));
        imports.chain(requires).collect()
    }

    fn resolve(
        &self,
        from_dir: &str,
        reference: &RawReference,
        files: &dyn FileIndex,
    ) -> Option<String> {
        // Bare specifiers belong to the package manager
        if !matches!(reference.kind, ReferenceKind::RelativeModule { .. }) {
            return None;
        }
        let spec = reference.text.as_str();
        let target = match spec.strip_prefix('/') {
            Some(rooted) => join_normalized("", rooted)?,
            None => join_normalized(from_dir, spec)?,
        };

        let candidates = std::iter::once(target.clone())
            .chain(EXTENSIONS.iter().map(|ext| format!("{target}{ext}")));
        first_existing(candidates, files)
    }
}
