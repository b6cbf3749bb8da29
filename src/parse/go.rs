use crate::parse::common::{RawReference, ReferenceKind};
use crate::parse::resolver::{join_normalized, FileIndex};
use crate::parse::ParseFrontend;
use regex::Regex;
use std::sync::LazyLock;

static SINGLE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+["']([^"']+)["']"#).expect("valid Go import pattern")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("valid Go quoted pattern"));

/// Where a Go import path points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportClass {
    /// `./helpers`, `../shared`
    Relative,
    /// `fmt`, `os`: no `/` in the path
    Stdlib,
    /// `github.com/user/repo/pkg`
    External,
}

/// Classify an import path. Only relative paths are resolved.
pub fn classify_import(import_path: &str) -> ImportClass {
    if import_path.starts_with('.') {
        ImportClass::Relative
    } else if !import_path.contains('/') {
        ImportClass::Stdlib
    } else {
        ImportClass::External
    }
}

pub struct GoFrontend;

impl GoFrontend {
    pub fn new() -> Self {
        Self
    }

    fn reference(path: &str) -> RawReference {
        if path.starts_with('.') {
            RawReference::relative(path)
        } else {
            RawReference::absolute(path)
        }
    }

    /// Quoted paths on the lines of `import ( ... )` blocks.
    fn block_imports(content: &str) -> Vec<RawReference> {
        let mut refs = Vec::new();
        let mut in_block = false;
        for line in content.lines() {
            let stripped = line.trim();
            if stripped.starts_with("import (") {
                in_block = true;
                continue;
            }
            if !in_block {
                continue;
            }
            if stripped == ")" {
                in_block = false;
                continue;
            }
            if let Some(caps) = QUOTED.captures(stripped) {
                refs.push(Self::reference(&caps[1]));
            }
        }
        refs
    }
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseFrontend for GoFrontend {
    fn scan(&self, content: &str) -> Vec<RawReference> {
        let mut refs: Vec<RawReference> = SINGLE_IMPORT
            .captures_iter(content)
            .map(|caps| Self::reference(&caps[1]))
            .collect();
        refs.extend(Self::block_imports(content));
        refs
    }

    fn resolve(
        &self,
        from_dir: &str,
        reference: &RawReference,
        files: &dyn FileIndex,
    ) -> Option<String> {
        if reference.kind == ReferenceKind::AbsoluteModule
            || classify_import(&reference.text) != ImportClass::Relative
        {
            return None;
        }
        let target = join_normalized(from_dir, &reference.text)?;
        files.is_file(&target).then_some(target)
    }
}
