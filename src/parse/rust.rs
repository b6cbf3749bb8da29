use crate::parse::common::{RawReference, ReferenceKind};
use crate::parse::resolver::{first_existing, join, FileIndex};
use crate::parse::ParseFrontend;
use regex::Regex;
use std::sync::LazyLock;

static USE_LOCAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buse\s+(?:crate|super|self)::([\w:]+)").expect("valid Rust use pattern")
});

static MOD_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmod\s+(\w+)\s*;").expect("valid Rust mod pattern"));

pub struct RustFrontend;

impl RustFrontend {
    pub fn new() -> Self {
        Self
    }

    /// `graph::builder::` -> `graph/builder`
    fn module_path(path: &str) -> String {
        path.trim_end_matches(':').replace("::", "/")
    }
}

impl Default for RustFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseFrontend for RustFrontend {
    fn scan(&self, content: &str) -> Vec<RawReference> {
        let uses = USE_LOCAL
            .captures_iter(content)
            .map(|caps| Self::module_path(&caps[1]))
            .filter(|path| !path.is_empty())
            .map(RawReference::relative);
        let mods = MOD_DECL
            .captures_iter(content)
            .map(|caps| RawReference::mod_declaration(&caps[1]));
        uses.chain(mods).collect()
    }

    fn resolve(
        &self,
        from_dir: &str,
        reference: &RawReference,
        files: &dyn FileIndex,
    ) -> Option<String> {
        match reference.kind {
            ReferenceKind::RelativeModule { .. } | ReferenceKind::ModDeclaration => {
                let base = join(from_dir, &reference.text);
                first_existing([format!("{base}.rs"), format!("{base}/mod.rs")], files)
            }
            ReferenceKind::AbsoluteModule => None,
        }
    }
}
