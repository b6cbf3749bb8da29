use crate::parse::common::{RawReference, ReferenceKind};
use crate::parse::resolver::{first_existing, join, FileIndex};
use crate::parse::ParseFrontend;
use regex::Regex;
use std::sync::LazyLock;

static IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^import\s+([\w.]+)").expect("valid Python import pattern"));

static FROM_ABSOLUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^from\s+(\w[\w.]*)\s+import\b").expect("valid Python from-import pattern")
});

static FROM_RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^from\s+(\.+)([\w.]*)\s+import\b").expect("valid Python relative pattern")
});

pub struct PythonFrontend;

impl PythonFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Scan one trimmed line; only the first matching pattern counts.
    fn scan_line(line: &str) -> Option<RawReference> {
        if let Some(caps) = IMPORT.captures(line) {
            return Some(RawReference::absolute(&caps[1]));
        }
        if let Some(caps) = FROM_ABSOLUTE.captures(line) {
            return Some(RawReference::absolute(&caps[1]));
        }
        if let Some(caps) = FROM_RELATIVE.captures(line) {
            let level = caps[1].len();
            return Some(RawReference::relative_with_level(&caps[2], level));
        }
        None
    }
}

impl Default for PythonFrontend {
    fn default() -> Self {
        Self::new()
    }
}

/// `a.b.c` -> `a/b/c`; None if any segment is empty.
fn module_path(dotted: &str) -> Option<String> {
    if dotted.split('.').any(str::is_empty) {
        return None;
    }
    Some(dotted.replace('.', "/"))
}

impl ParseFrontend for PythonFrontend {
    fn scan(&self, content: &str) -> Vec<RawReference> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::scan_line)
            .collect()
    }

    fn resolve(
        &self,
        from_dir: &str,
        reference: &RawReference,
        files: &dyn FileIndex,
    ) -> Option<String> {
        match reference.kind {
            ReferenceKind::AbsoluteModule => {
                let module = module_path(&reference.text)?;
                // Package-local candidates win over root-relative ones
                let local = join(from_dir, &module);
                first_existing(
                    [
                        local.clone(),
                        format!("{local}.py"),
                        format!("{local}/__init__.py"),
                        module.clone(),
                        format!("{module}.py"),
                    ],
                    files,
                )
            }
            ReferenceKind::RelativeModule { level } => {
                if level > 1 {
                    tracing::debug!(
                        "relative import with {level} leading dots resolved against {:?}, parents are not ascended",
                        from_dir
                    );
                }
                if reference.text.is_empty() {
                    return first_existing([join(from_dir, "__init__.py")], files);
                }
                let local = join(from_dir, &module_path(&reference.text)?);
                first_existing([local.clone(), format!("{local}.py")], files)
            }
            ReferenceKind::ModDeclaration => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn files(paths: &[&str]) -> HashSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn scans_simple_import() {
        let refs = PythonFrontend::new().scan("import os");
        assert_eq!(refs, vec![RawReference::absolute("os")]);
    }

    #[test]
    fn scans_dotted_import() {
        let refs = PythonFrontend::new().scan("import os.path, sys");
        assert_eq!(refs, vec![RawReference::absolute("os.path")]);
    }

    #[test]
    fn scans_from_import() {
        let refs = PythonFrontend::new().scan("from foo.bar import baz");
        assert_eq!(refs, vec![RawReference::absolute("foo.bar")]);
    }

    #[test]
    fn scans_relative_imports_with_level() {
        let source = "from . import utils\nfrom ..config import settings\n";
        let refs = PythonFrontend::new().scan(source);
        assert_eq!(
            refs,
            vec![
                RawReference::relative_with_level("", 1),
                RawReference::relative_with_level("config", 2),
            ]
        );
    }

    #[test]
    fn ignores_comments_blank_and_indented_code() {
        let source = "# import hidden\n\n    import inner\nx = 1  # from a import b\n";
        let refs = PythonFrontend::new().scan(source);
        // Indentation is trimmed, so the nested import is still seen
        assert_eq!(refs, vec![RawReference::absolute("inner")]);
    }

    #[test]
    fn parenthesized_lists_only_yield_the_first_line() {
        let source = "from pkg.mod import (\n    a,\n    b,\n)\n";
        let refs = PythonFrontend::new().scan(source);
        assert_eq!(refs, vec![RawReference::absolute("pkg.mod")]);
    }

    #[test]
    fn resolves_package_local_before_root() {
        let index = files(&["pkg/util.py", "util.py"]);
        let resolved =
            PythonFrontend::new().resolve("pkg", &RawReference::absolute("util"), &index);
        assert_eq!(resolved.as_deref(), Some("pkg/util.py"));
    }

    #[test]
    fn resolves_package_init_then_root_module() {
        let frontend = PythonFrontend::new();
        let index = files(&["app/models/__init__.py", "core/db.py"]);
        assert_eq!(
            frontend
                .resolve("app", &RawReference::absolute("models"), &index)
                .as_deref(),
            Some("app/models/__init__.py")
        );
        assert_eq!(
            frontend
                .resolve("app", &RawReference::absolute("core.db"), &index)
                .as_deref(),
            Some("core/db.py")
        );
    }

    #[test]
    fn root_lookup_does_not_try_package_init() {
        let index = files(&["core/__init__.py"]);
        let resolved =
            PythonFrontend::new().resolve("app", &RawReference::absolute("core"), &index);
        assert_eq!(resolved, None);
    }

    #[test]
    fn external_modules_are_unresolved() {
        let index = files(&["app/main.py"]);
        assert_eq!(
            PythonFrontend::new().resolve("app", &RawReference::absolute("requests"), &index),
            None
        );
    }

    #[test]
    fn bare_relative_import_resolves_to_package_init() {
        let index = files(&["pkg/__init__.py", "pkg/a.py"]);
        let resolved = PythonFrontend::new().resolve(
            "pkg",
            &RawReference::relative_with_level("", 1),
            &index,
        );
        assert_eq!(resolved.as_deref(), Some("pkg/__init__.py"));
    }

    #[test]
    fn named_relative_import_resolves_in_same_directory() {
        let index = files(&["pkg/helpers.py"]);
        let resolved = PythonFrontend::new().resolve(
            "pkg",
            &RawReference::relative_with_level("helpers", 1),
            &index,
        );
        assert_eq!(resolved.as_deref(), Some("pkg/helpers.py"));
    }

    #[test]
    fn multi_dot_relative_import_does_not_ascend() {
        // `from ..config import x` inside pkg/sub/ is looked up in pkg/sub/, not pkg/
        let index = files(&["pkg/config.py"]);
        let resolved = PythonFrontend::new().resolve(
            "pkg/sub",
            &RawReference::relative_with_level("config", 2),
            &index,
        );
        assert_eq!(resolved, None);
    }

    #[test]
    fn malformed_dotted_names_are_unresolved() {
        let index = files(&["a/b.py"]);
        assert_eq!(
            PythonFrontend::new().resolve("", &RawReference::absolute("a..b"), &index),
            None
        );
    }
}
