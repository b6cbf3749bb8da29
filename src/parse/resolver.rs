//! Path helpers shared by the per-language resolvers.
//!
//! All paths here are POSIX-style strings relative to the repository root.
//! The root itself is the empty string.

use std::collections::{BTreeSet, HashSet};

/// Existence check used during resolution.
pub trait FileIndex: Sync {
    /// True if `relative_path` names a regular file in the repository.
    fn is_file(&self, relative_path: &str) -> bool;
}

impl FileIndex for HashSet<String> {
    fn is_file(&self, relative_path: &str) -> bool {
        self.contains(relative_path)
    }
}

impl FileIndex for BTreeSet<String> {
    fn is_file(&self, relative_path: &str) -> bool {
        self.contains(relative_path)
    }
}

/// Directory part of a relative path ("" for root-level files).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}

/// Join `tail` onto `dir` without normalizing.
pub fn join(dir: &str, tail: &str) -> String {
    if dir.is_empty() {
        tail.to_string()
    } else if tail.is_empty() {
        dir.to_string()
    } else {
        format!("{dir}/{tail}")
    }
}

/// Collapse `.` and `..` segments and empty segments.
///
/// Returns None if the path climbs above the repository root.
pub fn normalize(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

/// Join then normalize; None on escape or when the result is the root itself.
pub fn join_normalized(dir: &str, tail: &str) -> Option<String> {
    let joined = normalize(&join(dir, tail))?;
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Return the first candidate that names an existing file.
pub fn first_existing<I>(candidates: I, files: &dyn FileIndex) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    candidates.into_iter().find(|c| files.is_file(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_dir_of_nested_and_root_files() {
        assert_eq!(parent_dir("pkg/sub/a.py"), "pkg/sub");
        assert_eq!(parent_dir("a.py"), "");
    }

    #[test]
    fn join_handles_root() {
        assert_eq!(join("", "a/b"), "a/b");
        assert_eq!(join("src", "util"), "src/util");
        assert_eq!(join("src", ""), "src");
    }

    #[test]
    fn normalize_collapses_dots() {
        assert_eq!(normalize("src/./lib/../util").as_deref(), Some("src/util"));
        assert_eq!(normalize("src//util/").as_deref(), Some("src/util"));
        assert_eq!(normalize("a/..").as_deref(), Some(""));
    }

    #[test]
    fn normalize_rejects_escape() {
        assert_eq!(normalize("../x"), None);
        assert_eq!(normalize("src/../../x"), None);
    }

    #[test]
    fn join_normalized_rejects_root_and_escape() {
        assert_eq!(join_normalized("src", "./util").as_deref(), Some("src/util"));
        assert_eq!(join_normalized("src", ".."), None);
        assert_eq!(join_normalized("", "../lib"), None);
    }

    #[test]
    fn first_existing_respects_order() {
        let files: HashSet<String> = ["a.py", "a/__init__.py"].iter().map(|s| s.to_string()).collect();
        let hit = first_existing(
            vec!["a".to_string(), "a.py".to_string(), "a/__init__.py".to_string()],
            &files,
        );
        assert_eq!(hit.as_deref(), Some("a.py"));
        assert_eq!(first_existing(vec!["b.py".to_string()], &files), None);
    }
}
