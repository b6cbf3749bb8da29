use crate::errors::{DepAtlasError, Result};
use git2::{Commit, Delta, Repository, Tree};
use std::path::{Component, Path, PathBuf};

fn commit_at<'r>(repo: &'r Repository, reference: &str) -> Result<Commit<'r>> {
    let bad_ref = || DepAtlasError::BadRef {
        reference: reference.to_string(),
    };
    let obj = repo.revparse_single(reference).map_err(|_| bad_ref())?;
    obj.peel_to_commit().map_err(|_| bad_ref())
}

/// Location of `root` inside the repository's working directory.
fn scan_prefix(repo: &Repository, root: &Path) -> Result<PathBuf> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| git2::Error::from_str("repository has no working directory"))?
        .canonicalize()?;
    let root = root.canonicalize()?;
    let prefix = root
        .strip_prefix(&workdir)
        .map_err(|_| DepAtlasError::NoFiles { path: root.clone() })?;
    Ok(prefix.to_path_buf())
}

/// Non-deleted paths under `prefix` that differ between the trees. A missing
/// old tree reports every file of the new tree.
fn diff_paths(
    repo: &Repository,
    prefix: &Path,
    old_tree: Option<&Tree>,
    new_tree: &Tree,
) -> Result<Vec<String>> {
    let diff = repo.diff_tree_to_tree(old_tree, Some(new_tree), None)?;
    let mut files: Vec<String> = diff
        .deltas()
        .filter(|delta| delta.status() != Delta::Deleted)
        .filter_map(|delta| delta.new_file().path().map(Path::to_path_buf))
        .filter_map(|path| path.strip_prefix(prefix).ok().map(to_posix))
        .filter(|path| !path.is_empty())
        .collect();
    files.sort();
    files.dedup();
    Ok(files)
}

/// Files added, modified, copied or renamed between `base` and `head`
/// (default `HEAD`), as POSIX paths relative to `root`.
///
/// Deleted files and files outside `root` are omitted.
pub fn changed_files(root: &Path, base: &str, head: Option<&str>) -> Result<Vec<String>> {
    let repo = open_repo(root)?;
    let prefix = scan_prefix(&repo, root)?;

    let head = head.unwrap_or("HEAD");
    let old_tree = commit_at(&repo, base)?.tree()?;
    let new_tree = commit_at(&repo, head)?.tree()?;
    let files = diff_paths(&repo, &prefix, Some(&old_tree), &new_tree)?;

    tracing::debug!("{} files changed in {base}..{head}", files.len());
    Ok(files)
}

/// Files changed by the `HEAD` commit relative to its first parent.
///
/// A root commit has no parent, so all of its files count as added.
pub fn changed_in_head(root: &Path) -> Result<Vec<String>> {
    let repo = open_repo(root)?;
    let prefix = scan_prefix(&repo, root)?;

    let head = commit_at(&repo, "HEAD")?;
    let parent_tree = if head.parent_count() > 0 {
        Some(head.parent(0)?.tree()?)
    } else {
        tracing::debug!("HEAD is a root commit, treating all files as added");
        None
    };
    let files = diff_paths(&repo, &prefix, parent_tree.as_ref(), &head.tree()?)?;

    tracing::debug!("{} files changed in HEAD", files.len());
    Ok(files)
}

fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Open the git repository at the given path (or walk up to find one).
pub fn open_repo(path: &Path) -> Result<Repository> {
    Repository::discover(path).map_err(DepAtlasError::Git)
}
