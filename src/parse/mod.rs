pub mod common;
pub mod factory;
pub mod go;
pub mod javascript;
pub mod python;
pub mod resolver;
pub mod rust;

pub use common::{RawReference, ReferenceKind};
pub use resolver::FileIndex;

/// Scanner and resolver pair, implemented once per supported language.
pub trait ParseFrontend: Send + Sync {
    /// Extract raw module references from a single file's text.
    ///
    /// Never fails: text that matches no pattern yields no reference.
    fn scan(&self, content: &str) -> Vec<RawReference>;

    /// Resolve a raw reference to a repository-relative file path.
    ///
    /// `from_dir` is the referencing file's directory relative to the
    /// repository root ("" for the root). Returns None if the reference is
    /// external, escapes the root, or matches no file in `files`.
    fn resolve(&self, from_dir: &str, reference: &RawReference, files: &dyn FileIndex)
        -> Option<String>;
}
