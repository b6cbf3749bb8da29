pub mod scc;
pub mod summary;
