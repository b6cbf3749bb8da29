pub mod builder;
pub mod ir;

pub use builder::{FileEdges, GraphBuilder};
pub use ir::DependencyGraph;
