use crate::graph::ir::{Adjacency, DependencyGraph};
use std::collections::BTreeSet;

/// Resolved edges discovered in one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEdges {
    pub source: String,
    pub targets: BTreeSet<String>,
}

/// Builds a DependencyGraph with per-source edge deduplication.
///
/// Forward and reverse maps are only ever updated together.
pub struct GraphBuilder {
    forward: Adjacency,
    reverse: Adjacency,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            forward: Adjacency::new(),
            reverse: Adjacency::new(),
        }
    }

    /// Register a source file's resolved targets.
    ///
    /// An empty target set leaves the graph untouched. Calling this twice for
    /// the same source unions the sets.
    pub fn add_file<S, I, T>(&mut self, source: S, targets: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let targets: BTreeSet<String> = targets.into_iter().map(Into::into).collect();
        if targets.is_empty() {
            return;
        }
        let source = source.into();
        for target in &targets {
            self.reverse
                .entry(target.clone())
                .or_default()
                .insert(source.clone());
        }
        self.forward.entry(source).or_default().extend(targets);
    }

    pub fn add_edges(&mut self, edges: FileEdges) {
        self.add_file(edges.source, edges.targets);
    }

    /// Consume the builder and return the built graph.
    pub fn build(self) -> DependencyGraph {
        DependencyGraph {
            forward: self.forward,
            reverse: self.reverse,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<FileEdges> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = FileEdges>>(iter: I) -> Self {
        let mut builder = GraphBuilder::new();
        for edges in iter {
            builder.add_edges(edges);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deduplicates_targets() {
        let mut builder = GraphBuilder::new();
        builder.add_file("a.go", ["b.go", "b.go", "c.go"]);
        let graph = builder.build();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.dependents("b.go").len(), 1);
    }

    #[test]
    fn empty_target_sets_are_absent() {
        let mut builder = GraphBuilder::new();
        builder.add_file("a.go", Vec::<String>::new());
        let graph = builder.build();
        assert!(graph.is_empty());
        assert!(graph.forward().is_empty());
        assert!(graph.reverse().is_empty());
    }

    #[test]
    fn repeated_source_unions_targets() {
        let mut builder = GraphBuilder::new();
        builder.add_file("a.rs", ["b.rs"]);
        builder.add_file("a.rs", ["c.rs", "b.rs"]);
        let graph = builder.build();
        assert_eq!(graph.dependencies("a.rs").len(), 2);
        assert!(graph.is_consistent());
    }

    #[test]
    fn self_loops_are_kept() {
        let mut builder = GraphBuilder::new();
        builder.add_file("pkg/__init__.py", ["pkg/__init__.py"]);
        let graph = builder.build();
        assert!(graph.dependencies("pkg/__init__.py").contains("pkg/__init__.py"));
        assert!(graph.dependents("pkg/__init__.py").contains("pkg/__init__.py"));
        assert!(graph.is_consistent());
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let edges = vec![
            FileEdges {
                source: "a".into(),
                targets: ["b".to_string(), "c".to_string()].into(),
            },
            FileEdges {
                source: "b".into(),
                targets: ["a".to_string()].into(),
            },
            FileEdges {
                source: "c".into(),
                targets: ["c".to_string()].into(),
            },
        ];
        let forward: DependencyGraph = edges.iter().cloned().collect();
        let backward: DependencyGraph = edges.into_iter().rev().collect();
        assert_eq!(forward, backward);
    }
}
