use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Adjacency sets keyed by repository-relative path.
pub type Adjacency = BTreeMap<String, BTreeSet<String>>;

static EMPTY: BTreeSet<String> = BTreeSet::new();

/// File-level dependency graph, kept as a consistent forward/reverse pair.
///
/// `b ∈ forward[a]` iff `a ∈ reverse[b]`. Files without edges are absent
/// rather than mapped to an empty set. Cycles and self-loops are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    pub(crate) forward: Adjacency,
    pub(crate) reverse: Adjacency,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files that `path` depends on. Empty for unknown or edge-free paths.
    pub fn dependencies(&self, path: &str) -> &BTreeSet<String> {
        self.forward.get(path).unwrap_or(&EMPTY)
    }

    /// Files that depend on `path`. Empty for unknown or edge-free paths.
    pub fn dependents(&self, path: &str) -> &BTreeSet<String> {
        self.reverse.get(path).unwrap_or(&EMPTY)
    }

    pub fn forward(&self) -> &Adjacency {
        &self.forward
    }

    pub fn reverse(&self) -> &Adjacency {
        &self.reverse
    }

    /// All `(from, to)` edges in path order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |to| (from.as_str(), to.as_str())))
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum()
    }

    /// Every path that appears as a source or a target.
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.forward
            .keys()
            .chain(self.reverse.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Check the symmetry invariant between the two maps.
    pub fn is_consistent(&self) -> bool {
        let forward_ok = self
            .edges()
            .all(|(from, to)| self.dependents(to).contains(from));
        let reverse_ok = self.reverse.iter().all(|(to, sources)| {
            !sources.is_empty()
                && sources
                    .iter()
                    .all(|from| self.dependencies(from).contains(to.as_str()))
        });
        let no_empty_forward = self.forward.values().all(|t| !t.is_empty());
        forward_ok && reverse_ok && no_empty_forward
    }

    /// Copy into a petgraph graph for graph algorithms. Node weights are paths;
    /// node order follows path order.
    pub fn to_petgraph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();
        for node in self.nodes() {
            index.insert(node, graph.add_node(node.to_string()));
        }
        for (from, to) in self.edges() {
            graph.add_edge(index[from], index[to], ());
        }
        graph
    }
}
