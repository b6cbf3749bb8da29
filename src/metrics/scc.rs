use crate::graph::ir::DependencyGraph;
use petgraph::algo::tarjan_scc;
use petgraph::visit::EdgeRef;
use serde::Serialize;

/// A non-trivial strongly connected component: files that reach each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub id: usize,
    pub size: usize,
    /// Member paths, sorted
    pub members: Vec<String>,
    pub internal_edges: usize,
}

/// Compute all non-trivial SCCs (size > 1 or self-loop) in the graph.
///
/// Output is sorted by first member so ids are stable across runs.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let pg = graph.to_petgraph();
    let mut cycles: Vec<(Vec<String>, usize)> = Vec::new();

    for scc in tarjan_scc(&pg) {
        let is_self_loop = scc.len() == 1 && {
            let node = scc[0];
            pg.edges_directed(node, petgraph::Direction::Outgoing)
                .any(|e| e.target() == node)
        };

        if scc.len() <= 1 && !is_self_loop {
            continue;
        }

        let mut members: Vec<String> = scc.iter().map(|&idx| pg[idx].clone()).collect();
        members.sort();

        // Edges where both endpoints are in this SCC
        let internal_edges = members
            .iter()
            .map(|m| {
                graph
                    .dependencies(m)
                    .iter()
                    .filter(|t| members.binary_search(*t).is_ok())
                    .count()
            })
            .sum();

        cycles.push((members, internal_edges));
    }

    cycles.sort();
    cycles
        .into_iter()
        .enumerate()
        .map(|(id, (members, internal_edges))| Cycle {
            id,
            size: members.len(),
            members,
            internal_edges,
        })
        .collect()
}
