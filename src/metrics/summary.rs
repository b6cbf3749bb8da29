use crate::graph::ir::DependencyGraph;
use crate::metrics::scc::Cycle;
use serde::Serialize;

/// Aggregate statistics for a dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub node_count: usize,
    pub edge_count: usize,
    pub mean_fanout: f64,
    pub max_fanout: usize,
    pub mean_fanin: f64,
    pub max_fanin: usize,
    pub cycle_count: usize,
    pub largest_cycle_size: usize,
    pub self_loops: usize,
}

impl Summary {
    /// Compute summary statistics from a graph and its cycles.
    pub fn from_graph(graph: &DependencyGraph, cycles: &[Cycle]) -> Self {
        let nodes = graph.nodes();
        let node_count = nodes.len();
        let edge_count = graph.edge_count();

        let max_fanout = graph.forward().values().map(|t| t.len()).max().unwrap_or(0);
        let max_fanin = graph.reverse().values().map(|s| s.len()).max().unwrap_or(0);
        // Every edge adds one to some fan-out and one to some fan-in
        let mean = if node_count > 0 {
            ((edge_count as f64 / node_count as f64) * 100.0).round() / 100.0
        } else {
            0.0
        };

        let self_loops = graph.edges().filter(|(from, to)| from == to).count();

        Self {
            node_count,
            edge_count,
            mean_fanout: mean,
            max_fanout,
            mean_fanin: mean,
            max_fanin,
            cycle_count: cycles.len(),
            largest_cycle_size: cycles.iter().map(|c| c.size).max().unwrap_or(0),
            self_loops,
        }
    }
}
