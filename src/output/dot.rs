use crate::errors::Result;
use crate::graph::ir::DependencyGraph;
use std::io::Write;

fn quote(path: &str) -> String {
    format!("\"{}\"", path.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Write the dependency graph in Graphviz DOT format.
pub fn write_dot<W: Write>(writer: &mut W, graph: &DependencyGraph) -> Result<()> {
    writeln!(writer, "digraph dependencies {{")?;
    writeln!(writer, "    rankdir=LR;")?;
    writeln!(
        writer,
        "    node [shape=box, style=filled, fillcolor=lightblue];"
    )?;
    writeln!(writer)?;

    for node in graph.nodes() {
        writeln!(writer, "    {};", quote(node))?;
    }
    writeln!(writer)?;

    for (source, target) in graph.edges() {
        writeln!(writer, "    {} -> {};", quote(source), quote(target))?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    #[test]
    fn dot_output_lists_nodes_and_edges() {
        let mut builder = GraphBuilder::new();
        builder.add_file("cmd/main.go", ["cmd/helpers.go"]);
        let graph = builder.build();

        let mut out = Vec::new();
        write_dot(&mut out, &graph).unwrap();
        let dot = String::from_utf8(out).unwrap();

        assert!(dot.starts_with("digraph dependencies {"));
        assert!(dot.contains("    \"cmd/helpers.go\";"));
        assert!(dot.contains("\"cmd/main.go\" -> \"cmd/helpers.go\";"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn dot_escapes_quotes() {
        assert_eq!(quote("we\"ird.py"), "\"we\\\"ird.py\"");
    }
}
