use depatlas::{extract, FileEdges, GraphBuilder, MemorySource};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn node(i: usize) -> String {
    format!("src/mod_{i}.py")
}

fn edges_from(pairs: &[(usize, usize)]) -> Vec<FileEdges> {
    pairs
        .iter()
        .map(|&(from, to)| FileEdges {
            source: node(from),
            targets: BTreeSet::from([node(to)]),
        })
        .collect()
}

/// A relative specifier built from `..`, `.` and name segments.
fn specifier() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof!["\\.\\.", "\\.", "[a-c]{1,2}"], 1..6).prop_map(|segs| {
        let joined = segs.join("/");
        if joined.starts_with('.') {
            joined
        } else {
            format!("./{joined}")
        }
    })
}

proptest! {
    #[test]
    fn forward_and_reverse_are_symmetric(
        pairs in prop::collection::vec((0usize..30, 0usize..30), 0..150)
    ) {
        let graph: depatlas::DependencyGraph = edges_from(&pairs).into_iter().collect();
        prop_assert!(graph.is_consistent());
        for (from, to) in graph.edges() {
            prop_assert!(graph.dependents(to).contains(from));
        }
        for (target, sources) in graph.reverse() {
            for source in sources {
                prop_assert!(graph.dependencies(source).contains(target));
            }
        }
    }

    #[test]
    fn edge_count_matches_distinct_pairs(
        pairs in prop::collection::vec((0usize..20, 0usize..20), 0..100)
    ) {
        let distinct: BTreeSet<_> = pairs.iter().collect();
        let mut builder = GraphBuilder::new();
        for edges in edges_from(&pairs) {
            builder.add_edges(edges);
        }
        prop_assert_eq!(builder.build().edge_count(), distinct.len());
    }

    #[test]
    fn insertion_order_is_irrelevant(
        pairs in prop::collection::vec((0usize..20, 0usize..20), 0..100)
    ) {
        let forward: depatlas::DependencyGraph = edges_from(&pairs).into_iter().collect();
        let backward: depatlas::DependencyGraph = edges_from(&pairs).into_iter().rev().collect();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn extraction_is_idempotent_and_contained(
        imports in prop::collection::vec(prop::collection::vec(0usize..12, 0..5), 1..12)
    ) {
        let mut source = MemorySource::new();
        for (i, targets) in imports.iter().enumerate() {
            let body: String = targets
                .iter()
                .map(|t| format!("import mod_{t}\n"))
                .collect();
            source.insert(node(i), body);
        }
        let snapshot = source.snapshot();
        let first = extract(&snapshot, &source);
        let second = extract(&snapshot, &source);
        prop_assert_eq!(&first.graph, &second.graph);

        for path in first.graph.nodes() {
            prop_assert!(snapshot.contains(path), "{} not in snapshot", path);
        }
    }

    #[test]
    fn relative_specifiers_never_escape(spec in specifier()) {
        let mut source = MemorySource::new()
            .with_file("web/src/app.js", format!("require('{spec}')\n"));
        for path in ["web/src/a.js", "web/b.js", "c.js", "web/src/a/b.ts", "a.js"] {
            source.insert(path, "");
        }
        let snapshot = source.snapshot();
        let result = extract(&snapshot, &source);
        for target in result.graph.dependencies("web/src/app.js") {
            prop_assert!(!target.starts_with(".."));
            prop_assert!(snapshot.contains(target));
        }
    }
}
