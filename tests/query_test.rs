/// Traversal engine tests over small hand-built graphs
#[cfg(test)]
mod traversal_tests {
    use std::collections::HashSet;
    use travlogs::graph::{BuildGraph, DependencyGraph, NameRegistry};
    use travlogs::{Direction, NameFilter, TravlogError};

    fn graph_of(edges: &[(&str, &str)]) -> BuildGraph {
        let mut names = NameRegistry::new();
        let mut dag = DependencyGraph::new();
        for (from, to) in edges {
            let f = names.insert(from);
            let t = names.insert(to);
            dag.add_edge(f, t);
        }
        BuildGraph::new(names, dag)
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_linear_chain() {
        let g = graph_of(&[("A", "B"), ("B", "C")]);
        assert_eq!(
            g.find_ends(&["A"], Direction::Dependents, |_| true).unwrap(),
            set(&["C"])
        );
        assert_eq!(
            g.find_ends(&["C"], Direction::Dependencies, |_| true).unwrap(),
            set(&["A"])
        );
    }

    #[test]
    fn test_phantom_dependency_is_pruned_by_default() {
        let g = graph_of(&[("origin", "||phantom"), ("||phantom", "D")]);
        let ends = g.find_ends(&["origin"], Direction::Dependents, |_| true).unwrap();
        assert_eq!(ends, set(&["origin"]));

        let paths = g.find_paths(&["origin"], Direction::Dependents, |_| true).unwrap();
        assert_eq!(paths, vec![vec!["origin".to_string()]]);
    }

    #[test]
    fn test_phantom_start_is_still_walked() {
        // the marker only prunes steps, never start nodes
        let g = graph_of(&[("origin", "||phantom"), ("||phantom", "D")]);
        let ends = g.find_ends(&["||phantom"], Direction::Dependents, |_| true).unwrap();
        assert_eq!(ends, set(&["D"]));
    }

    #[test]
    fn test_diamond_path_enumeration() {
        let g = graph_of(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let paths: HashSet<Vec<String>> = g
            .find_paths(&["A"], Direction::Dependents, |_| true)
            .unwrap()
            .into_iter()
            .collect();
        let expected: HashSet<Vec<String>> = [
            vec!["A".to_string(), "B".to_string(), "D".to_string()],
            vec!["A".to_string(), "C".to_string(), "D".to_string()],
        ]
        .into_iter()
        .collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_stacked_diamonds_multiply_paths() {
        let g = graph_of(&[
            ("A", "B1"),
            ("A", "B2"),
            ("B1", "C"),
            ("B2", "C"),
            ("C", "D1"),
            ("C", "D2"),
            ("D1", "E"),
            ("D2", "E"),
        ]);
        let paths = g.find_paths(&["A"], Direction::Dependents, |_| true).unwrap();
        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|p| p.first().unwrap() == "A" && p.last().unwrap() == "E"));
        let ends = g.find_ends(&["A"], Direction::Dependents, |_| true).unwrap();
        assert_eq!(ends, set(&["E"]));
    }

    #[test]
    fn test_different_predicates_different_sinks() {
        let g = graph_of(&[
            ("main.cc", "main.o"),
            ("/usr/include/stdio.h", "main.o"),
            ("main.o", "app"),
        ]);
        let system = NameFilter::exclude(["/usr/*"]).unwrap();
        let everything = NameFilter::accept_all();
        assert_eq!(
            g.sources_from_targets(&["app"], &everything).unwrap(),
            set(&["main.cc", "/usr/include/stdio.h"])
        );
        assert_eq!(
            g.sources_from_targets(&["app"], &system).unwrap(),
            set(&["main.cc"])
        );
    }

    #[test]
    fn test_unresolved_names_all_reported() {
        let g = graph_of(&[("known", "out")]);
        let err = g
            .find_paths(&["known", "unknown1", "unknown2"], Direction::Dependents, |_| true)
            .unwrap_err();
        let TravlogError::UnresolvedStartNames { names } = err else {
            panic!("expected UnresolvedStartNames");
        };
        assert_eq!(names, vec!["unknown1", "unknown2"]);
        assert!(travlogs::error::is_query_error(&TravlogError::UnresolvedStartNames { names }));

        // the graph is still usable for a corrected query
        assert_eq!(
            g.find_ends(&["known"], Direction::Dependents, |_| true).unwrap(),
            set(&["out"])
        );
    }

    #[test]
    fn test_multiple_starts_share_visited_set() {
        let g = graph_of(&[("a.c", "a.o"), ("b.c", "b.o"), ("a.o", "app"), ("b.o", "app")]);
        let ends = g
            .find_ends(&["a.c", "b.c"], Direction::Dependents, |_| true)
            .unwrap();
        assert_eq!(ends, set(&["app"]));
        let paths = g
            .find_paths(&["a.c", "b.c"], Direction::Dependents, |_| true)
            .unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_readers_can_share_graph_across_threads() {
        let g = graph_of(&[("A", "B"), ("B", "C")]);
        std::thread::scope(|s| {
            let forward = s.spawn(|| g.find_ends(&["A"], Direction::Dependents, |_| true).unwrap());
            let backward =
                s.spawn(|| g.find_ends(&["C"], Direction::Dependencies, |_| true).unwrap());
            assert_eq!(forward.join().unwrap(), set(&["C"]));
            assert_eq!(backward.join().unwrap(), set(&["A"]));
        });
    }
}
