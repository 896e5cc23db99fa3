use eis_challenges::edge_irregularity::*;
use serde_json::json;

const SEED: [u8; 32] = [7; 32];

fn cell(row: u32, col: u32) -> GridVertex {
    GridVertex::Cell { row, col }
}

#[test]
fn test_mongolian_tent_shape() {
    for n in 1..=6 {
        let graph = generators::mongolian_tent(n);
        assert_eq!(graph.num_vertices(), 3 * n + 1);
        assert_eq!(graph.num_edges(), 6 * n - 3);
    }
    let graph = generators::mongolian_tent(1);
    let apex = graph.index_of(&GridVertex::Apex).unwrap();
    let top = graph.index_of(&cell(1, 1)).unwrap();
    let middle = graph.index_of(&cell(2, 1)).unwrap();
    let bottom = graph.index_of(&cell(3, 1)).unwrap();
    assert_eq!(graph.neighbors(apex), &[top]);
    assert!(graph.neighbors(middle).contains(&top));
    assert!(graph.neighbors(middle).contains(&bottom));
    assert!(!graph.neighbors(apex).contains(&bottom));
    assert_eq!(generators::mongolian_tent(0).num_vertices(), 0);
}

#[test]
fn test_ladder_shape() {
    let graph = generators::ladder(4);
    assert_eq!(graph.num_vertices(), 12);
    assert_eq!(graph.num_edges(), 3 * 3 + 2 * 4);
    assert_eq!(graph.max_degree(), 4);
    assert_eq!(graph.diameter(), Some(5));
}

#[test]
fn test_lower_bound_mongolian_tent() {
    assert_eq!(lower_bound(&generators::mongolian_tent(1)), 2);
    assert_eq!(lower_bound(&generators::mongolian_tent(2)), 5);
    assert_eq!(lower_bound(&generators::mongolian_tent(3)), 8);
    assert_eq!(lower_bound(&generators::mongolian_tent(5)), 14);
}

#[test]
fn test_lower_bound_degenerate_graphs() {
    assert_eq!(lower_bound(&Graph::<u32>::new()), 0);
    let mut isolated = Graph::new();
    isolated.add_vertex(1u32);
    isolated.add_vertex(2u32);
    assert_eq!(lower_bound(&isolated), 1);

    // a star is bounded by its degree rather than its edge count
    let star = Graph::from_edges((1..=6u32).map(|leaf| (0u32, leaf))).unwrap();
    assert_eq!(lower_bound(&star), 6);
}

#[test]
fn test_circulant_generator_and_bound() {
    let graph = generators::circulant(12, 4).unwrap();
    assert_eq!(graph.num_vertices(), 12);
    assert_eq!(graph.num_edges(), 24);
    assert!(graph.is_regular(4));
    assert_eq!(graph.diameter(), Some(3));
    assert_eq!(circulant_lower_bound(12, 4), 13);
    assert_eq!(circulant_lower_bound(12, 4), lower_bound(&graph));

    let odd = generators::circulant(8, 3).unwrap();
    assert!(odd.is_regular(3));
    assert_eq!(odd.num_edges(), 12);

    assert!(generators::circulant(9, 3).is_err());
    assert!(generators::circulant(5, 0).is_err());
    assert!(generators::circulant(2, 1).is_err());
}

#[test]
fn test_random_graph_is_seeded() {
    let a = generators::random(&SEED, 12, 400).unwrap();
    let b = generators::random(&SEED, 12, 400).unwrap();
    assert_eq!(a.num_vertices(), 12);
    assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    assert!(generators::random(&SEED, 5, 1001).is_err());
    assert_eq!(generators::random(&SEED, 6, 1000).unwrap().num_edges(), 15);
}

#[test]
fn test_graph_rejects_self_loops_and_collapses_parallel_edges() {
    let mut graph = Graph::new();
    assert!(graph.add_edge("a", "a").is_err());
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("b", "a").unwrap();
    assert_eq!(graph.num_edges(), 1);

    let from_adj = Graph::from_adjacency(vec![
        ("a", vec!["b", "c"]),
        ("b", vec!["a"]),
        ("c", vec!["a"]),
        ("d", vec![]),
    ])
    .unwrap();
    assert_eq!(from_adj.num_vertices(), 4);
    assert_eq!(from_adj.num_edges(), 2);
    assert_eq!(from_adj.diameter(), None);
}

#[test]
fn test_verify_labeling_with_huge_labels() {
    let graph = Graph::from_edges([(0u32, 1), (1, 2)]).unwrap();
    let max = u32::MAX;
    assert_eq!(
        verify_labeling(&graph, &[max, max, max], max),
        Err(LabelingError::DuplicateWeight {
            first: (0, 1),
            second: (1, 2),
            weight: 2 * max as u64,
        })
    );
    assert!(is_valid_labeling(&graph, &[max, max, max - 1], max));
    assert_eq!(
        edge_weights(&graph, &[max, max, 1]),
        vec![2 * max as u64, max as u64 + 1]
    );

    let single = Graph::from_edges([(0u32, 1)]).unwrap();
    assert!(is_valid_labeling(&single, &[max, max], max));
}

#[test]
fn test_verify_labeling() {
    // path a - b - c - d
    let graph = Graph::from_edges(vec![("a", "b"), ("b", "c"), ("c", "d")]).unwrap();
    assert!(is_valid_labeling(&graph, &[1, 1, 2, 2], 2));
    assert_eq!(edge_weights(&graph, &[1, 1, 2, 2]), vec![2, 3, 4]);

    assert_eq!(
        verify_labeling(&graph, &[1, 2, 1, 2], 2),
        Err(LabelingError::DuplicateWeight {
            first: (0, 1),
            second: (1, 2),
            weight: 3,
        })
    );
    assert_eq!(
        verify_labeling(&graph, &[1, 1, 2, 3], 2),
        Err(LabelingError::LabelOutOfRange {
            vertex: 3,
            label: 3,
            k: 2
        })
    );
    assert_eq!(
        verify_labeling(&graph, &[0, 1, 2, 2], 2),
        Err(LabelingError::LabelOutOfRange {
            vertex: 0,
            label: 0,
            k: 2
        })
    );
    assert_eq!(
        verify_labeling(&graph, &[1, 1, 2], 2),
        Err(LabelingError::WrongLength {
            expected: 4,
            actual: 3
        })
    );
}

#[test]
fn test_challenge_boundaries() {
    assert!(Challenge::new(&SEED, Graph::<u32>::new()).is_err());
    assert!(Challenge::mongolian_tent(&SEED, 0).is_err());

    let challenge = Challenge::circulant(&SEED, 12, 4).unwrap();
    assert_eq!(challenge.known_lower_bound, Some(13));
    assert_eq!(challenge.lower_bound(), 13);

    let challenge = Challenge::mongolian_tent(&SEED, 1).unwrap();
    let apex = challenge.graph.index_of(&GridVertex::Apex).unwrap();
    let mut labels = vec![0; 4];
    for (v, label) in [(cell(1, 1), 1), (cell(2, 1), 2), (cell(3, 1), 2)] {
        labels[challenge.graph.index_of(&v).unwrap()] = label;
    }
    labels[apex] = 1;
    let solution = Solution { k: 2, labels };
    assert!(challenge.verify_solution(&solution).is_ok());
    assert_eq!(solution.label_map(&challenge.graph)[&GridVertex::Apex], 1);

    let bad = Solution {
        k: 2,
        labels: vec![1; 4],
    };
    assert!(challenge.verify_solution(&bad).is_err());
}

#[test]
fn test_solution_from_json_map() {
    let value = json!({ "k": 3, "labels": [1, 2, 3] });
    let solution = Solution::try_from(value.as_object().unwrap().clone()).unwrap();
    assert_eq!(solution.k, 3);
    assert_eq!(solution.labels, vec![1, 2, 3]);

    let broken = json!({ "labels": "nope" });
    assert!(Solution::try_from(broken.as_object().unwrap().clone()).is_err());
}

#[test]
fn test_graph_family_parsing() {
    assert_eq!(
        "mongolian_tent:3".parse::<GraphFamily>().unwrap(),
        GraphFamily::MongolianTent { n: 3 }
    );
    assert_eq!(
        "circulant:12:4".parse::<GraphFamily>().unwrap(),
        GraphFamily::Circulant { n: 12, r: 4 }
    );
    assert_eq!(
        "random:10:300".parse::<GraphFamily>().unwrap().to_string(),
        "random:10:300"
    );
    assert!("circulant:12".parse::<GraphFamily>().is_err());
    assert!("hexagon:3".parse::<GraphFamily>().is_err());
    assert!("ladder:x".parse::<GraphFamily>().is_err());
}
