use eis_algorithms::edge_irregularity::state::LabelingState;
use eis_challenges::edge_irregularity::Graph;

fn path() -> Graph<&'static str> {
    Graph::from_edges([("a", "b"), ("b", "c"), ("c", "d")]).unwrap()
}

#[test]
fn test_candidate_weights_against_labeled_neighbors() {
    let graph = path();
    let [a, b, c] = ["a", "b", "c"].map(|v| graph.index_of(&v).unwrap());
    let mut state = LabelingState::new(graph.num_vertices());
    let mut weights = Vec::new();

    assert!(state.candidate_weights(&graph, a, 1, &mut weights));
    assert!(weights.is_empty());
    state.assign(a, 1, &weights);

    assert!(state.candidate_weights(&graph, b, 1, &mut weights));
    assert_eq!(weights, vec![2]);
    state.assign(b, 1, &weights);

    // c = 1 would repeat weight 2 on b-c
    assert!(!state.candidate_weights(&graph, c, 1, &mut weights));
    assert!(state.candidate_weights(&graph, c, 2, &mut weights));
    assert_eq!(weights, vec![3]);
    assert_eq!(state.tracker().len(), 1);
}

#[test]
fn test_candidate_rejects_repeat_among_new_weights() {
    let graph = path();
    let [a, b, c] = ["a", "b", "c"].map(|v| graph.index_of(&v).unwrap());
    let mut state = LabelingState::new(graph.num_vertices());
    state.assign(a, 2, &[]);
    state.assign(c, 2, &[]);
    let mut weights = Vec::new();
    // b sits between two vertices labeled 2, so both of its edges weigh the same
    assert!(!state.candidate_weights(&graph, b, 1, &mut weights));
    assert!(!state.candidate_weights(&graph, b, 3, &mut weights));
}

#[test]
fn test_undo_releases_only_the_newest_assignment() {
    let graph = path();
    let [a, b, c, d] = ["a", "b", "c", "d"].map(|v| graph.index_of(&v).unwrap());
    let mut state = LabelingState::new(graph.num_vertices());
    let mut weights = Vec::new();
    for (vertex, label) in [(a, 1), (b, 1), (c, 2), (d, 2)] {
        assert!(state.candidate_weights(&graph, vertex, label, &mut weights));
        state.assign(vertex, label, &weights);
    }
    assert!(state.is_complete());
    assert_eq!(state.tracker().len(), 3);

    let undone = state.undo().unwrap();
    assert_eq!((undone.vertex, undone.label), (d, 2));
    assert_eq!(state.label(d), None);
    assert!(!state.tracker().is_used(4));
    assert!(state.tracker().is_used(3));
    assert_eq!(state.depth(), 3);

    state.undo();
    state.undo();
    state.undo();
    assert!(state.undo().is_none());
    assert!(state.tracker().is_empty());
    assert_eq!(state.labels(), &[0, 0, 0, 0]);
}
