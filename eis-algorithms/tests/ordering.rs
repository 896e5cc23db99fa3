use eis_algorithms::edge_irregularity::ordering::*;
use eis_challenges::edge_irregularity::Graph;
use rand::{rngs::SmallRng, SeedableRng};

/// Center 0 with leaves 1..=4, plus the pendant path 4-5-6.
fn broom() -> Graph<u32> {
    Graph::from_edges([(0, 1), (0, 2), (0, 3), (0, 4), (4, 5), (5, 6)]).unwrap()
}

fn ids(graph: &Graph<u32>, order: &[usize]) -> Vec<u32> {
    order.iter().map(|&i| *graph.vertex(i)).collect()
}

#[test]
fn test_degree_order() {
    let graph = broom();
    assert_eq!(ids(&graph, &degree_order(&graph)), vec![0, 4, 5, 1, 2, 3, 6]);
}

#[test]
fn test_failure_order_puts_failing_vertices_first() {
    let graph = broom();
    let mut failures = FailureCounters::new(graph.num_vertices());
    let six = graph.index_of(&6).unwrap();
    let two = graph.index_of(&2).unwrap();
    failures.bump(six);
    failures.bump(six);
    failures.bump(two);
    assert_eq!(failures.total(), 3);
    assert_eq!(
        ids(&graph, &failure_order(&graph, &failures)),
        vec![6, 2, 0, 4, 5, 1, 3]
    );

    failures.reset();
    assert_eq!(failures.total(), 0);
    assert_eq!(failure_order(&graph, &failures), degree_order(&graph));
}

#[test]
fn test_degree_biased_order_keeps_failure_groups() {
    let graph = broom();
    let mut failures = FailureCounters::new(graph.num_vertices());
    let five = graph.index_of(&5).unwrap();
    failures.bump(five);
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..20 {
        let order = degree_biased_order(&graph, &failures, 4, &mut rng);
        assert_eq!(order[0], five);
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, (0..graph.num_vertices()).collect::<Vec<_>>());
    }
}

#[test]
fn test_degree_biased_order_single_bucket_per_vertex_is_fixed() {
    let graph = broom();
    let failures = FailureCounters::new(graph.num_vertices());
    let mut rng = SmallRng::seed_from_u64(11);
    // one vertex per bucket leaves nothing to shuffle
    let order = degree_biased_order(&graph, &failures, graph.num_vertices(), &mut rng);
    assert_eq!(order, degree_order(&graph));
}
