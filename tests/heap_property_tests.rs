use k_shortest::data_structures::leftist_heap::{self, HeapRef};
use k_shortest::graph::{DirectedGraph, MutableGraph};
use k_shortest::{DistanceOracle, ReverseDijkstra, SidetrackForest};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::rc::Rc;

fn w(x: f64) -> OrderedFloat<f64> {
    OrderedFloat(x)
}

fn collect_keys(heap: &HeapRef<i64, usize>, out: &mut Vec<i64>) {
    if let Some(node) = heap {
        out.push(node.key());
        collect_keys(node.left(), out);
        collect_keys(node.right(), out);
    }
}

fn sorted_keys(heap: &HeapRef<i64, usize>) -> Vec<i64> {
    let mut keys = Vec::new();
    collect_keys(heap, &mut keys);
    keys.sort_unstable();
    keys
}

#[test]
fn invariants_hold_under_random_insertion_orders() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = rng.gen_range(1..200);

        let mut heap: HeapRef<i64, usize> = None;
        let mut inserted = Vec::new();

        for i in 0..count {
            let key = rng.gen_range(-1000..1000);
            inserted.push(key);
            heap = leftist_heap::insert(&heap, key, i);

            let root = heap.as_ref().unwrap();
            assert_eq!(root.assert_invariants(), i + 1, "seed {}", seed);
            assert_eq!(root.key(), *inserted.iter().min().unwrap(), "seed {}", seed);
        }

        let mut expected = inserted.clone();
        expected.sort_unstable();
        assert_eq!(sorted_keys(&heap), expected, "seed {}", seed);
    }
}

#[test]
fn every_published_version_survives_later_inserts() {
    let mut rng = StdRng::seed_from_u64(7);

    let mut versions: Vec<HeapRef<i64, usize>> = vec![None];
    let mut keys = Vec::new();

    for i in 0..60 {
        let key = rng.gen_range(-100..100);
        keys.push(key);
        let next = leftist_heap::insert(versions.last().unwrap(), key, i);
        versions.push(next);
    }

    // Version v must still contain exactly the first v keys, untouched by
    // everything inserted afterwards
    for (v, version) in versions.iter().enumerate() {
        let mut expected: Vec<i64> = keys[..v].to_vec();
        expected.sort_unstable();
        assert_eq!(sorted_keys(version), expected, "version {}", v);
        if let Some(root) = version {
            root.assert_invariants();
        }
    }
}

#[test]
fn insert_shares_subtrees_with_the_previous_version() {
    let mut heap: HeapRef<i64, usize> = None;
    for (i, key) in [50, 20, 70, 10, 60, 30].into_iter().enumerate() {
        heap = leftist_heap::insert(&heap, key, i);
    }

    // Inserting a key larger than the root leaves the root's left subtree
    // shared by reference with the old version
    let old_root = heap.as_ref().unwrap();
    let new = leftist_heap::insert(&heap, 999, 6);
    let new_root = new.as_ref().unwrap();

    let shared = [old_root.left(), old_root.right()]
        .into_iter()
        .flatten()
        .any(|old_child| {
            [new_root.left(), new_root.right()]
                .into_iter()
                .flatten()
                .any(|new_child| Rc::ptr_eq(old_child, new_child))
        });
    assert!(shared, "persistent insert should reuse untouched subtrees");
}

#[test]
fn forest_heaps_share_ancestor_subtrees() {
    // Target 0 with two children 1 and 2; the only sidetrack originates at
    // the target itself, so both children inherit the target's heap as-is
    let mut graph = DirectedGraph::with_vertices(3);
    graph.add_edge(1, 0, w(1.0));
    graph.add_edge(2, 0, w(1.0));
    graph.add_edge(0, 1, w(1.0));

    let paths = ReverseDijkstra::new().distances_to(&graph, 0).unwrap();
    let forest = SidetrackForest::build(&graph, &paths);

    let root0 = forest.root(0).as_ref().expect("target owns one sidetrack");
    let root1 = forest.root(1).as_ref().expect("child inherits the heap");
    let root2 = forest.root(2).as_ref().expect("child inherits the heap");

    assert!(Rc::ptr_eq(root0, root1));
    assert!(Rc::ptr_eq(root0, root2));
}

#[test]
fn publishing_then_inserting_leaves_sibling_untouched() {
    // Siblings 1 and 2 under target 0, each with its own sidetrack inserted
    // on top of the shared ancestor heap
    let mut graph = DirectedGraph::with_vertices(4);
    graph.add_edge(1, 0, w(1.0));
    graph.add_edge(2, 0, w(1.0));
    graph.add_edge(3, 0, w(5.0));
    graph.add_edge(0, 3, w(2.0));
    graph.add_edge(1, 3, w(3.0));
    graph.add_edge(2, 3, w(4.0));

    let paths = ReverseDijkstra::new().distances_to(&graph, 0).unwrap();
    let forest = SidetrackForest::build(&graph, &paths);

    let keys_of = |vertex: usize| {
        let mut keys = Vec::new();
        fn walk(
            heap: &HeapRef<OrderedFloat<f64>, k_shortest::Sidetrack>,
            out: &mut Vec<OrderedFloat<f64>>,
        ) {
            if let Some(node) = heap {
                out.push(node.key());
                walk(node.left(), out);
                walk(node.right(), out);
            }
        }
        walk(forest.root(vertex), &mut keys);
        keys.sort_unstable();
        keys
    };

    let sibling_before = keys_of(2);

    // A further insert on top of vertex 1's published heap must not disturb
    // either published sibling
    let _grown = leftist_heap::insert(
        forest.root(1),
        w(0.5),
        k_shortest::Sidetrack {
            origin: 1,
            target: 0,
        },
    );

    assert_eq!(keys_of(2), sibling_before);
    if let Some(root) = forest.root(1) {
        root.assert_invariants();
    }
    if let Some(root) = forest.root(2) {
        root.assert_invariants();
    }
}
