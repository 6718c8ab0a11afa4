use crate::graph::{DirectedGraph, MutableGraph};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Generates a random directed multigraph with n vertices and m edges.
/// Weights are integer-valued floats in 1..=max_weight so path costs compare
/// exactly. Seeded so callers get reproducible graphs.
pub fn generate_gnm(
    n: usize,
    m: usize,
    max_weight: u32,
    seed: u64,
) -> DirectedGraph<OrderedFloat<f64>> {
    assert!(n > 0, "n must be positive");
    assert!(max_weight > 0, "max_weight must be positive");

    let mut graph = DirectedGraph::with_vertices(n);
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..m {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        let w = rng.gen_range(1..=max_weight) as f64;
        graph.add_edge(u, v, OrderedFloat(w));
    }

    graph
}

/// Generates a width x height grid graph with unit-weight edges in the four
/// cardinal directions. Vertex (x, y) has index y * width + x.
pub fn generate_grid(width: usize, height: usize) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_vertices(width * height);

    for y in 0..height {
        for x in 0..width {
            let vertex = y * width + x;
            if x + 1 < width {
                graph.add_edge(vertex, vertex + 1, OrderedFloat(1.0));
                graph.add_edge(vertex + 1, vertex, OrderedFloat(1.0));
            }
            if y + 1 < height {
                graph.add_edge(vertex, vertex + width, OrderedFloat(1.0));
                graph.add_edge(vertex + width, vertex, OrderedFloat(1.0));
            }
        }
    }

    graph
}
