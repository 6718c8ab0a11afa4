use crate::graph::traits::{Graph, MutableGraph};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// A directed multigraph implementation using adjacency lists.
///
/// Both outgoing and incoming edge lists are kept, so algorithms that relax
/// over the reversed edge relation (the backward shortest-path oracle) can
/// iterate `incoming_edges` directly instead of building a reversed copy of
/// the graph.
#[derive(Debug, Clone, Default)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Outgoing edges for each vertex: outgoing[u] = [(v, weight), ...]
    outgoing: Vec<Vec<(usize, W)>>,

    /// Incoming edges for each vertex: incoming[v] = [(u, weight), ...]
    incoming: Vec<Vec<(usize, W)>>,
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Creates a new directed graph with the specified number of vertices
    pub fn with_vertices(vertices: usize) -> Self {
        DirectedGraph {
            outgoing: vec![Vec::new(); vertices],
            incoming: vec![Vec::new(); vertices],
        }
    }

    /// Builds a graph from an edge list, sizing the vertex set to `vertices`.
    /// Returns `None` if any endpoint is out of range or any weight negative.
    pub fn from_edges(vertices: usize, edges: &[(usize, usize, W)]) -> Option<Self> {
        let mut graph = Self::with_vertices(vertices);
        for &(u, v, w) in edges {
            if !graph.add_edge(u, v, w) {
                return None;
            }
        }
        Some(graph)
    }

    /// Returns the first edge with a negative weight, if any
    pub fn find_negative_edge(&self) -> Option<(usize, usize)> {
        for (u, edges) in self.outgoing.iter().enumerate() {
            for &(v, weight) in edges {
                if weight < W::zero() {
                    return Some((u, v));
                }
            }
        }
        None
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|edges| edges.len()).sum()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.outgoing.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn incoming_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.incoming.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.outgoing.len()
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.outgoing
            .get(from)
            .map_or(false, |edges| edges.iter().any(|&(v, _)| v == to))
    }

    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing.get(from).and_then(|edges| {
            edges.iter().find(|&&(v, _)| v == to).map(|&(_, w)| w)
        })
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn add_vertex(&mut self) -> usize {
        let new_id = self.outgoing.len();
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        new_id
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        if !self.has_vertex(from) || !self.has_vertex(to) || weight < W::zero() {
            return false;
        }

        // Multigraph semantics: always append, never merge parallel edges.
        // Parallel zero-cost edges to a vertex's parent matter to the
        // sidetrack index, which must treat only one of them as the tree edge.
        self.outgoing[from].push((to, weight));
        self.incoming[to].push((from, weight));
        true
    }

    fn remove_edge(&mut self, from: usize, to: usize) -> bool {
        let mut removed = false;

        if let Some(outgoing) = self.outgoing.get_mut(from) {
            let len_before = outgoing.len();
            outgoing.retain(|&(v, _)| v != to);
            removed = len_before > outgoing.len();
        }

        if let Some(incoming) = self.incoming.get_mut(to) {
            incoming.retain(|&(u, _)| u != from);
        }

        removed
    }
}
