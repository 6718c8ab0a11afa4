use num_traits::{Float, Zero};
use std::fmt::Debug;

use crate::graph::Graph;
use crate::Result;

/// Shortest distances from every vertex *to* a fixed target vertex, together
/// with the induced shortest-path tree.
#[derive(Debug, Clone)]
pub struct ReverseShortestPaths<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// distances[u] = shortest distance from u to the target, None if the
    /// target is unreachable from u
    pub distances: Vec<Option<W>>,

    /// next_hops[u] = the successor of u on a shortest path toward the
    /// target; None for the target itself and for unreachable vertices.
    /// Edges of the tree point from each vertex toward the target.
    pub next_hops: Vec<Option<usize>>,

    /// Target vertex ID
    pub target: usize,
}

impl<W> ReverseShortestPaths<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns true if the target is reachable from `vertex`
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distances.get(vertex).map_or(false, Option::is_some)
    }
}

/// Trait for algorithms that compute distances to a target over the reversed
/// edge relation
pub trait DistanceOracle<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest distances from every vertex to `target`
    fn distances_to(&self, graph: &G, target: usize) -> Result<ReverseShortestPaths<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
