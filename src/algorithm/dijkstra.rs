use log::debug;
use num_traits::{Float, Zero};
use std::fmt::Debug;

use crate::algorithm::{DistanceOracle, ReverseShortestPaths};
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::Graph;
use crate::{Error, Result};

/// Dijkstra's algorithm run over the reversed edge relation.
///
/// Relaxing `incoming_edges` from the target computes, for every vertex, the
/// true forward-graph distance to the target, with `next_hops` recording the
/// shortest-path tree rooted at the target.
#[derive(Debug, Default)]
pub struct ReverseDijkstra;

impl ReverseDijkstra {
    /// Creates a new oracle instance
    pub fn new() -> Self {
        ReverseDijkstra
    }
}

impl<W, G> DistanceOracle<W, G> for ReverseDijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "ReverseDijkstra"
    }

    fn distances_to(&self, graph: &G, target: usize) -> Result<ReverseShortestPaths<W>> {
        if !graph.has_vertex(target) {
            return Err(Error::InvalidVertex(target));
        }

        let n = graph.vertex_count();

        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut next_hops: Vec<Option<usize>> = vec![None; n];

        distances[target] = Some(W::zero());

        let mut queue = BinaryHeapWrapper::new();
        queue.push(target, W::zero());

        while let Some((v, dist_v)) = queue.pop() {
            // Skip stale entries superseded by a later, shorter relaxation
            if let Some(current_dist) = distances[v] {
                if current_dist < dist_v {
                    continue;
                }
            }

            // An incoming edge u -> v relaxes u's distance to the target.
            // Strict improvement only, so the first relaxation reaching the
            // final distance fixes the next hop; the tie-break is then a pure
            // function of edge enumeration order.
            for (u, weight) in graph.incoming_edges(v) {
                let new_dist = dist_v + weight;

                let should_update = match distances[u] {
                    None => true,
                    Some(current_dist) => new_dist < current_dist,
                };

                if should_update {
                    distances[u] = Some(new_dist);
                    next_hops[u] = Some(v);
                    queue.push(u, new_dist);
                }
            }
        }

        debug!(
            "reverse dijkstra from {}: {} of {} vertices reach the target",
            target,
            distances.iter().filter(|d| d.is_some()).count(),
            n
        );

        Ok(ReverseShortestPaths {
            distances,
            next_hops,
            target,
        })
    }
}
