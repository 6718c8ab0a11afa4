use log::debug;
use num_traits::{Float, Zero};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::Debug;
use std::rc::Rc;

use crate::algorithm::dijkstra::ReverseDijkstra;
use crate::algorithm::reconstruct::reconstruct_path;
use crate::algorithm::{DistanceOracle, ReverseShortestPaths};
use crate::data_structures::leftist_heap::{self, HeapRef, LeftistNode};
use crate::graph::Graph;
use crate::{Error, Result};

/// A sidetrack edge: a graph edge that leaves the shortest-path tree at
/// `origin` and rejoins it at `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidetrack {
    /// Vertex the detour leaves from
    pub origin: usize,
    /// Vertex the detour arrives at
    pub target: usize,
}

/// Heap of sidetrack edges keyed by detour cost
type SidetrackHeap<W> = HeapRef<W, Sidetrack>;

/// One candidate path: its total cost plus the sidetrack edges that produce
/// it, in the order they are encountered walking from the source.
///
/// An empty sidetrack sequence is the base shortest path itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCandidate<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Total path cost
    pub cost: W,
    /// Detours taken off the shortest-path tree
    pub sidetracks: Vec<Sidetrack>,
}

impl<W> PathCandidate<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Replays this candidate into the full vertex sequence from `source` to
    /// the target of `paths`
    pub fn nodes(&self, paths: &ReverseShortestPaths<W>, source: usize) -> Result<Vec<usize>> {
        reconstruct_path(paths, &self.sidetracks, source)
    }
}

/// The forest of per-vertex sidetrack heaps.
///
/// `root(u)` holds every sidetrack edge originating at `u` or at any vertex
/// on the tree path from `u` to the target. Heaps are persistent: a vertex's
/// heap is its tree parent's heap with the vertex's own sidetracks inserted,
/// so sibling subtrees share ancestor heap nodes by reference and are never
/// affected by each other's insertions.
#[derive(Debug)]
pub struct SidetrackForest<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    roots: Vec<SidetrackHeap<W>>,
}

impl<W> SidetrackForest<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    /// Builds the forest in one traversal of the shortest-path tree, from the
    /// target outward.
    pub fn build<G>(graph: &G, paths: &ReverseShortestPaths<W>) -> Self
    where
        G: Graph<W>,
    {
        let n = graph.vertex_count();

        // Children lists of the shortest-path tree (next_hops point toward
        // the target, so the tree is walked against them)
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for u in 0..n {
            if let Some(hop) = paths.next_hops[u] {
                children[hop].push(u);
            }
        }

        let mut roots: Vec<SidetrackHeap<W>> = vec![None; n];
        let mut sidetrack_count = 0usize;

        let mut queue = VecDeque::new();
        if paths.target < n {
            queue.push_back(paths.target);
        }

        while let Some(u) = queue.pop_front() {
            let Some(dist_u) = paths.distances[u] else {
                continue;
            };

            // Start from the heap inherited from the tree parent (already
            // stored in roots[u] when u was enqueued; None at the target)
            let mut heap = roots[u].take();
            let mut tree_edge_skipped = false;

            for (v, weight) in graph.outgoing_edges(u) {
                let Some(dist_v) = paths.distances[v] else {
                    continue;
                };
                let detour_cost = weight + dist_v - dist_u;

                // The shortest-path continuation is not a sidetrack. Skip it
                // exactly once: a second zero-cost edge to the same next hop
                // is a parallel edge and a legitimate detour.
                if !tree_edge_skipped
                    && paths.next_hops[u] == Some(v)
                    && detour_cost == W::zero()
                {
                    tree_edge_skipped = true;
                    continue;
                }

                heap = leftist_heap::insert(
                    &heap,
                    detour_cost,
                    Sidetrack {
                        origin: u,
                        target: v,
                    },
                );
                sidetrack_count += 1;
            }

            roots[u] = heap;
            for &child in &children[u] {
                roots[child] = roots[u].clone();
                queue.push_back(child);
            }
        }

        debug!(
            "sidetrack forest built: {} sidetrack edges over {} vertices",
            sidetrack_count, n
        );

        SidetrackForest { roots }
    }

    /// The sidetrack heap attached to `vertex` (None when the vertex has no
    /// sidetracks or cannot reach the target)
    pub fn root(&self, vertex: usize) -> &SidetrackHeap<W> {
        &self.roots[vertex]
    }
}

/// Entry in the global best-first queue. Ordered by total cost, with a
/// monotonic insertion sequence as a deterministic tie-break.
#[derive(Debug)]
struct QueueEntry<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    cost: W,
    seq: u64,
    node: Rc<LeftistNode<W, Sidetrack>>,
    sidetracks: Vec<Sidetrack>,
}

impl<W> PartialEq for QueueEntry<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl<W> Eq for QueueEntry<W> where W: Float + Zero + Debug + Copy + Ord {}

impl<W> PartialOrd for QueueEntry<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W> Ord for QueueEntry<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Configuration and entry point for Eppstein's k-shortest-paths algorithm
#[derive(Debug, Default)]
pub struct KShortest {
    /// When set, candidates whose cost does not strictly exceed the last
    /// accepted candidate's cost are suppressed
    distinct_costs: bool,
}

impl KShortest {
    /// Create a new instance with default settings (all candidates accepted)
    pub fn new() -> Self {
        KShortest {
            distinct_costs: false,
        }
    }

    /// Enable or disable the distinct-cost policy: when enabled, equal-cost
    /// candidates are treated as the same path and only the first is emitted
    pub fn with_distinct_costs(mut self, enabled: bool) -> Self {
        self.distinct_costs = enabled;
        self
    }

    /// Computes up to `k` shortest paths from `source` to `target` and
    /// returns them eagerly, in non-decreasing cost order
    pub fn find_paths<W, G>(
        &self,
        graph: &G,
        source: usize,
        target: usize,
        k: usize,
    ) -> Result<Vec<PathCandidate<W>>>
    where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        Ok(self.iter_paths(graph, source, target, k)?.collect())
    }

    /// Computes up to `k` shortest path costs, without sidetrack sequences
    pub fn find_costs<W, G>(
        &self,
        graph: &G,
        source: usize,
        target: usize,
        k: usize,
    ) -> Result<Vec<W>>
    where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        Ok(self
            .iter_paths(graph, source, target, k)?
            .map(|candidate| candidate.cost)
            .collect())
    }

    /// Returns the lazy enumerator over up to `k` shortest paths. Candidates
    /// are produced on demand; dropping the iterator abandons the rest.
    pub fn iter_paths<W, G>(
        &self,
        graph: &G,
        source: usize,
        target: usize,
        k: usize,
    ) -> Result<KShortestIter<W>>
    where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        if k == 0 {
            return Err(Error::InvalidK(k));
        }
        if !graph.has_vertex(source) {
            return Err(Error::InvalidVertex(source));
        }
        if !graph.has_vertex(target) {
            return Err(Error::InvalidVertex(target));
        }
        for u in 0..graph.vertex_count() {
            for (v, weight) in graph.outgoing_edges(u) {
                if weight < W::zero() {
                    return Err(Error::NegativeWeight { from: u, to: v });
                }
            }
        }

        let paths = ReverseDijkstra::new().distances_to(graph, target)?;
        let Some(base_cost) = paths.distances[source] else {
            return Err(Error::NoPath { source, target });
        };

        let forest = SidetrackForest::build(graph, &paths);

        debug!(
            "enumerating up to {} paths from {} to {} (base cost {:?})",
            k, source, target, base_cost
        );

        Ok(KShortestIter {
            forest,
            source,
            base_cost,
            base_emitted: false,
            remaining: k,
            last_cost: None,
            distinct_costs: self.distinct_costs,
            seq: 0,
            queue: BinaryHeap::new(),
        })
    }
}

/// Lazy enumerator over the k shortest paths: a finite, single-pass iterator
/// yielding candidates in non-decreasing cost order.
#[derive(Debug)]
pub struct KShortestIter<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    forest: SidetrackForest<W>,
    source: usize,
    base_cost: W,
    base_emitted: bool,
    /// Accepted candidates still to emit
    remaining: usize,
    last_cost: Option<W>,
    distinct_costs: bool,
    seq: u64,
    queue: BinaryHeap<Reverse<QueueEntry<W>>>,
}

impl<W> KShortestIter<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    fn push(&mut self, cost: W, node: Rc<LeftistNode<W, Sidetrack>>, sidetracks: Vec<Sidetrack>) {
        self.queue.push(Reverse(QueueEntry {
            cost,
            seq: self.seq,
            node,
            sidetracks,
        }));
        self.seq += 1;
    }

    /// Pops the cheapest queue entry, pushes its successors, and returns the
    /// candidate it describes
    fn expand(&mut self) -> Option<PathCandidate<W>> {
        let Reverse(entry) = self.queue.pop()?;
        let node = entry.node;
        let cost = entry.cost;

        let taken = node.value();
        let mut extended = entry.sidetracks.clone();
        extended.push(taken);

        // Continuation: after following this sidetrack to its target, take a
        // further detour from the target's own heap
        if let Some(next) = self.forest.root(taken.target) {
            let next = Rc::clone(next);
            self.push(cost + next.key(), next, extended.clone());
        }

        // Siblings: swap this sidetrack for a costlier alternative at the
        // same divergence point, leaving the accumulated path unchanged
        for child in [node.left(), node.right()] {
            if let Some(child) = child {
                let child = Rc::clone(child);
                self.push(cost - node.key() + child.key(), child, entry.sidetracks.clone());
            }
        }

        Some(PathCandidate {
            cost,
            sidetracks: extended,
        })
    }
}

impl<W> Iterator for KShortestIter<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    type Item = PathCandidate<W>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        if !self.base_emitted {
            self.base_emitted = true;
            self.remaining -= 1;
            self.last_cost = Some(self.base_cost);

            // Seed the queue with the best sidetrack out of the source
            if let Some(root) = self.forest.root(self.source) {
                let root = Rc::clone(root);
                self.push(self.base_cost + root.key(), root, Vec::new());
            }

            return Some(PathCandidate {
                cost: self.base_cost,
                sidetracks: Vec::new(),
            });
        }

        while let Some(candidate) = self.expand() {
            if self.distinct_costs {
                if let Some(last) = self.last_cost {
                    if candidate.cost <= last {
                        // Same arrival cost: treated as the same path and
                        // suppressed, but its successors stay in play
                        continue;
                    }
                }
            }

            self.remaining -= 1;
            self.last_cost = Some(candidate.cost);
            return Some(candidate);
        }

        None
    }
}
