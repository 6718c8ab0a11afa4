//! k_shortest - Eppstein's k-shortest-paths algorithm
//!
//! This library computes the k lowest-cost paths between two vertices of a
//! directed graph with non-negative edge weights, using Eppstein's algorithm:
//! one backward Dijkstra pass from the target, a forest of persistent leftist
//! heaps holding "sidetrack" edges (detours off the shortest-path tree), and
//! a lazy best-first enumeration over that forest that yields path costs in
//! non-decreasing order without materializing candidate paths upfront.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    dijkstra::ReverseDijkstra,
    eppstein::{KShortest, KShortestIter, PathCandidate, Sidetrack, SidetrackForest},
    reconstruct::reconstruct_path,
    DistanceOracle, ReverseShortestPaths,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;

/// Error types for the library
///
/// `Display`/`Error` are implemented by hand: the `NoPath::source` field name
/// is part of the public API, and thiserror's derive would misinterpret it as
/// an error-source field.
#[derive(Debug)]
pub enum Error {
    InvalidVertex(usize),

    InvalidK(usize),

    NegativeWeight { from: usize, to: usize },

    NoPath { source: usize, target: usize },

    MalformedSidetracks(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidVertex(v) => write!(f, "Invalid vertex ID: {v}"),
            Error::InvalidK(k) => {
                write!(f, "Invalid path count k = {k}, must be at least 1")
            }
            Error::NegativeWeight { from, to } => {
                write!(f, "Negative edge weight on edge from {from} to {to}")
            }
            Error::NoPath { source, target } => {
                write!(f, "No path from {source} to {target}")
            }
            Error::MalformedSidetracks(s) => {
                write!(f, "Malformed sidetrack sequence: {s}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
