pub mod dijkstra;
pub mod eppstein;
pub mod reconstruct;
pub mod traits;

pub use traits::{DistanceOracle, ReverseShortestPaths};
