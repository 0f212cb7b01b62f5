//! Graph data structures.
//!
//! This module provides the embedded graph built by the generator: petgraph
//! holds the topology, and dense arrays hold the per-node coordinate record,
//! Cartesian positions and degrees.

mod disk;
mod edge;
mod node;

pub use disk::DiskGraph;
pub use edge::{EdgeId, EdgeRecord};
pub use node::{NodeId, PolarCoord};
