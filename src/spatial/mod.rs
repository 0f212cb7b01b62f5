//! Spatial indexing over node positions.
//!
//! This module provides an R-tree based index used to collect neighbor
//! candidates during generation and for nearest-node hit testing.

mod rtree;

pub use rtree::SpatialIndex;
