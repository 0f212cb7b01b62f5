//! Error types for richclub-model.
//!
//! Generation itself cannot fail; errors come from the normalized rich-club
//! computation and from writing the exported artifacts.

use thiserror::Error;

/// Errors produced by analysis and export.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Degree-preserving randomization needs at least four nodes.
    #[error("graph has {nodes} nodes, randomization needs at least 4")]
    TooFewNodes { nodes: usize },

    /// Degree-preserving randomization needs at least two edges.
    #[error("graph has {edges} edges, randomization needs at least 2")]
    TooFewEdges { edges: usize },

    /// The swap loop hit its attempt limit before completing the requested swaps.
    #[error("double-edge swap gave up after {attempts} attempts ({swaps} of {requested} swaps done)")]
    SwapBudgetExhausted {
        attempts: u64,
        swaps: u64,
        requested: u64,
    },

    /// Writing an artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type ModelResult<T> = Result<T, ModelError>;
