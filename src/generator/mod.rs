//! Network generation.
//!
//! - `placement`: random polar coordinates for new nodes
//! - `metric`: degree-weighted distance
//! - `neighbors`: k-closest selection (exhaustive and R-tree backed)
//! - `model`: the generation loop with edge subdivision

pub mod metric;
pub mod model;
pub mod neighbors;
pub mod placement;

pub use metric::distance;
pub use model::{Connection, GenerationStats, Generator, Network, midpoint_coord};
pub use neighbors::{Neighbor, k_closest, k_closest_indexed};
pub use placement::add_node;
