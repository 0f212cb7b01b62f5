//! GML serialization.
//!
//! Layout:
//!
//! ```text
//! Creator "richclub-model 0.1.0"
//! Version 1
//! graph
//! [
//!   directed 0
//!   node
//!   [
//!     id 0
//!     radius 4.2
//!     angle 1.3
//!   ]
//!   edge
//!   [
//!     source 1
//!     target 0
//!   ]
//! ]
//! ```
//!
//! Nodes appear in id order, edges in insertion order.

use std::fmt;

use crate::graph::DiskGraph;

/// A GML real. Always carries a decimal point so readers do not take it as an integer.
struct Real(f64);

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:?}", self.0);
        if text.contains('e') && !text.contains('.') {
            f.write_str(&text.replacen('e', ".0e", 1))
        } else {
            f.write_str(&text)
        }
    }
}

/// GML rendering of a [`DiskGraph`].
pub struct GmlDocument<'a> {
    graph: &'a DiskGraph,
}

impl<'a> GmlDocument<'a> {
    pub fn new(graph: &'a DiskGraph) -> Self {
        Self { graph }
    }
}

impl fmt::Display for GmlDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Creator \"{} {}\"", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
        writeln!(f, "Version 1")?;
        writeln!(f, "graph")?;
        writeln!(f, "[")?;
        writeln!(f, "  directed 0")?;

        for (id, coord) in self.graph.node_ids().zip(self.graph.coords()) {
            writeln!(f, "  node")?;
            writeln!(f, "  [")?;
            writeln!(f, "    id {}", id.raw())?;
            writeln!(f, "    radius {}", Real(coord.radius))?;
            writeln!(f, "    angle {}", Real(coord.angle))?;
            writeln!(f, "  ]")?;
        }

        for edge in self.graph.edges() {
            writeln!(f, "  edge")?;
            writeln!(f, "  [")?;
            writeln!(f, "    source {}", edge.source.raw())?;
            writeln!(f, "    target {}", edge.target.raw())?;
            writeln!(f, "  ]")?;
        }

        writeln!(f, "]")
    }
}

/// Render a graph as a GML string.
pub fn to_gml(graph: &DiskGraph) -> String {
    GmlDocument::new(graph).to_string()
}
