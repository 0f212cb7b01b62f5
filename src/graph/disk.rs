//! DiskGraph - graph embedded in a disk.
//!
//! The DiskGraph stores the topology using petgraph's `UnGraph` and keeps
//! per-node data in dense arrays indexed by [`NodeId`]: the polar coordinate
//! record, cached Cartesian positions (SoA layout) and the current degree.
//! Nodes are never removed, so ids, petgraph indices and array slots coincide.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::edge::{EdgeId, EdgeRecord};
use super::node::{NodeId, PolarCoord};

/// Undirected graph with one fixed polar coordinate per node.
///
/// This struct manages:
/// - Graph topology via petgraph
/// - Coordinate records, set once per node
/// - Cartesian position buffers in SoA layout
/// - Degree table and running maximum degree
#[derive(Debug, Clone)]
pub struct DiskGraph {
    /// The underlying graph structure.
    /// Nodes store their NodeId, edges store their EdgeId.
    graph: UnGraph<NodeId, EdgeId>,

    /// Polar coordinates, indexed by node id
    coords: Vec<PolarCoord>,

    /// X positions (SoA layout)
    pos_x: Vec<f64>,

    /// Y positions (SoA layout)
    pos_y: Vec<f64>,

    /// Degree per node
    degrees: Vec<u32>,

    max_degree: u32,
}

impl DiskGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            coords: Vec::new(),
            pos_x: Vec::new(),
            pos_y: Vec::new(),
            degrees: Vec::new(),
            max_degree: 0,
        }
    }

    /// Create a graph with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(node_capacity, edge_capacity),
            coords: Vec::with_capacity(node_capacity),
            pos_x: Vec::with_capacity(node_capacity),
            pos_y: Vec::with_capacity(node_capacity),
            degrees: Vec::with_capacity(node_capacity),
            max_degree: 0,
        }
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node at the given coordinate and return its id.
    ///
    /// Ids are dense: the returned id equals the node count before the call.
    pub fn add_node(&mut self, coord: PolarCoord) -> NodeId {
        let id = NodeId(self.coords.len() as u32);
        let index = self.graph.add_node(id);
        debug_assert_eq!(index.index(), id.index());

        let (x, y) = coord.to_cartesian();
        self.coords.push(coord);
        self.pos_x.push(x);
        self.pos_y.push(y);
        self.degrees.push(0);
        id
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.coords.len()
    }

    /// Check whether a node exists.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.coords.len()
    }

    /// Iterate over all node ids in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.coords.len() as u32).map(NodeId)
    }

    /// Get a node's polar coordinate.
    pub fn coord(&self, id: NodeId) -> Option<PolarCoord> {
        self.coords.get(id.index()).copied()
    }

    /// Get a node's Cartesian position.
    pub fn position(&self, id: NodeId) -> Option<(f64, f64)> {
        let i = id.index();
        if i < self.pos_x.len() {
            Some((self.pos_x[i], self.pos_y[i]))
        } else {
            None
        }
    }

    /// Get a node's degree (0 for unknown nodes).
    pub fn degree(&self, id: NodeId) -> u32 {
        self.degrees.get(id.index()).copied().unwrap_or(0)
    }

    /// Largest degree of any node.
    pub fn max_degree(&self) -> u32 {
        self.max_degree
    }

    /// Get neighbors of a node.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.graph
            .neighbors(NodeIndex::new(id.index()))
            .map(|n| self.graph[n])
            .collect()
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an undirected edge between two distinct existing nodes.
    ///
    /// Returns None for unknown endpoints or a self-loop. Parallel edges are
    /// stored as given.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        if !self.contains(source) || !self.contains(target) || source == target {
            return None;
        }

        let id = EdgeId(self.graph.edge_count() as u32);
        self.graph.add_edge(
            NodeIndex::new(source.index()),
            NodeIndex::new(target.index()),
            id,
        );

        for node in [source, target] {
            let degree = &mut self.degrees[node.index()];
            *degree += 1;
            self.max_degree = self.max_degree.max(*degree);
        }
        Some(id)
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRecord> + '_ {
        self.graph.edge_references().map(|edge| EdgeRecord {
            id: *edge.weight(),
            source: self.graph[edge.source()],
            target: self.graph[edge.target()],
        })
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Get the coordinate records.
    pub fn coords(&self) -> &[PolarCoord] {
        &self.coords
    }

    /// Get X positions slice.
    pub fn positions_x(&self) -> &[f64] {
        &self.pos_x
    }

    /// Get Y positions slice.
    pub fn positions_y(&self) -> &[f64] {
        &self.pos_y
    }

    /// Get the degree table.
    pub fn degrees(&self) -> &[u32] {
        &self.degrees
    }

    /// Neighbor lists indexed by node slot.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.node_count()];
        for edge in self.edges() {
            adjacency[edge.source.index()].push(edge.target.index());
            adjacency[edge.target.index()].push(edge.source.index());
        }
        adjacency
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Degree histogram: entry `d` counts the nodes of degree `d`.
    pub fn degree_histogram(&self) -> Vec<usize> {
        let mut histogram = vec![0usize; self.max_degree as usize + 1];
        for &degree in &self.degrees {
            histogram[degree as usize] += 1;
        }
        if self.degrees.is_empty() {
            histogram.clear();
        }
        histogram
    }
}

impl Default for DiskGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polar(radius: f64, angle: f64) -> PolarCoord {
        PolarCoord::new(radius, angle)
    }

    #[test]
    fn test_add_node() {
        let mut graph = DiskGraph::new();
        let id = graph.add_node(polar(2.0, 0.0));

        assert_eq!(id, NodeId(0));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.coord(id), Some(polar(2.0, 0.0)));
        let (x, y) = graph.position(id).unwrap();
        assert!((x - 2.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn test_ids_are_dense() {
        let mut graph = DiskGraph::new();
        for i in 0..5 {
            assert_eq!(graph.node_count(), i as usize);
            assert_eq!(graph.add_node(polar(1.0, i as f64)), NodeId(i));
        }
        let ids: Vec<_> = graph.node_ids().collect();
        assert_eq!(ids, (0..5).map(NodeId).collect::<Vec<_>>());
    }

    #[test]
    fn test_add_edge_updates_degrees() {
        let mut graph = DiskGraph::new();
        let a = graph.add_node(polar(0.0, 0.0));
        let b = graph.add_node(polar(1.0, 0.0));
        let c = graph.add_node(polar(1.0, 1.0));

        assert_eq!(graph.add_edge(a, b), Some(EdgeId(0)));
        assert_eq!(graph.add_edge(a, c), Some(EdgeId(1)));

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(a), 2);
        assert_eq!(graph.degree(b), 1);
        assert_eq!(graph.max_degree(), 2);
        assert_eq!(graph.degrees(), &[2, 1, 1]);
    }

    #[test]
    fn test_add_edge_rejects_invalid() {
        let mut graph = DiskGraph::new();
        let a = graph.add_node(polar(0.0, 0.0));

        assert_eq!(graph.add_edge(a, a), None);
        assert_eq!(graph.add_edge(a, NodeId(9)), None);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree(a), 0);
    }

    #[test]
    fn test_get_neighbors() {
        let mut graph = DiskGraph::new();
        let a = graph.add_node(polar(0.0, 0.0));
        let b = graph.add_node(polar(1.0, 0.0));
        let c = graph.add_node(polar(1.0, 2.0));

        graph.add_edge(a, b);
        graph.add_edge(c, a);

        let neighbors = graph.neighbors(a);
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&b));
        assert!(neighbors.contains(&c));
        assert!(graph.neighbors(NodeId(42)).is_empty());
    }

    #[test]
    fn test_edges_in_insertion_order() {
        let mut graph = DiskGraph::new();
        let a = graph.add_node(polar(0.0, 0.0));
        let b = graph.add_node(polar(1.0, 0.0));
        let c = graph.add_node(polar(2.0, 0.0));

        graph.add_edge(c, a);
        graph.add_edge(b, c);

        let edges: Vec<_> = graph.edges().map(|e| (e.id, e.source, e.target)).collect();
        assert_eq!(edges, vec![(EdgeId(0), c, a), (EdgeId(1), b, c)]);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let mut graph = DiskGraph::new();
        let a = graph.add_node(polar(0.0, 0.0));
        let b = graph.add_node(polar(1.0, 0.0));
        graph.add_edge(a, b);

        let adjacency = graph.adjacency();
        assert_eq!(adjacency, vec![vec![1], vec![0]]);
    }

    #[test]
    fn test_component_count() {
        let mut graph = DiskGraph::new();
        let a = graph.add_node(polar(0.0, 0.0));
        let b = graph.add_node(polar(1.0, 0.0));
        let _c = graph.add_node(polar(2.0, 0.0));
        assert_eq!(graph.component_count(), 3);

        graph.add_edge(a, b);
        assert_eq!(graph.component_count(), 2);
    }

    #[test]
    fn test_degree_histogram() {
        let mut graph = DiskGraph::new();
        assert!(graph.degree_histogram().is_empty());

        let a = graph.add_node(polar(0.0, 0.0));
        let b = graph.add_node(polar(1.0, 0.0));
        let c = graph.add_node(polar(2.0, 0.0));
        let _d = graph.add_node(polar(3.0, 0.0));
        graph.add_edge(a, b);
        graph.add_edge(a, c);

        assert_eq!(graph.degree_histogram(), vec![1, 2, 1]);
    }
}
