//! The generation loop.
//!
//! Node 0 is placed first. Each of the following `N - 1` iterations places a
//! node, selects its closest earlier nodes and connects to each of them:
//! directly when the weighted distance is below `limit`, otherwise through a
//! new midpoint node halfway between the two. Midpoints take the next free
//! ids, so the next placed node always lands after them.

use rand::Rng;
use serde::Serialize;

use crate::config::{GeneratorConfig, MidpointAngle, NeighborSearch};
use crate::graph::{DiskGraph, NodeId, PolarCoord};
use crate::spatial::SpatialIndex;

use super::metric::distance;
use super::neighbors::{k_closest, k_closest_indexed};
use super::placement;

/// One connection decided during generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// The node being placed.
    pub source: NodeId,
    /// The selected earlier node.
    pub target: NodeId,
    /// Weighted distance from `source` to `target` when the decision was made.
    pub distance: f64,
    /// The inserted midpoint, when the connection was subdivided.
    pub midpoint: Option<NodeId>,
}

/// Summary of a generated network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub nodes: usize,
    pub edges: usize,
    /// Nodes placed at random (excludes midpoints).
    pub placed: usize,
    pub midpoints: usize,
    pub direct_edges: usize,
    pub subdivisions: usize,
    pub max_degree: u32,
    pub mean_degree: f64,
    pub components: usize,
}

/// A generated network and the record of how it was built.
#[derive(Debug, Clone)]
pub struct Network {
    config: GeneratorConfig,
    graph: DiskGraph,
    connections: Vec<Connection>,
    placed: usize,
}

impl Network {
    /// The configuration the network was generated with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn graph(&self) -> &DiskGraph {
        &self.graph
    }

    pub fn into_graph(self) -> DiskGraph {
        self.graph
    }

    /// Connections in the order they were made.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connections that were subdivided.
    pub fn subdivisions(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.iter().filter(|c| c.midpoint.is_some())
    }

    /// Number of randomly placed nodes.
    pub fn placed_count(&self) -> usize {
        self.placed
    }

    pub fn stats(&self) -> GenerationStats {
        let nodes = self.graph.node_count();
        let edges = self.graph.edge_count();
        let subdivisions = self.subdivisions().count();
        GenerationStats {
            nodes,
            edges,
            placed: self.placed,
            midpoints: nodes - self.placed,
            direct_edges: self.connections.len() - subdivisions,
            subdivisions,
            max_degree: self.graph.max_degree(),
            mean_degree: if nodes == 0 {
                0.0
            } else {
                2.0 * edges as f64 / nodes as f64
            },
            components: self.graph.component_count(),
        }
    }
}

/// Coordinate of the point halfway between two nodes.
///
/// # Panics
///
/// Panics if either node does not exist.
pub fn midpoint_coord(graph: &DiskGraph, a: NodeId, b: NodeId, rule: MidpointAngle) -> PolarCoord {
    let xs = graph.positions_x();
    let ys = graph.positions_y();
    let x = (xs[a.index()] + xs[b.index()]) / 2.0;
    let y = (ys[a.index()] + ys[b.index()]) / 2.0;

    match rule {
        MidpointAngle::Quadrant => PolarCoord::from_cartesian(x, y),
        // 0 / 0 would give a NaN angle
        MidpointAngle::Legacy if x == 0.0 && y == 0.0 => PolarCoord::new(0.0, 0.0),
        MidpointAngle::Legacy => PolarCoord::new((x * x + y * y).sqrt(), (y / x).atan()),
    }
}

/// Builds networks from a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the generation loop, drawing all randomness from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Network {
        let config = &self.config;
        let node_count = config.node_count as usize;
        // No node selects more than `node_count - 1` neighbors, whatever `k` says.
        let expected = node_count.saturating_mul(config.k.min(node_count));
        let mut graph = DiskGraph::with_capacity(node_count, expected);
        let mut index = SpatialIndex::new();
        let mut connections = Vec::with_capacity(expected);

        if node_count > 0 {
            let first = placement::add_node(&mut graph, rng, config.disk_radius);
            index.insert_node(&graph, first);
        }

        for _ in 1..node_count {
            let current = placement::add_node(&mut graph, rng, config.disk_radius);
            let neighbors = match config.neighbor_search {
                NeighborSearch::Indexed => k_closest_indexed(&graph, &index, current, config.k),
                NeighborSearch::Exhaustive => k_closest(&graph, current, config.k),
            };
            index.insert_node(&graph, current);

            for neighbor in neighbors {
                let connection = self.connect(&mut graph, &mut index, current, neighbor.id);
                connections.push(connection);
            }
        }

        let network = Network {
            config: config.clone(),
            graph,
            connections,
            placed: node_count,
        };
        let stats = network.stats();
        tracing::info!(
            nodes = stats.nodes,
            edges = stats.edges,
            midpoints = stats.midpoints,
            max_degree = stats.max_degree,
            components = stats.components,
            "network generated"
        );
        network
    }

    /// Connect `source` to `target`, subdividing when they are too far apart.
    fn connect(
        &self,
        graph: &mut DiskGraph,
        index: &mut SpatialIndex,
        source: NodeId,
        target: NodeId,
    ) -> Connection {
        let weighted = distance(graph, source, target);
        if weighted < self.config.limit {
            graph.add_edge(source, target);
            return Connection {
                source,
                target,
                distance: weighted,
                midpoint: None,
            };
        }

        let coord = midpoint_coord(graph, source, target, self.config.midpoint_angle);
        let midpoint = graph.add_node(coord);
        graph.add_edge(source, midpoint);
        graph.add_edge(midpoint, target);
        index.insert_node(graph, midpoint);
        tracing::trace!(
            source = source.raw(),
            target = target.raw(),
            midpoint = midpoint.raw(),
            distance = weighted,
            "subdivided connection"
        );

        Connection {
            source,
            target,
            distance: weighted,
            midpoint: Some(midpoint),
        }
    }
}
