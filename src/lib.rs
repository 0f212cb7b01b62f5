//! Rich-Club Model - WASM Module
//!
//! Random spatial networks on a disk. Nodes are placed one at a time and
//! attach to the `k` earlier nodes closest under a degree-weighted distance;
//! connections that are too long are split by a midpoint node. The crate
//! exports the result as GML and plots its rich-club coefficient.
//!
//! # Architecture
//!
//! - `graph`: Undirected graph over petgraph with polar coordinates per node
//! - `spatial`: R-tree spatial indexing for neighbor search and hit testing
//! - `generator`: Node placement, distance metric, k-closest search, generation loop
//! - `metrics`: Rich-club coefficient with degree-preserving randomization
//! - `export`: GML and SVG artifacts
//! - `config` / `error`: Parameters and error types
//!
//! The same library backs the `richclub-model` command line tool and the
//! JavaScript facade [`RichClubModelWasm`].

use js_sys::Float32Array;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod graph;
pub mod metrics;
pub mod spatial;

use config::{GeneratorConfig, RichClubConfig};
use error::ModelError;
use generator::{Generator, Network};
use graph::NodeId;
use spatial::SpatialIndex;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&JsValue::from_str(concat!(
        "richclub-model ",
        env!("CARGO_PKG_VERSION"),
        " loaded"
    )));
}

fn to_js_error(err: ModelError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A generated network exposed to JavaScript.
///
/// Generation runs in the constructor; the object is read-only afterwards.
#[wasm_bindgen]
pub struct RichClubModelWasm {
    network: Network,
    index: SpatialIndex,
}

impl RichClubModelWasm {
    fn from_network(network: Network) -> Self {
        Self {
            index: SpatialIndex::from_graph(network.graph()),
            network,
        }
    }

    fn build(config: GeneratorConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::from_network(Generator::new(config).generate(&mut rng))
    }

    fn rich_club_curve(&self, q: u64, seed: u64) -> Result<metrics::RichClubCurve, ModelError> {
        let config = RichClubConfig {
            q,
            ..RichClubConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        metrics::rich_club_coefficient(self.network.graph(), &config, &mut rng)
    }
}

#[wasm_bindgen]
impl RichClubModelWasm {
    /// Generate a network with default parameters.
    ///
    /// # Arguments
    ///
    /// * `node_count` - Number of randomly placed nodes
    /// * `limit` - Weighted distance at which connections are subdivided
    /// * `seed` - RNG seed; the same seed gives the same network
    #[wasm_bindgen(constructor)]
    pub fn new(node_count: u32, limit: f64, seed: u64) -> Self {
        Self::build(GeneratorConfig::new(node_count, limit), seed)
    }

    /// Generate a network from a config object such as
    /// `{ nodeCount: 200, limit: 1.0, k: 3, diskRadius: 10 }`.
    ///
    /// Missing fields take their defaults.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue, seed: u64) -> Result<RichClubModelWasm, JsValue> {
        let config: GeneratorConfig = serde_wasm_bindgen::from_value(config)?;
        Ok(Self::build(config, seed))
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.network.graph().node_count() as u32
    }

    /// Number of randomly placed nodes (total minus midpoints).
    #[wasm_bindgen(js_name = placedCount)]
    pub fn placed_count(&self) -> u32 {
        self.network.placed_count() as u32
    }

    /// Radius of every node, indexed by node id.
    pub fn radii(&self) -> Vec<f64> {
        self.network.graph().coords().iter().map(|c| c.radius).collect()
    }

    /// Angle of every node in radians, indexed by node id.
    pub fn angles(&self) -> Vec<f64> {
        self.network.graph().coords().iter().map(|c| c.angle).collect()
    }

    /// Cartesian positions as [x0, y0, x1, y1, ...] for rendering.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float32Array {
        Float32Array::from(self.interleaved_positions().as_slice())
    }

    /// Node degrees, indexed by node id.
    pub fn degrees(&self) -> Vec<u32> {
        self.network.graph().degrees().to_vec()
    }

    // =========================================================================
    // Edges
    // =========================================================================

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.network.graph().edge_count() as u32
    }

    /// Edges as [source0, target0, source1, target1, ...] in insertion order.
    pub fn edges(&self) -> Vec<u32> {
        self.network
            .graph()
            .edges()
            .flat_map(|e| [e.source.raw(), e.target.raw()])
            .collect()
    }

    /// Neighbors of a node. Empty for unknown ids.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Vec<u32> {
        self.network
            .graph()
            .neighbors(NodeId(node_id))
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the nearest node to a point.
    ///
    /// Returns the node ID, or None if the graph is empty.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, x: f64, y: f64) -> Option<u32> {
        self.index.nearest(x, y).map(NodeId::raw)
    }

    /// Find all nodes within `radius` of a point.
    #[wasm_bindgen(js_name = findNodesWithin)]
    pub fn find_nodes_within(&self, x: f64, y: f64, radius: f64) -> Vec<u32> {
        self.index
            .in_radius(x, y, radius)
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }

    // =========================================================================
    // Analysis & Export
    // =========================================================================

    /// The network as a GML document.
    #[wasm_bindgen(js_name = toGml)]
    pub fn to_gml(&self) -> String {
        export::to_gml(self.network.graph())
    }

    /// Normalized rich-club coefficient as [degree0, coefficient0, ...].
    ///
    /// # Arguments
    ///
    /// * `q` - Double-edge swaps per edge for the random reference (default used by the CLI: 500)
    /// * `seed` - RNG seed for the randomization
    #[wasm_bindgen(js_name = richClubCoefficient)]
    pub fn rich_club_coefficient(&self, q: u64, seed: u64) -> Result<Vec<f64>, JsValue> {
        self.rich_club_curve(q, seed)
            .map(|curve| curve.to_pairs())
            .map_err(to_js_error)
    }

    /// SVG plot of the normalized rich-club coefficient, `width` x `height` units.
    #[wasm_bindgen(js_name = richClubSvg)]
    pub fn rich_club_svg(&self, q: u64, seed: u64, width: f64, height: f64) -> Result<String, JsValue> {
        let curve = self.rich_club_curve(q, seed).map_err(to_js_error)?;
        let config = self.network.config();
        let title = format!("Rich club, N = {}, limit = {:?}", config.node_count, config.limit);
        let style = export::PlotStyle {
            width,
            height,
            ..export::PlotStyle::default()
        };
        Ok(export::RichClubPlot::new(&curve, title).with_style(style).to_string())
    }

    /// Generation summary (node, edge, midpoint and component counts).
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.network.stats())?)
    }
}

impl RichClubModelWasm {
    fn interleaved_positions(&self) -> Vec<f32> {
        let graph = self.network.graph();
        graph
            .positions_x()
            .iter()
            .zip(graph.positions_y())
            .flat_map(|(&x, &y)| [x as f32, y as f32])
            .collect()
    }
}
