//! Neighbor selection.
//!
//! A newly placed node `id` picks the `min(id, k)` earlier nodes with the
//! smallest degree-weighted distance, ascending, ties broken by lower id.
//! "Earlier" means every id below `id`, midpoints included.
//!
//! Two searches produce identical results:
//! - [`k_closest`] evaluates every earlier node.
//! - [`k_closest_indexed`] collects candidates from the R-tree with growing
//!   radius queries. Since `distance >= euclidean / sqrt(max_degree)`, once the
//!   k-th best weighted distance `w` satisfies `w * sqrt(max_degree) < radius`,
//!   no node outside the queried circle can match or beat `w`.

use std::cmp::Ordering;

use crate::graph::{DiskGraph, NodeId};
use crate::spatial::SpatialIndex;

use super::metric::{distance, euclidean};

/// Relative slack on the pruning bound, covering rounding in the square roots.
const BOUND_SLACK: f64 = 1e-9;

/// Smallest starting radius for the indexed search.
const MIN_RADIUS: f64 = 1e-12;

/// Radius queries attempted before falling back to the exhaustive search.
const MAX_ROUNDS: usize = 128;

/// A selected neighbor and its weighted distance from the query node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: NodeId,
    pub distance: f64,
}

/// Order by distance, then id. NaN distances sort last.
fn compare(a: &Neighbor, b: &Neighbor) -> Ordering {
    let by_distance = match (a.distance.is_nan(), b.distance.is_nan()) {
        (false, false) => a.distance.total_cmp(&b.distance),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    };
    by_distance.then(a.id.cmp(&b.id))
}

fn select(mut candidates: Vec<Neighbor>, k: usize) -> Vec<Neighbor> {
    candidates.sort_by(compare);
    candidates.truncate(k);
    candidates
}

/// The `min(id, k)` earlier nodes closest to `id`, evaluating all of them.
///
/// # Panics
///
/// Panics if `id` is not in the graph.
pub fn k_closest(graph: &DiskGraph, id: NodeId, k: usize) -> Vec<Neighbor> {
    let candidates = (0..id.raw())
        .map(NodeId)
        .map(|other| Neighbor {
            id: other,
            distance: distance(graph, id, other),
        })
        .collect();
    select(candidates, k)
}

/// Same result as [`k_closest`], using the spatial index to skip far nodes.
///
/// `index` must hold the position of every node below `id`. Nodes at or
/// above `id` in the index are ignored.
///
/// # Panics
///
/// Panics if `id` is not in the graph.
pub fn k_closest_indexed(
    graph: &DiskGraph,
    index: &SpatialIndex,
    id: NodeId,
    k: usize,
) -> Vec<Neighbor> {
    let earlier = id.index();
    let wanted = k.min(earlier);
    if wanted == 0 {
        return Vec::new();
    }

    let Some((x, y)) = graph.position(id) else {
        return Vec::new();
    };
    let stretch = f64::from(graph.max_degree().max(1)).sqrt();

    let mut radius = index
        .nearest(x, y)
        .map(|nearest| euclidean(graph, id, nearest) * stretch)
        .filter(|r| r.is_finite())
        .unwrap_or(MIN_RADIUS)
        .max(MIN_RADIUS);

    for _ in 0..MAX_ROUNDS {
        let candidates: Vec<Neighbor> = index
            .earlier_in_radius(x, y, radius, id)
            .into_iter()
            .map(|other| Neighbor {
                id: other,
                distance: distance(graph, id, other),
            })
            .collect();

        let covered = candidates.len() >= earlier;
        if candidates.len() >= wanted {
            let selected = select(candidates, wanted);
            let reach = selected[wanted - 1].distance * stretch * (1.0 + BOUND_SLACK);
            if covered || reach < radius {
                return selected;
            }
            // One more query at `reach` satisfies the bound.
            radius = (radius * 2.0).max(reach * (1.0 + BOUND_SLACK));
        } else {
            radius *= 2.0;
        }

        if !radius.is_finite() {
            break;
        }
    }

    tracing::debug!(node = id.raw(), "indexed neighbor search fell back to exhaustive scan");
    k_closest(graph, id, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PolarCoord;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ids(neighbors: &[Neighbor]) -> Vec<u32> {
        neighbors.iter().map(|n| n.id.raw()).collect()
    }

    #[test]
    fn test_first_node_has_no_neighbors() {
        let mut graph = DiskGraph::new();
        let first = graph.add_node(PolarCoord::new(1.0, 0.0));
        assert!(k_closest(&graph, first, 3).is_empty());
        assert!(k_closest_indexed(&graph, &SpatialIndex::new(), first, 3).is_empty());
    }

    #[test]
    fn test_returns_min_of_id_and_k() {
        let mut graph = DiskGraph::new();
        for i in 0..6 {
            graph.add_node(PolarCoord::new(i as f64, 0.0));
        }
        assert_eq!(k_closest(&graph, NodeId(2), 3).len(), 2);
        assert_eq!(k_closest(&graph, NodeId(5), 3).len(), 3);
        assert_eq!(k_closest(&graph, NodeId(5), 0).len(), 0);
    }

    #[test]
    fn test_sorted_by_distance() {
        let mut graph = DiskGraph::new();
        graph.add_node(PolarCoord::new(9.0, 0.0));
        graph.add_node(PolarCoord::new(1.0, 0.0));
        graph.add_node(PolarCoord::new(5.0, 0.0));
        graph.add_node(PolarCoord::new(3.0, 0.0));
        let query = graph.add_node(PolarCoord::new(0.0, 0.0));

        let neighbors = k_closest(&graph, query, 3);
        assert_eq!(ids(&neighbors), vec![1, 3, 2]);
        assert!(neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_ties_break_by_id() {
        let mut graph = DiskGraph::new();
        graph.add_node(PolarCoord::new(2.0, 0.0));
        graph.add_node(PolarCoord::new(2.0, std::f64::consts::PI));
        graph.add_node(PolarCoord::new(2.0, 0.0));
        let query = graph.add_node(PolarCoord::new(0.0, 0.0));

        let neighbors = k_closest(&graph, query, 2);
        assert_eq!(ids(&neighbors), vec![0, 1]);
    }

    fn hub_and_near(hub_degree: usize) -> (DiskGraph, NodeId, NodeId, NodeId) {
        let mut graph = DiskGraph::new();
        let hub = graph.add_node(PolarCoord::new(4.0, 0.0));
        let near = graph.add_node(PolarCoord::new(1.0, 0.0));
        let leaf = graph.add_node(PolarCoord::new(9.0, 2.0));
        for _ in 0..hub_degree {
            graph.add_edge(leaf, hub);
        }
        let query = graph.add_node(PolarCoord::new(0.0, 0.0));
        (graph, hub, near, query)
    }

    #[test]
    fn test_hub_attracts_farther_query() {
        // degree(hub) == 4, so 4 / sqrt(4) == 2 > 1: near still wins.
        let (graph, _, near, query) = hub_and_near(4);
        assert_eq!(k_closest(&graph, query, 1)[0].id, near);

        // degree(hub) == 16, so 4 / 4 == 1 ties with near; lower id wins.
        let (graph, hub, _, query) = hub_and_near(16);
        let closest = k_closest(&graph, query, 1);
        assert_eq!(closest[0].id, hub);
        assert_eq!(closest[0].distance, 1.0);
    }

    #[test]
    fn test_ignores_later_nodes() {
        let mut graph = DiskGraph::new();
        graph.add_node(PolarCoord::new(5.0, 0.0));
        let query = graph.add_node(PolarCoord::new(0.0, 0.0));
        graph.add_node(PolarCoord::new(0.1, 0.0));

        let index = SpatialIndex::from_graph(&graph);
        assert_eq!(ids(&k_closest(&graph, query, 3)), vec![0]);
        assert_eq!(ids(&k_closest_indexed(&graph, &index, query, 3)), vec![0]);
    }

    #[test]
    fn test_indexed_matches_exhaustive_on_random_graph() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut graph = DiskGraph::new();
        for _ in 0..200 {
            crate::generator::placement::add_node(&mut graph, &mut rng, 10.0);
        }
        // Give a few nodes large degrees so weighting matters.
        for leaf in 10..120u32 {
            graph.add_edge(NodeId(leaf), NodeId(leaf % 4));
        }
        let index = SpatialIndex::from_graph(&graph);

        for query in [1u32, 5, 50, 150, 199] {
            let query = NodeId(query);
            assert_eq!(
                k_closest(&graph, query, 3),
                k_closest_indexed(&graph, &index, query, 3),
                "query {query}"
            );
        }
    }

    #[test]
    fn test_indexed_handles_coincident_points() {
        let mut graph = DiskGraph::new();
        for _ in 0..4 {
            graph.add_node(PolarCoord::new(1.0, 1.0));
        }
        let query = graph.add_node(PolarCoord::new(1.0, 1.0));
        let index = SpatialIndex::from_graph(&graph);

        let neighbors = k_closest_indexed(&graph, &index, query, 3);
        assert_eq!(ids(&neighbors), vec![0, 1, 2]);
    }
}
