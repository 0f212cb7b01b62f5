//! Rich-club coefficient.
//!
//! For each degree `d`, with `N>d` nodes of degree above `d` and `E>d` edges
//! between them:
//!
//! ```text
//! phi(d) = 2 * E>d / (N>d * (N>d - 1))
//! ```
//!
//! evaluated while `N>d > 1`. The normalized coefficient divides by `phi` of a
//! reference graph with the same degree sequence, obtained by `Q * E`
//! double-edge swaps.
//!
//! # References
//!
//! - Colizza et al., "Detecting rich-club ordering in complex networks" (2006)

use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::RichClubConfig;
use crate::error::{ModelError, ModelResult};
use crate::graph::DiskGraph;

/// Attempts allowed per requested swap.
const TRIES_PER_SWAP: u64 = 10;

/// Coefficient at one degree threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RichClubPoint {
    pub degree: u32,
    pub coefficient: f64,
}

/// The rich-club curve of a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichClubCurve {
    pub normalized: bool,
    pub points: Vec<RichClubPoint>,
}

impl RichClubCurve {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat `[degree0, coefficient0, degree1, coefficient1, ...]` pairs.
    pub fn to_pairs(&self) -> Vec<f64> {
        self.points
            .iter()
            .flat_map(|p| [f64::from(p.degree), p.coefficient])
            .collect()
    }
}

/// Unnormalized coefficients; entry `d` is `phi(d)`.
pub fn raw_coefficients(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let degrees: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    let Some(&max_degree) = degrees.iter().max() else {
        return Vec::new();
    };

    let mut histogram = vec![0usize; max_degree + 1];
    for &degree in &degrees {
        histogram[degree] += 1;
    }

    // Smaller endpoint degree of every edge, each edge counted once.
    let mut edge_floor: Vec<usize> = adjacency
        .iter()
        .enumerate()
        .flat_map(|(u, neighbors)| {
            let degrees = &degrees;
            neighbors
                .iter()
                .filter(move |&&v| u < v)
                .map(move |&v| degrees[u].min(degrees[v]))
        })
        .collect();
    edge_floor.sort_unstable();

    let total = degrees.len();
    let mut at_or_below = 0;
    let mut dropped = 0;
    let mut coefficients = Vec::new();
    for (degree, &count) in histogram.iter().enumerate() {
        at_or_below += count;
        let above = total - at_or_below;
        if above <= 1 {
            break;
        }
        while dropped < edge_floor.len() && edge_floor[dropped] <= degree {
            dropped += 1;
        }
        let club_edges = edge_floor.len() - dropped;
        coefficients.push(2.0 * club_edges as f64 / (above as f64 * (above - 1) as f64));
    }
    coefficients
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

fn unlink(neighbors: &mut Vec<usize>, node: usize) {
    if let Some(position) = neighbors.iter().position(|&n| n == node) {
        neighbors.swap_remove(position);
    }
}

/// Randomize `adjacency` in place with degree-preserving double-edge swaps.
///
/// Each attempt picks two distinct nodes `u`, `x` with probability
/// proportional to degree and a random neighbor of each (`v`, `y`). The swap
/// `(u,v),(x,y) -> (u,x),(v,y)` is applied when `v != y` and neither new edge
/// exists yet. Returns the number of attempts used.
pub fn double_edge_swap<R: Rng + ?Sized>(
    adjacency: &mut [Vec<usize>],
    swaps: u64,
    max_tries: u64,
    rng: &mut R,
) -> ModelResult<u64> {
    let nodes = adjacency.len();
    if nodes < 4 {
        return Err(ModelError::TooFewNodes { nodes });
    }
    let mut edges: HashSet<(usize, usize)> = HashSet::new();
    for (u, neighbors) in adjacency.iter().enumerate() {
        for &v in neighbors {
            edges.insert(edge_key(u, v));
        }
    }
    if edges.len() < 2 {
        return Err(ModelError::TooFewEdges { edges: edges.len() });
    }

    let weights: Vec<u64> = adjacency.iter().map(|n| n.len() as u64).collect();
    let Ok(endpoints) = WeightedIndex::new(&weights) else {
        return Err(ModelError::TooFewEdges { edges: edges.len() });
    };

    let mut attempts = 0u64;
    let mut done = 0u64;
    while done < swaps {
        let u = endpoints.sample(rng);
        let x = endpoints.sample(rng);
        if u == x {
            continue;
        }
        let (Some(&v), Some(&y)) = (adjacency[u].choose(rng), adjacency[x].choose(rng)) else {
            continue;
        };
        if v == y {
            continue;
        }

        if !edges.contains(&edge_key(u, x)) && !edges.contains(&edge_key(v, y)) {
            edges.remove(&edge_key(u, v));
            edges.remove(&edge_key(x, y));
            edges.insert(edge_key(u, x));
            edges.insert(edge_key(v, y));

            unlink(&mut adjacency[u], v);
            unlink(&mut adjacency[v], u);
            unlink(&mut adjacency[x], y);
            unlink(&mut adjacency[y], x);
            adjacency[u].push(x);
            adjacency[x].push(u);
            adjacency[v].push(y);
            adjacency[y].push(v);
            done += 1;
        }

        if attempts >= max_tries {
            return Err(ModelError::SwapBudgetExhausted {
                attempts,
                swaps: done,
                requested: swaps,
            });
        }
        attempts += 1;
    }
    Ok(attempts)
}

/// Rich-club curve of `graph`, normalized against a randomized reference
/// when `config.normalized` is set.
///
/// Degrees where the reference coefficient is zero are left out of a
/// normalized curve.
pub fn rich_club_coefficient<R: Rng + ?Sized>(
    graph: &DiskGraph,
    config: &RichClubConfig,
    rng: &mut R,
) -> ModelResult<RichClubCurve> {
    let adjacency = graph.adjacency();
    let raw = raw_coefficients(&adjacency);

    if !config.normalized {
        return Ok(RichClubCurve {
            normalized: false,
            points: raw
                .iter()
                .enumerate()
                .map(|(degree, &coefficient)| RichClubPoint {
                    degree: degree as u32,
                    coefficient,
                })
                .collect(),
        });
    }

    let mut reference = adjacency;
    let swaps = config.q.saturating_mul(graph.edge_count() as u64);
    let attempts = double_edge_swap(
        &mut reference,
        swaps,
        swaps.saturating_mul(TRIES_PER_SWAP),
        rng,
    )?;
    tracing::debug!(swaps, attempts, "randomized rich-club reference");
    let random = raw_coefficients(&reference);

    let mut points = Vec::with_capacity(raw.len());
    for (degree, &coefficient) in raw.iter().enumerate() {
        match random.get(degree) {
            Some(&baseline) if baseline > 0.0 => points.push(RichClubPoint {
                degree: degree as u32,
                coefficient: coefficient / baseline,
            }),
            _ => tracing::debug!(degree, "reference coefficient is zero, point skipped"),
        }
    }

    Ok(RichClubCurve {
        normalized: true,
        points,
    })
}
