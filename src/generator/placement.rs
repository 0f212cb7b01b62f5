//! Node placement.
//!
//! Radii are drawn as `sqrt(u * R²)` with `u` uniform in `[0, 1)`, which makes
//! point density uniform over the disk area (so most points sit toward the rim).
//! Angles are uniform in `[0, 2π)`.

use std::f64::consts::TAU;

use rand::distributions::Standard;
use rand::Rng;

use crate::graph::{DiskGraph, NodeId, PolarCoord};

/// Draw a radius in `[0, disk_radius)`.
pub fn sample_radius<R: Rng + ?Sized>(rng: &mut R, disk_radius: f64) -> f64 {
    let u: f64 = rng.sample(Standard);
    (u * disk_radius * disk_radius).sqrt()
}

/// Draw an angle in `[0, 2π)`.
pub fn sample_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..TAU)
}

/// Draw a full coordinate. The radius is drawn before the angle.
pub fn sample_coord<R: Rng + ?Sized>(rng: &mut R, disk_radius: f64) -> PolarCoord {
    let radius = sample_radius(rng, disk_radius);
    let angle = sample_angle(rng);
    PolarCoord::new(radius, angle)
}

/// Place a new node at a random coordinate and return its id.
pub fn add_node<R: Rng + ?Sized>(graph: &mut DiskGraph, rng: &mut R, disk_radius: f64) -> NodeId {
    graph.add_node(sample_coord(rng, disk_radius))
}
