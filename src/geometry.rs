//! Planar helpers shared by the point resolvers.

use crate::types::Coord;
use nalgebra::Rotation2;

const EPS: f64 = 1e-12;

#[inline]
pub fn is_finite(p: &Coord) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Unit direction from `from` towards `to`. `None` when both points coincide
/// or the inputs are not finite.
pub fn direction(from: &Coord, to: &Coord) -> Option<Coord> {
    let delta = to - from;
    let len = delta.norm();
    if !len.is_finite() || len <= EPS {
        return None;
    }
    Some(delta / len)
}

/// Point reached by walking `distance` along the unit direction `dir`.
#[inline]
pub fn point_along(origin: &Coord, dir: &Coord, distance: f64) -> Coord {
    origin + dir * distance
}

/// Rotates a direction counter-clockwise by `angle_deg` degrees.
#[inline]
pub fn rotate_deg(dir: &Coord, angle_deg: f64) -> Coord {
    Rotation2::new(angle_deg.to_radians()) * dir
}

/// Intersection of the infinite lines through `a0`-`a1` and `b0`-`b1`.
///
/// Solves the parametric form `a0 + t (a1 - a0) = b0 + s (b1 - b0)`. Returns
/// `None` for parallel or degenerate lines.
pub fn intersect_lines(a0: &Coord, a1: &Coord, b0: &Coord, b1: &Coord) -> Option<Coord> {
    let s1 = a1 - a0;
    let s2 = b1 - b0;
    let denom = -s2.x * s1.y + s1.x * s2.y;
    if !denom.is_finite() || denom.abs() <= EPS {
        return None;
    }
    let s = (-s1.y * (a0.x - b0.x) + s1.x * (a0.y - b0.y)) / denom;
    let t = (s2.x * (a0.y - b0.y) - s2.y * (a0.x - b0.x)) / denom;
    if !s.is_finite() || !t.is_finite() {
        return None;
    }
    let hit = a0 + s1 * t;
    is_finite(&hit).then_some(hit)
}

/// Componentwise mean; `None` for an empty slice.
pub fn mean(points: &[Coord]) -> Option<Coord> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Coord::zeros(), |acc, p| acc + p);
    Some(sum / points.len() as f64)
}
