//! Small vector helpers shared by the simulation
//!
//! Thin wrappers over `glam` so radius checks read the same everywhere.

use glam::Vec2;

/// Euclidean distance
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Squared distance (no sqrt, for radius tests)
#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

/// Dot product
#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.dot(b)
}

/// Sign of the z-component of `a × b`
///
/// 1 = `b` turns left of `a`, -1 = right, 0 = collinear.
#[inline]
pub fn cross_sign(a: Vec2, b: Vec2) -> f32 {
    let z = a.perp_dot(b);
    if z > 0.0 {
        1.0
    } else if z < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Unit vector, or zero if the input is (almost) zero-length
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0001 { v / len } else { Vec2::ZERO }
}

/// True if `a` and `b` are within `radius` of each other
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance_sq(a, b) <= radius * radius
}
