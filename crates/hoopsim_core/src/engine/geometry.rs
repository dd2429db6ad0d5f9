//! 2D vector math for court positions and velocities.
//!
//! Units are feet throughout the engine. Kept deliberately small: the
//! simulation only needs distance, normalization, interpolation, and
//! point-to-segment distance.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Unit vector, or (1, 0) for a near-zero input.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len < 1e-6 {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

pub fn dist(a: Vec2, b: Vec2) -> f32 {
    a.distance_to(b)
}

/// Distance from `point` to the segment `from`-`to`, with the projection
/// parameter clamped to [0, 1]. Degenerate segments fall back to point
/// distance.
pub fn distance_to_segment(point: Vec2, from: Vec2, to: Vec2) -> f32 {
    let seg = to - from;
    let len_sq = seg.dot(seg);
    if len_sq < 1e-9 {
        return dist(point, from);
    }
    let t = ((point - from).dot(seg) / len_sq).clamp(0.0, 1.0);
    dist(point, from + seg * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_normalize() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
        let n = v.normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_distance_to_segment_interior() {
        let d = distance_to_segment(Vec2::new(5.0, 3.0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_to_segment_clamps_to_endpoints() {
        let d = distance_to_segment(Vec2::new(-4.0, 3.0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let p = Vec2::new(1.0, 1.0);
        let d = distance_to_segment(p, Vec2::ZERO, Vec2::ZERO);
        assert!((d - p.length()).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 0.0));
        assert_eq!(a.lerp(b, 2.0), b);
    }
}
