//! Spatial math helpers.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A 2D point or direction in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit-length copy, or zero if the vector has no length
    pub fn normalized(&self) -> Vec2 {
        let len = self.length();
        if len > f32::EPSILON {
            Vec2::new(self.x / len, self.y / len)
        } else {
            Vec2::default()
        }
    }

    /// Angle of the vector from `self` to `other`, in radians
    pub fn angle_to(&self, other: Vec2) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Unit vector for an angle in radians
pub fn from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Shortest distance from a point to the segment `a`-`b`
pub fn point_to_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;

    let t = if len_sq > f32::EPSILON {
        (((point.x - a.x) * abx + (point.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let closest = Vec2::new(a.x + t * abx, a.y + t * aby);
    point.distance_to(closest)
}

/// Random position on one of the four world edges
pub fn random_edge_position(width: f32, height: f32) -> Vec2 {
    let mut rng = rand::thread_rng();
    match rng.gen_range(0..4) {
        0 => Vec2::new(rng.gen_range(0.0..width), 0.0),
        1 => Vec2::new(rng.gen_range(0.0..width), height),
        2 => Vec2::new(0.0, rng.gen_range(0.0..height)),
        _ => Vec2::new(width, rng.gen_range(0.0..height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_diagonal() {
        let v = Vec2::new(1.0, 1.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_zero_vector() {
        assert_eq!(Vec2::default().normalized(), Vec2::default());
    }

    #[test]
    fn test_point_to_segment_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        // Perpendicular to the middle
        assert!((point_to_segment_distance(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-6);

        // Beyond an endpoint the distance is to the endpoint itself
        assert!((point_to_segment_distance(Vec2::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-6);

        // Degenerate segment
        assert!((point_to_segment_distance(Vec2::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_random_edge_position_is_on_an_edge() {
        for _ in 0..50 {
            let pos = random_edge_position(3000.0, 3000.0);
            let on_edge = pos.x == 0.0 || pos.x == 3000.0 || pos.y == 0.0 || pos.y == 3000.0;
            assert!(on_edge, "{:?} is not on a world edge", pos);
        }
    }
}
