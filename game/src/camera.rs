//! Viewport tracking the player.

use serde::{Deserialize, Serialize};

use crate::config::{CAMERA_HEIGHT, CAMERA_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: CAMERA_WIDTH,
            height: CAMERA_HEIGHT,
        }
    }

    /// Center on the target, clamped so the view never leaves the world
    pub fn follow(&mut self, target: Vec2) {
        self.x = (target.x - self.width / 2.0).clamp(0.0, WORLD_WIDTH - self.width);
        self.y = (target.y - self.height / 2.0).clamp(0.0, WORLD_HEIGHT - self.height);
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.x
            && pos.x <= self.x + self.width
            && pos.y >= self.y
            && pos.y <= self.y + self.height
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centers_on_target() {
        let mut camera = Camera::new();
        camera.follow(Vec2::new(1500.0, 1500.0));
        assert_eq!(camera.x, 1500.0 - CAMERA_WIDTH / 2.0);
        assert_eq!(camera.y, 1500.0 - CAMERA_HEIGHT / 2.0);
    }

    #[test]
    fn test_follow_clamps_at_world_edges() {
        let mut camera = Camera::new();
        camera.follow(Vec2::new(0.0, 0.0));
        assert_eq!((camera.x, camera.y), (0.0, 0.0));

        camera.follow(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT));
        assert_eq!(camera.x, WORLD_WIDTH - CAMERA_WIDTH);
        assert_eq!(camera.y, WORLD_HEIGHT - CAMERA_HEIGHT);
    }

    #[test]
    fn test_contains() {
        let mut camera = Camera::new();
        camera.follow(Vec2::new(1500.0, 1500.0));
        assert!(camera.contains(Vec2::new(1500.0, 1500.0)));
        assert!(!camera.contains(Vec2::new(100.0, 100.0)));
    }
}
