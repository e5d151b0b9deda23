//! Projectile store and per-frame integration.

use serde::{Deserialize, Serialize};

use crate::config::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::math::Vec2;

/// Who fired a projectile. Enemy shots can only damage the player;
/// player shots can only damage enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectileKind {
    Standard,
    /// Explodes on impact, splashing nearby enemies
    Rocket { explosion_radius: f32 },
    /// Area pulse shot from a drone: damages everything within the
    /// tendril radius on a fixed interval, wraps at world bounds, and
    /// despawns only when its lifetime ends.
    DronePulse {
        tendril_radius: f32,
        expires_at_ms: u64,
        next_pulse_at_ms: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub owner: Owner,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn is_enemy_shot(&self) -> bool {
        self.owner == Owner::Enemy
    }
}

/// Advance all projectiles one step. Out-of-bounds projectiles are
/// removed, except drone pulses which wrap until their lifetime ends.
pub fn integrate(projectiles: &mut Vec<Projectile>, dt: f32, now_ms: u64) {
    projectiles.retain_mut(|p| {
        p.pos.x += p.vel.x * dt;
        p.pos.y += p.vel.y * dt;

        match p.kind {
            ProjectileKind::DronePulse { expires_at_ms, .. } => {
                if now_ms >= expires_at_ms {
                    return false;
                }
                p.pos.x = p.pos.x.rem_euclid(WORLD_WIDTH);
                p.pos.y = p.pos.y.rem_euclid(WORLD_HEIGHT);
                true
            }
            _ => {
                p.pos.x >= 0.0 && p.pos.x <= WORLD_WIDTH && p.pos.y >= 0.0 && p.pos.y <= WORLD_HEIGHT
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_at(pos: Vec2, vel: Vec2) -> Projectile {
        Projectile {
            pos,
            vel,
            radius: 5.0,
            damage: 1.0,
            owner: Owner::Player,
            kind: ProjectileKind::Standard,
        }
    }

    #[test]
    fn test_out_of_bounds_removal() {
        let mut projectiles = vec![
            standard_at(Vec2::new(10.0, 10.0), Vec2::new(-300.0, 0.0)),
            standard_at(Vec2::new(1500.0, 1500.0), Vec2::new(300.0, 0.0)),
        ];
        integrate(&mut projectiles, 0.1, 0);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].pos.x, 1530.0);
    }

    #[test]
    fn test_drone_pulse_wraps_until_expiry() {
        let mut projectiles = vec![Projectile {
            pos: Vec2::new(WORLD_WIDTH - 5.0, 100.0),
            vel: Vec2::new(300.0, 0.0),
            radius: 3.0,
            damage: 0.3,
            owner: Owner::Player,
            kind: ProjectileKind::DronePulse {
                tendril_radius: 40.0,
                expires_at_ms: 1_000,
                next_pulse_at_ms: 0,
            },
        }];

        // Crosses the right edge: wraps instead of despawning
        integrate(&mut projectiles, 0.1, 500);
        assert_eq!(projectiles.len(), 1);
        assert!(projectiles[0].pos.x < WORLD_WIDTH);

        // Lifetime over: removed
        integrate(&mut projectiles, 0.1, 1_000);
        assert!(projectiles.is_empty());
    }
}
