//! Rockets: single heavy projectile with splash on impact.

use crate::config::projectile;
use crate::math::{from_angle, Vec2};
use crate::player::Player;
use crate::projectiles::{Owner, Projectile, ProjectileKind};

const SPEED: f32 = 360.0;
const BASE_EXPLOSION_RADIUS: f32 = 80.0;
const EXPLOSION_RADIUS_PER_STAT: f32 = 20.0;

/// Direct-hit damage grows faster than linearly with strength;
/// additional projectiles widen the blast instead of adding rockets.
pub fn fire(player: &Player, target: Vec2) -> Projectile {
    let strength = player.projectile_strength;
    let dir = from_angle(player.pos.angle_to(target));
    Projectile {
        pos: player.pos,
        vel: Vec2::new(dir.x * SPEED, dir.y * SPEED),
        radius: projectile::RADIUS * 1.5,
        damage: strength + (strength - 1.0) * 0.5,
        owner: Owner::Player,
        kind: ProjectileKind::Rocket {
            explosion_radius: BASE_EXPLOSION_RADIUS
                + player.additional_projectiles as f32 * EXPLOSION_RADIUS_PER_STAT,
        },
    }
}
