//! Shotgun: a fan of pellets toward the target.

use crate::config::projectile;
use crate::math::{from_angle, Vec2};
use crate::player::Player;
use crate::projectiles::{Owner, Projectile, ProjectileKind};

const BASE_PELLETS: u32 = 2;
const SPREAD_DEGREES: f32 = 30.0;

/// One trigger pull: `2 + additional_projectiles` pellets spread
/// evenly across a 30 degree arc centered on the target.
pub fn fire(player: &Player, target: Vec2) -> Vec<Projectile> {
    let pellets = BASE_PELLETS + player.additional_projectiles;
    let aim = player.pos.angle_to(target);
    let half_spread = (SPREAD_DEGREES / 2.0).to_radians();
    let step = SPREAD_DEGREES.to_radians() / (pellets - 1) as f32;

    (0..pellets)
        .map(|i| {
            let angle = aim - half_spread + step * i as f32;
            let dir = from_angle(angle);
            Projectile {
                pos: player.pos,
                vel: Vec2::new(dir.x * projectile::SPEED, dir.y * projectile::SPEED),
                radius: projectile::RADIUS,
                damage: player.projectile_strength * projectile::DAMAGE,
                owner: Owner::Player,
                kind: ProjectileKind::Standard,
            }
        })
        .collect()
}
