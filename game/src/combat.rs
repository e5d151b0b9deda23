//! Collision and damage resolution.
//!
//! One call per frame, after movement and projectile integration. The
//! passes run in a fixed order: player contact, enemy shots against
//! the player, player shots against enemies, then beams. Kills are not
//! processed here; enemies at zero health stay in the store for the
//! owning state to sweep, so XP and drops are granted exactly once.

use crate::enemies::Enemy;
use crate::player::Player;
use crate::projectiles::{Projectile, ProjectileKind};
use crate::weapons::drones::PULSE_INTERVAL_MS;
use crate::weapons::laser::Beam;

const ROCKET_SPLASH_FACTOR: f32 = 0.5;

/// Resolve one frame of combat. Returns `true` when the player's
/// health reached zero this frame.
pub fn resolve(
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    projectiles: &mut Vec<Projectile>,
    beams: &mut [Beam],
    now_ms: u64,
) -> bool {
    let invincible = player.is_invincible(now_ms);
    let player_pos = player.pos;
    let player_radius = player.radius;

    // Pass 1: body contact. Regular enemies trade themselves for the
    // hit; bosses stay. Simultaneous contacts all land.
    let mut incoming = 0.0f32;
    enemies.retain(|enemy| {
        if enemy.pos.distance_to(player_pos) >= enemy.radius + player_radius {
            return true;
        }
        if !invincible {
            incoming += enemy.damage;
        }
        enemy.is_boss()
    });

    // Pass 2: enemy shots against the player. A shot is consumed on
    // contact whether or not it dealt damage.
    projectiles.retain(|shot| {
        if !shot.is_enemy_shot() {
            return true;
        }
        if shot.pos.distance_to(player_pos) < shot.radius + player_radius {
            if !invincible {
                incoming += shot.damage;
            }
            return false;
        }
        true
    });

    player.health = (player.health - incoming).max(0.0);
    if player.health <= 0.0 {
        // The frame ends here; nothing the dead player fired resolves
        return true;
    }

    // Pass 3: player shots against enemies. Each shot stops at the
    // first enemy it overlaps; an invulnerable boss consumes the shot
    // with no effect at all, splash included.
    let mut i = 0;
    while i < projectiles.len() {
        let shot = &mut projectiles[i];
        if shot.is_enemy_shot() {
            i += 1;
            continue;
        }

        if let ProjectileKind::DronePulse { tendril_radius, next_pulse_at_ms, .. } = &mut shot.kind
        {
            // Pulses are area ticks, never consumed by contact
            if now_ms >= *next_pulse_at_ms {
                let radius = *tendril_radius;
                let pos = shot.pos;
                let damage = shot.damage;
                for enemy in enemies.iter_mut() {
                    if enemy.is_invulnerable(now_ms) {
                        continue;
                    }
                    if enemy.pos.distance_to(pos) <= radius + enemy.radius {
                        enemy.absorb_or_damage(damage);
                    }
                }
                *next_pulse_at_ms = now_ms + PULSE_INTERVAL_MS;
            }
            i += 1;
            continue;
        }

        let hit = enemies
            .iter()
            .position(|e| e.pos.distance_to(shot.pos) < e.radius + shot.radius);
        let Some(target) = hit else {
            i += 1;
            continue;
        };

        let pos = shot.pos;
        let damage = shot.damage;
        let explosion = match shot.kind {
            ProjectileKind::Rocket { explosion_radius } => Some(explosion_radius),
            _ => None,
        };

        if !enemies[target].is_invulnerable(now_ms) {
            enemies[target].absorb_or_damage(damage);
            if let Some(blast_radius) = explosion {
                for (j, enemy) in enemies.iter_mut().enumerate() {
                    if j == target || enemy.is_invulnerable(now_ms) {
                        continue;
                    }
                    if enemy.pos.distance_to(pos) <= blast_radius + enemy.radius {
                        enemy.absorb_or_damage(damage * ROCKET_SPLASH_FACTOR);
                    }
                }
            }
        }
        projectiles.remove(i);
    }

    // Pass 4: beams pierce everything they cross, once per beam, and
    // ignore shields outright.
    for beam in beams.iter_mut() {
        for enemy in enemies.iter_mut() {
            if beam.hit.contains(&enemy.id) || enemy.is_invulnerable(now_ms) {
                continue;
            }
            if beam.crosses(enemy.pos, enemy.radius) {
                enemy.damage_ignoring_shield(beam.damage);
                beam.hit.push(enemy.id);
            }
        }
    }

    player.health <= 0.0
}
