//! Drone swarm: autonomous orbiters that fire pulse shots in bursts.
//!
//! Drones replace the player's aimed attack entirely. Each drone
//! orbits the player, picks the nearest enemy in range, and fires a
//! three-shot burst of pulse projectiles on its own cooldown.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::projectile;
use crate::enemies::Enemy;
use crate::math::{from_angle, Vec2};
use crate::player::Player;
use crate::projectiles::{Owner, Projectile, ProjectileKind};

pub const ORBIT_RADIUS: f32 = 100.0;
const ORBIT_RAD_PER_SEC: f32 = 1.2;
const RANGE: f32 = 500.0;

const BURST_COOLDOWN_MS: u64 = 1_000;
const BURST_SHOTS: u32 = 3;
const BURST_SHOT_DELAY_MS: u64 = 50;
const AIM_JITTER_RAD: f32 = 0.1;

const DAMAGE_FACTOR: f32 = 0.3;
const SHOT_SPEED: f32 = 180.0;
const TENDRIL_RADIUS: f32 = 40.0;
const PULSE_LIFETIME_MS: u64 = 3_000;
pub const PULSE_INTERVAL_MS: u64 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub angle: f32,
    pub next_burst_at_ms: u64,
    pub burst_left: u32,
    pub next_shot_at_ms: u64,
}

impl Drone {
    fn new(angle: f32) -> Self {
        Self {
            angle,
            next_burst_at_ms: 0,
            burst_left: 0,
            next_shot_at_ms: 0,
        }
    }

    pub fn pos(&self, player_pos: Vec2) -> Vec2 {
        Vec2::new(
            player_pos.x + self.angle.cos() * ORBIT_RADIUS,
            player_pos.y + self.angle.sin() * ORBIT_RADIUS,
        )
    }
}

/// Grow or shrink the swarm to `1 + additional_projectiles`, keeping
/// existing drones where they are.
pub fn sync_swarm(drones: &mut Vec<Drone>, player: &Player) {
    let wanted = 1 + player.additional_projectiles as usize;
    while drones.len() < wanted {
        let angle = drones.len() as f32 * std::f32::consts::TAU / wanted as f32;
        drones.push(Drone::new(angle));
    }
    drones.truncate(wanted);
}

/// Advance every drone one frame. Returns the pulse shots fired.
pub fn update_swarm(
    drones: &mut [Drone],
    player: &Player,
    enemies: &[Enemy],
    now_ms: u64,
    dt: f32,
) -> Vec<Projectile> {
    let mut shots = Vec::new();
    let mut rng = rand::thread_rng();

    for drone in drones.iter_mut() {
        drone.angle += ORBIT_RAD_PER_SEC * dt;
        let pos = drone.pos(player.pos);

        if drone.burst_left == 0 && now_ms >= drone.next_burst_at_ms {
            let target_in_range = enemies
                .iter()
                .map(|e| pos.distance_to(e.pos))
                .any(|d| d <= RANGE);
            if target_in_range {
                drone.burst_left = BURST_SHOTS;
                drone.next_shot_at_ms = now_ms;
            }
        }

        if drone.burst_left > 0 && now_ms >= drone.next_shot_at_ms {
            let target = enemies
                .iter()
                .map(|e| (e.pos, pos.distance_to(e.pos)))
                .filter(|(_, d)| *d <= RANGE)
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((target_pos, _)) = target {
                let aim = pos.angle_to(target_pos)
                    + rng.gen_range(-AIM_JITTER_RAD..=AIM_JITTER_RAD);
                let dir = from_angle(aim);
                shots.push(Projectile {
                    pos,
                    vel: Vec2::new(dir.x * SHOT_SPEED, dir.y * SHOT_SPEED),
                    radius: projectile::RADIUS,
                    damage: player.projectile_strength * DAMAGE_FACTOR,
                    owner: Owner::Player,
                    kind: ProjectileKind::DronePulse {
                        tendril_radius: TENDRIL_RADIUS,
                        expires_at_ms: now_ms + PULSE_LIFETIME_MS,
                        next_pulse_at_ms: now_ms + PULSE_INTERVAL_MS,
                    },
                });
            }

            drone.burst_left -= 1;
            if drone.burst_left == 0 {
                drone.next_burst_at_ms = now_ms + BURST_COOLDOWN_MS;
            } else {
                drone.next_shot_at_ms = now_ms + BURST_SHOT_DELAY_MS;
            }
        }
    }

    shots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::EnemyType;

    fn player_at(pos: Vec2) -> Player {
        let mut player = Player::new();
        player.pos = pos;
        player
    }

    #[test]
    fn test_swarm_size_tracks_stat() {
        let mut player = Player::new();
        let mut drones = Vec::new();
        sync_swarm(&mut drones, &player);
        assert_eq!(drones.len(), 1);

        player.additional_projectiles = 2;
        sync_swarm(&mut drones, &player);
        assert_eq!(drones.len(), 3);

        player.additional_projectiles = 0;
        sync_swarm(&mut drones, &player);
        assert_eq!(drones.len(), 1);
    }

    #[test]
    fn test_holds_fire_with_nothing_in_range() {
        let player = player_at(Vec2::new(1000.0, 1000.0));
        let mut drones = vec![Drone::new(0.0)];
        let enemies = vec![Enemy::spawn(
            1,
            EnemyType::Normal,
            Vec2::new(2900.0, 2900.0),
            false,
            0,
            None,
        )];

        let shots = update_swarm(&mut drones, &player, &enemies, 0, 0.016);
        assert!(shots.is_empty());
        assert_eq!(drones[0].burst_left, 0);
    }

    #[test]
    fn test_burst_fires_three_spaced_shots() {
        let player = player_at(Vec2::new(1000.0, 1000.0));
        let mut drones = vec![Drone::new(0.0)];
        let enemies = vec![Enemy::spawn(
            1,
            EnemyType::Normal,
            Vec2::new(1200.0, 1000.0),
            false,
            0,
            None,
        )];

        let mut fired = 0;
        for step in 0..10u64 {
            let now = step * BURST_SHOT_DELAY_MS;
            fired += update_swarm(&mut drones, &player, &enemies, now, 0.016).len();
        }
        assert_eq!(fired, BURST_SHOTS as usize);

        // Next burst only after the cooldown
        let shots = update_swarm(&mut drones, &player, &enemies, 600, 0.016);
        assert!(shots.is_empty());
        let now = 2 * BURST_SHOT_DELAY_MS + BURST_COOLDOWN_MS;
        let shots = update_swarm(&mut drones, &player, &enemies, now, 0.016);
        assert_eq!(shots.len(), 1);
    }

    #[test]
    fn test_pulse_shots_carry_reduced_damage() {
        let mut player = player_at(Vec2::new(1000.0, 1000.0));
        player.projectile_strength = 2.0;
        let mut drones = vec![Drone::new(0.0)];
        let enemies = vec![Enemy::spawn(
            1,
            EnemyType::Normal,
            Vec2::new(1200.0, 1000.0),
            false,
            0,
            None,
        )];

        let shots = update_swarm(&mut drones, &player, &enemies, 0, 0.016);
        assert_eq!(shots.len(), 1);
        assert!((shots[0].damage - 0.6).abs() < 1e-6);
        assert!(matches!(shots[0].kind, ProjectileKind::DronePulse { .. }));
    }
}
