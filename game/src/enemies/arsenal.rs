//! The arsenal boss: a slow weapons platform behind a rotating shield
//! ring, escalating through turret deployments as it loses health.
//!
//! The shield counter on the enemy is the source of truth for how many
//! ring segments remain; the update pass truncates the segment list to
//! match after combat has absorbed hits.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{self, projectile, turret};
use crate::math::{from_angle, Vec2};
use crate::projectiles::{Owner, Projectile, ProjectileKind};

use super::{Enemy, EnemyAction, EnemyKind, EnemyType, TurretOrbit};

pub const SHIELD_SEGMENTS: usize = 8;
const SHIELD_RADIUS: f32 = 60.0;
const RING_ROTATION_RAD_PER_SEC: f32 = 1.2;

const SEGMENT_COOLDOWN_MS: u64 = 3_000;
const SEGMENT_AIM_JITTER_RAD: f32 = 0.25;

const MAIN_SHOT_COOLDOWN_MS: u64 = 2_000;
const MAIN_SHOT_SPEED_FACTOR: f32 = 1.5;
const MAIN_SHOT_RADIUS_FACTOR: f32 = 2.0;

const PHASE_THRESHOLDS: [f32; 3] = [0.75, 0.50, 0.25];
const TURRET_COUNT: usize = 4;
const STATIONARY_TURRET_DISTANCE: f32 = 150.0;
pub const ORBIT_RADIUS: f32 = 150.0;
const ORBIT_RAD_PER_SEC: f32 = 0.6;

/// The platform advances at half speed and parks at this distance
const APPROACH_FLOOR: f32 = 100.0;
const APPROACH_SPEED_FACTOR: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldSegment {
    /// Offset on the ring, relative to the ring's rotation
    pub angle: f32,
    /// Set when the ring breaks in phase 2
    pub independent: bool,
    pub next_shot_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArsenalState {
    pub phase: u8,
    pub shield_angle: f32,
    pub segments: Vec<ShieldSegment>,
    pub next_main_shot_at_ms: u64,
}

impl ArsenalState {
    pub fn new() -> Self {
        let segments = (0..SHIELD_SEGMENTS)
            .map(|i| ShieldSegment {
                angle: i as f32 * std::f32::consts::TAU / SHIELD_SEGMENTS as f32,
                independent: false,
                next_shot_at_ms: 0,
            })
            .collect();
        Self {
            phase: 1,
            shield_angle: 0.0,
            segments,
            next_main_shot_at_ms: 0,
        }
    }
}

impl Default for ArsenalState {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_for(health_pct: f32) -> u8 {
    1 + PHASE_THRESHOLDS.iter().filter(|t| health_pct <= **t).count() as u8
}

pub fn update_arsenal(
    enemy: &mut Enemy,
    player_pos: Vec2,
    now_ms: u64,
    dt: f32,
    actions: &mut Vec<EnemyAction>,
) {
    let base_speed = config::enemy_stats(EnemyType::ArsenalBoss).speed;
    let health_pct = enemy.health / enemy.max_health;
    let pos = enemy.pos;
    let damage = enemy.damage;
    let id = enemy.id;
    let shield = enemy.shield;

    let state = match &mut enemy.kind {
        EnemyKind::ArsenalBoss(state) => state,
        _ => return,
    };

    // Phase transitions are one-way; each entry fires its escalation
    // exactly once.
    let target_phase = phase_for(health_pct);
    while state.phase < target_phase {
        state.phase += 1;
        match state.phase {
            2 => {
                // The ring breaks: the platform itself becomes hittable
                // and the surviving segments keep firing on their own.
                for segment in &mut state.segments {
                    segment.independent = true;
                }
                enemy.shield = 0;
            }
            3 => deploy_turrets(pos, None, actions),
            _ => deploy_turrets(pos, Some(id), actions),
        }
    }

    let state = match &mut enemy.kind {
        EnemyKind::ArsenalBoss(state) => state,
        _ => return,
    };

    // Hits absorbed since the last frame knock segments off the ring
    if !state.segments.iter().any(|s| s.independent) {
        state.segments.truncate(shield as usize);
    }

    state.shield_angle += RING_ROTATION_RAD_PER_SEC * dt;

    let mut new_pos = pos;
    let dist = pos.distance_to(player_pos);
    if dist > APPROACH_FLOOR {
        let speed = base_speed * APPROACH_SPEED_FACTOR;
        new_pos.x += (player_pos.x - pos.x) / dist * speed * dt;
        new_pos.y += (player_pos.y - pos.y) / dist * speed * dt;
    }

    if now_ms >= state.next_main_shot_at_ms {
        let dir = from_angle(new_pos.angle_to(player_pos));
        let speed = projectile::ENEMY_SPEED * MAIN_SHOT_SPEED_FACTOR;
        actions.push(EnemyAction::Fire(Projectile {
            pos: new_pos,
            vel: Vec2::new(dir.x * speed, dir.y * speed),
            radius: projectile::ENEMY_RADIUS * MAIN_SHOT_RADIUS_FACTOR,
            damage,
            owner: Owner::Enemy,
            kind: ProjectileKind::Standard,
        }));
        state.next_main_shot_at_ms = now_ms + MAIN_SHOT_COOLDOWN_MS;
    }

    let ring_angle = state.shield_angle;
    let mut rng = rand::thread_rng();
    for segment in &mut state.segments {
        if now_ms < segment.next_shot_at_ms {
            continue;
        }
        let seg_pos = Vec2::new(
            new_pos.x + (ring_angle + segment.angle).cos() * SHIELD_RADIUS,
            new_pos.y + (ring_angle + segment.angle).sin() * SHIELD_RADIUS,
        );
        let aim = seg_pos.angle_to(player_pos)
            + rng.gen_range(-SEGMENT_AIM_JITTER_RAD..=SEGMENT_AIM_JITTER_RAD);
        let dir = from_angle(aim);
        actions.push(EnemyAction::Fire(Projectile {
            pos: seg_pos,
            vel: Vec2::new(
                dir.x * projectile::ENEMY_SPEED,
                dir.y * projectile::ENEMY_SPEED,
            ),
            radius: projectile::ENEMY_RADIUS,
            damage: damage / 2.0,
            owner: Owner::Enemy,
            kind: ProjectileKind::Standard,
        }));
        segment.next_shot_at_ms = now_ms + SEGMENT_COOLDOWN_MS;
    }

    enemy.pos = new_pos;
}

fn deploy_turrets(pos: Vec2, orbit_parent: Option<u64>, actions: &mut Vec<EnemyAction>) {
    for i in 0..TURRET_COUNT {
        let angle = i as f32 * std::f32::consts::TAU / TURRET_COUNT as f32;
        let dir = from_angle(angle);
        let distance = if orbit_parent.is_some() {
            ORBIT_RADIUS
        } else {
            STATIONARY_TURRET_DISTANCE
        };
        actions.push(EnemyAction::Summon {
            enemy_type: EnemyType::ArsenalTurret,
            pos: Vec2::new(pos.x + dir.x * distance, pos.y + dir.y * distance),
            orbit: orbit_parent.map(|parent| TurretOrbit { parent, angle }),
        });
    }
}

/// Turrets never move on their own; orbiting ones ride their parent's
/// position from the start-of-frame snapshot.
pub fn update_turret(
    enemy: &mut Enemy,
    player_pos: Vec2,
    now_ms: u64,
    dt: f32,
    positions: &[(u64, Vec2)],
    actions: &mut Vec<EnemyAction>,
) {
    let pos = enemy.pos;
    let damage = enemy.damage;

    if let EnemyKind::ArsenalTurret { next_shot_at_ms, orbit } = &mut enemy.kind {
        let mut new_pos = pos;
        if let Some(orbit) = orbit {
            // If the parent died the turret holds its last position
            if let Some((_, parent_pos)) = positions.iter().find(|(id, _)| *id == orbit.parent) {
                orbit.angle += ORBIT_RAD_PER_SEC * dt;
                new_pos = Vec2::new(
                    parent_pos.x + orbit.angle.cos() * ORBIT_RADIUS,
                    parent_pos.y + orbit.angle.sin() * ORBIT_RADIUS,
                );
            }
        }

        if now_ms >= *next_shot_at_ms && new_pos.distance_to(player_pos) <= turret::RANGE {
            let dir = from_angle(new_pos.angle_to(player_pos));
            actions.push(EnemyAction::Fire(Projectile {
                pos: new_pos,
                vel: Vec2::new(
                    dir.x * projectile::ENEMY_SPEED,
                    dir.y * projectile::ENEMY_SPEED,
                ),
                radius: projectile::ENEMY_RADIUS,
                damage,
                owner: Owner::Enemy,
                kind: ProjectileKind::Standard,
            }));
            *next_shot_at_ms = now_ms + turret::COOLDOWN_MS;
        }

        enemy.pos = new_pos;
    }
}
