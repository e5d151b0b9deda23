//! Phased boss behavior.
//!
//! The boss steps through four phases keyed to remaining health. Each
//! phase keeps everything from the previous one and adds a special
//! attack on its own timer. Phase transitions are one-way.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{self, projectile};
use crate::math::{from_angle, Vec2};
use crate::projectiles::{Owner, Projectile, ProjectileKind};

use super::{Enemy, EnemyAction, EnemyKind, EnemyType};

/// Health percentages at which phases 2, 3 and 4 begin
const PHASE_THRESHOLDS: [f32; 3] = [0.75, 0.50, 0.25];
const PHASE_SPEED_MULT: [f32; 4] = [1.0, 1.0, 1.2, 1.5];

const SPRAY_INTERVAL_MS: u64 = 2_000;
const FINAL_SPRAY_INTERVAL_MS: u64 = 1_500;
const SPRAY_COUNT: usize = 12;

const PHASE2_SPECIAL_INTERVAL_MS: u64 = 7_000;
const PHASE3_SPECIAL_INTERVAL_MS: u64 = 5_000;
const PHASE4_SPECIAL_INTERVAL_MS: u64 = 4_000;

pub const INVULNERABILITY_MS: u64 = 3_000;
const MINION_COUNT: usize = 3;
const MINION_DISTANCE: f32 = 100.0;

const CHARGE_MS: u64 = 1_000;
const CHARGE_SPEED_FACTOR: f32 = 4.0;
const SHOCKWAVE_COUNT: usize = 16;

/// A committed dash: direction is locked at the moment the charge
/// starts and does not track the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub vel: Vec2,
    pub until_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    pub phase: u8,
    pub next_spray_at_ms: u64,
    pub next_special_at_ms: u64,
    pub invulnerable_until_ms: u64,
    pub charge: Option<Charge>,
}

impl Default for BossState {
    fn default() -> Self {
        Self {
            phase: 1,
            next_spray_at_ms: 0,
            next_special_at_ms: 0,
            invulnerable_until_ms: 0,
            charge: None,
        }
    }
}

fn phase_for(health_pct: f32) -> u8 {
    1 + PHASE_THRESHOLDS.iter().filter(|t| health_pct <= **t).count() as u8
}

pub fn update_boss(
    enemy: &mut Enemy,
    player_pos: Vec2,
    now_ms: u64,
    dt: f32,
    actions: &mut Vec<EnemyAction>,
) {
    let base_speed = config::enemy_stats(EnemyType::Boss).speed;
    let health_pct = enemy.health / enemy.max_health;
    let pos = enemy.pos;
    let damage = enemy.damage;

    let state = match &mut enemy.kind {
        EnemyKind::Boss(state) => state,
        _ => return,
    };

    let target_phase = phase_for(health_pct);
    if target_phase > state.phase {
        state.phase = target_phase;
    }

    // Movement: a running charge overrides pursuit and ends in a
    // radial shockwave.
    let mut new_pos = pos;
    match state.charge {
        Some(charge) if now_ms >= charge.until_ms => {
            state.charge = None;
            shockwave(pos, damage, actions);
        }
        Some(charge) => {
            new_pos.x += charge.vel.x * dt;
            new_pos.y += charge.vel.y * dt;
        }
        None => {
            let speed = base_speed * PHASE_SPEED_MULT[(state.phase - 1) as usize];
            let dist = pos.distance_to(player_pos);
            if dist > f32::EPSILON {
                new_pos.x += (player_pos.x - pos.x) / dist * speed * dt;
                new_pos.y += (player_pos.y - pos.y) / dist * speed * dt;
            }
        }
    }

    if now_ms >= state.next_spray_at_ms {
        spray(new_pos, damage, actions);
        let interval = if state.phase >= 4 {
            FINAL_SPRAY_INTERVAL_MS
        } else {
            SPRAY_INTERVAL_MS
        };
        state.next_spray_at_ms = now_ms + interval;
    }

    if state.phase >= 2 && now_ms >= state.next_special_at_ms {
        match state.phase {
            2 => {
                state.invulnerable_until_ms = now_ms + INVULNERABILITY_MS;
                summon_minions(new_pos, actions);
                state.next_special_at_ms = now_ms + PHASE2_SPECIAL_INTERVAL_MS;
            }
            3 => {
                state.charge = Some(start_charge(new_pos, player_pos, base_speed, now_ms));
                state.next_special_at_ms = now_ms + PHASE3_SPECIAL_INTERVAL_MS;
            }
            _ => {
                if rand::thread_rng().gen_bool(0.5) {
                    state.invulnerable_until_ms = now_ms + INVULNERABILITY_MS;
                    summon_minions(new_pos, actions);
                } else {
                    state.charge = Some(start_charge(new_pos, player_pos, base_speed, now_ms));
                }
                state.next_special_at_ms = now_ms + PHASE4_SPECIAL_INTERVAL_MS;
            }
        }
    }

    enemy.pos = new_pos;
}

/// Evenly spaced radial volley at half the boss's contact damage
fn spray(pos: Vec2, damage: f32, actions: &mut Vec<EnemyAction>) {
    for i in 0..SPRAY_COUNT {
        let angle = i as f32 * std::f32::consts::TAU / SPRAY_COUNT as f32;
        let dir = from_angle(angle);
        actions.push(EnemyAction::Fire(Projectile {
            pos,
            vel: Vec2::new(dir.x * projectile::ENEMY_SPEED, dir.y * projectile::ENEMY_SPEED),
            radius: projectile::ENEMY_RADIUS,
            damage: damage / 2.0,
            owner: Owner::Enemy,
            kind: ProjectileKind::Standard,
        }));
    }
}

/// Denser, faster, larger ring released when a charge ends
fn shockwave(pos: Vec2, damage: f32, actions: &mut Vec<EnemyAction>) {
    for i in 0..SHOCKWAVE_COUNT {
        let angle = i as f32 * std::f32::consts::TAU / SHOCKWAVE_COUNT as f32;
        let dir = from_angle(angle);
        let speed = projectile::ENEMY_SPEED * 2.0;
        actions.push(EnemyAction::Fire(Projectile {
            pos,
            vel: Vec2::new(dir.x * speed, dir.y * speed),
            radius: projectile::ENEMY_RADIUS * 2.0,
            damage: damage / 3.0,
            owner: Owner::Enemy,
            kind: ProjectileKind::Standard,
        }));
    }
}

fn summon_minions(pos: Vec2, actions: &mut Vec<EnemyAction>) {
    for i in 0..MINION_COUNT {
        let angle = i as f32 * std::f32::consts::TAU / MINION_COUNT as f32;
        let dir = from_angle(angle);
        actions.push(EnemyAction::Summon {
            enemy_type: EnemyType::Shooter,
            pos: Vec2::new(pos.x + dir.x * MINION_DISTANCE, pos.y + dir.y * MINION_DISTANCE),
            orbit: None,
        });
    }
}

fn start_charge(pos: Vec2, player_pos: Vec2, base_speed: f32, now_ms: u64) -> Charge {
    let dir = from_angle(pos.angle_to(player_pos));
    let speed = base_speed * CHARGE_SPEED_FACTOR;
    Charge {
        vel: Vec2::new(dir.x * speed, dir.y * speed),
        until_ms: now_ms + CHARGE_MS,
    }
}
