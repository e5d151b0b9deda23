//! Enemy entities: movement, attacks, and per-kind behavior.
//!
//! Behavior is a dispatch over [`EnemyKind`], evaluated once per enemy
//! per frame. Attacks and summons are collected as [`EnemyAction`]s and
//! applied by the owning state after the pass, so no enemy mutates a
//! store another enemy is reading.

pub mod arsenal;
pub mod boss;
pub mod spawner;

use serde::{Deserialize, Serialize};

use crate::config::{self, shooter, SHIELD_HITS};
use crate::math::{from_angle, Vec2};
use crate::projectiles::{Owner, Projectile, ProjectileKind};

use arsenal::ArsenalState;
use boss::BossState;

/// Shooter projectile speed
const SHOOTER_SHOT_SPEED: f32 = 240.0;

/// Berserker rage: health-percentage breakpoints and the stage
/// multipliers they unlock. Stage transitions are a one-way ratchet.
const RAGE_THRESHOLDS: [f32; 3] = [0.75, 0.50, 0.25];
const RAGE_SPEED_MULT: [f32; 4] = [1.0, 1.3, 1.6, 2.0];
const RAGE_DAMAGE_MULT: [f32; 4] = [1.0, 1.5, 2.0, 3.0];

/// Plain kind tag used for stat lookup and wave composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyType {
    Normal,
    Tank,
    Shooter,
    Berserker,
    Boss,
    ArsenalBoss,
    ArsenalTurret,
}

/// Orbit attachment for a turret deployed by an arsenal boss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurretOrbit {
    /// Enemy id of the parent boss
    pub parent: u64,
    pub angle: f32,
}

/// Kind tag plus the kind-specific transient state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnemyKind {
    Normal,
    Tank,
    Shooter { next_shot_at_ms: u64 },
    Berserker { rage_stage: u8 },
    Boss(BossState),
    ArsenalBoss(ArsenalState),
    ArsenalTurret {
        next_shot_at_ms: u64,
        orbit: Option<TurretOrbit>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u64,
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    /// Hits absorbed before health loss begins
    pub shield: u32,
    pub kind: EnemyKind,
    /// Cosmetic chain-lightning mark, rendered while in the future
    pub crackling_until_ms: u64,
}

impl Enemy {
    pub fn spawn(
        id: u64,
        enemy_type: EnemyType,
        pos: Vec2,
        shielded: bool,
        now_ms: u64,
        orbit: Option<TurretOrbit>,
    ) -> Self {
        let stats = config::enemy_stats(enemy_type);

        let kind = match enemy_type {
            EnemyType::Normal => EnemyKind::Normal,
            EnemyType::Tank => EnemyKind::Tank,
            EnemyType::Shooter => EnemyKind::Shooter {
                next_shot_at_ms: now_ms + shooter::COOLDOWN_MS,
            },
            EnemyType::Berserker => EnemyKind::Berserker { rage_stage: 0 },
            EnemyType::Boss => EnemyKind::Boss(BossState::default()),
            EnemyType::ArsenalBoss => EnemyKind::ArsenalBoss(ArsenalState::new()),
            EnemyType::ArsenalTurret => EnemyKind::ArsenalTurret {
                next_shot_at_ms: now_ms + config::turret::COOLDOWN_MS,
                orbit,
            },
        };

        let shield = if shielded {
            SHIELD_HITS
        } else if enemy_type == EnemyType::ArsenalBoss {
            // The arsenal boss spawns behind its full shield ring
            arsenal::SHIELD_SEGMENTS as u32
        } else {
            0
        };

        Self {
            id,
            pos,
            radius: stats.radius,
            health: stats.health,
            max_health: stats.health,
            damage: stats.damage,
            speed: stats.speed,
            shield,
            kind,
            crackling_until_ms: 0,
        }
    }

    pub fn kind_type(&self) -> EnemyType {
        match self.kind {
            EnemyKind::Normal => EnemyType::Normal,
            EnemyKind::Tank => EnemyType::Tank,
            EnemyKind::Shooter { .. } => EnemyType::Shooter,
            EnemyKind::Berserker { .. } => EnemyType::Berserker,
            EnemyKind::Boss(_) => EnemyType::Boss,
            EnemyKind::ArsenalBoss(_) => EnemyType::ArsenalBoss,
            EnemyKind::ArsenalTurret { .. } => EnemyType::ArsenalTurret,
        }
    }

    /// Bosses gate wave advancement and survive player contact
    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss(_) | EnemyKind::ArsenalBoss(_))
    }

    pub fn is_invulnerable(&self, now_ms: u64) -> bool {
        match &self.kind {
            EnemyKind::Boss(state) => now_ms < state.invulnerable_until_ms,
            _ => false,
        }
    }

    pub fn is_crackling(&self, now_ms: u64) -> bool {
        now_ms < self.crackling_until_ms
    }

    /// Apply one hit: the shield absorbs it while any charge remains,
    /// otherwise health drops (clamped at zero).
    pub fn absorb_or_damage(&mut self, damage: f32) {
        if self.shield > 0 {
            self.shield -= 1;
        } else {
            self.damage_ignoring_shield(damage);
        }
    }

    /// Direct health damage, bypassing the shield (piercing lasers)
    pub fn damage_ignoring_shield(&mut self, damage: f32) {
        self.health = (self.health - damage).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn xp_reward(&self) -> u32 {
        config::xp_reward(self.kind_type())
    }
}

/// Deferred effect of an enemy update, applied by the owning state
#[derive(Debug, Clone)]
pub enum EnemyAction {
    Fire(Projectile),
    Summon {
        enemy_type: EnemyType,
        pos: Vec2,
        orbit: Option<TurretOrbit>,
    },
}

/// Advance every enemy one frame: movement, attacks, and pairwise
/// separation. Returns the attack/summon effects for the caller.
pub fn update_enemies(
    enemies: &mut [Enemy],
    player_pos: Vec2,
    now_ms: u64,
    dt: f32,
) -> Vec<EnemyAction> {
    // Snapshot of positions for orbit parents, taken before any movement
    let positions: Vec<(u64, Vec2)> = enemies.iter().map(|e| (e.id, e.pos)).collect();

    let mut actions = Vec::new();
    for enemy in enemies.iter_mut() {
        match enemy.kind_type() {
            EnemyType::Normal | EnemyType::Tank => seek(enemy, player_pos, dt),
            EnemyType::Berserker => update_berserker(enemy, player_pos, dt),
            EnemyType::Shooter => update_shooter(enemy, player_pos, now_ms, dt, &mut actions),
            EnemyType::Boss => boss::update_boss(enemy, player_pos, now_ms, dt, &mut actions),
            EnemyType::ArsenalBoss => {
                arsenal::update_arsenal(enemy, player_pos, now_ms, dt, &mut actions)
            }
            EnemyType::ArsenalTurret => {
                arsenal::update_turret(enemy, player_pos, now_ms, dt, &positions, &mut actions)
            }
        }
    }

    apply_separation(enemies);
    actions
}

/// Steer directly toward a target at the enemy's current speed
pub(crate) fn seek(enemy: &mut Enemy, target: Vec2, dt: f32) {
    let dist = enemy.pos.distance_to(target);
    if dist <= f32::EPSILON {
        return;
    }
    enemy.pos.x += (target.x - enemy.pos.x) / dist * enemy.speed * dt;
    enemy.pos.y += (target.y - enemy.pos.y) / dist * enemy.speed * dt;
}

fn update_berserker(enemy: &mut Enemy, player_pos: Vec2, dt: f32) {
    let pct = enemy.health / enemy.max_health;
    let target_stage = RAGE_THRESHOLDS.iter().filter(|t| pct <= **t).count() as u8;

    if let EnemyKind::Berserker { rage_stage } = &mut enemy.kind {
        // One-way ratchet: the stage never decreases
        if target_stage > *rage_stage {
            *rage_stage = target_stage;
            let base = config::enemy_stats(EnemyType::Berserker);
            enemy.speed = base.speed * RAGE_SPEED_MULT[target_stage as usize];
            enemy.damage = base.damage * RAGE_DAMAGE_MULT[target_stage as usize];
        }
    }

    seek(enemy, player_pos, dt);
}

fn update_shooter(
    enemy: &mut Enemy,
    player_pos: Vec2,
    now_ms: u64,
    dt: f32,
    actions: &mut Vec<EnemyAction>,
) {
    let dist = enemy.pos.distance_to(player_pos);
    if dist > shooter::RANGE {
        seek(enemy, player_pos, dt);
    }

    let pos = enemy.pos;
    let damage = enemy.damage;
    if let EnemyKind::Shooter { next_shot_at_ms } = &mut enemy.kind {
        if now_ms >= *next_shot_at_ms {
            let dir = from_angle(pos.angle_to(player_pos));
            actions.push(EnemyAction::Fire(Projectile {
                pos,
                vel: Vec2::new(dir.x * SHOOTER_SHOT_SPEED, dir.y * SHOOTER_SHOT_SPEED),
                radius: config::projectile::ENEMY_RADIUS,
                damage,
                owner: Owner::Enemy,
                kind: ProjectileKind::Standard,
            }));
            *next_shot_at_ms = now_ms + shooter::COOLDOWN_MS;
        }
    }
}

fn separates(enemy: &Enemy) -> bool {
    matches!(
        enemy.kind_type(),
        EnemyType::Normal | EnemyType::Tank | EnemyType::Shooter | EnemyType::Berserker
    )
}

/// Soft pairwise push-apart, proportional to overlap depth, so regular
/// enemies do not stack into a single point.
fn apply_separation(enemies: &mut [Enemy]) {
    for i in 0..enemies.len() {
        for j in (i + 1)..enemies.len() {
            let (head, tail) = enemies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if !separates(a) || !separates(b) {
                continue;
            }

            let dist = a.pos.distance_to(b.pos);
            let min_dist = a.radius + b.radius;
            if dist >= min_dist || dist <= f32::EPSILON {
                continue;
            }

            let overlap = min_dist - dist;
            let push = overlap * 0.25;
            let nx = (b.pos.x - a.pos.x) / dist;
            let ny = (b.pos.y - a.pos.y) / dist;
            a.pos.x -= nx * push;
            a.pos.y -= ny * push;
            b.pos.x += nx * push;
            b.pos.y += ny * push;
        }
    }
}
