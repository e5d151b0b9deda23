//! Static tuning tables.
//!
//! The simulation consumes these as lookup data and never mutates them.
//! Speeds are world units per second; times are simulation-clock
//! milliseconds.

use crate::enemies::EnemyType;

// World and camera
pub const WORLD_WIDTH: f32 = 3000.0;
pub const WORLD_HEIGHT: f32 = 3000.0;
pub const CAMERA_WIDTH: f32 = 1000.0;
pub const CAMERA_HEIGHT: f32 = 800.0;

/// Time between wave advances
pub const WAVE_INTERVAL_MS: u64 = 20_000;

/// Hits a shielded spawn can absorb before taking health damage
pub const SHIELD_HITS: u32 = 3;

/// Chance that a dying enemy drops a power-up
pub const POWERUP_DROP_CHANCE: f64 = 0.2;

pub mod player {
    pub const SPEED: f32 = 180.0;
    pub const RADIUS: f32 = 10.0;
    pub const HEALTH: f32 = 5.0;
    pub const ATTACK_INTERVAL_MS: u64 = 500;
    pub const PROJECTILE_STRENGTH: f32 = 1.0;
    pub const ADDITIONAL_PROJECTILES: u32 = 0;
    pub const XP_TO_NEXT_LEVEL: u32 = 5;

    // Stat upgrade steps
    pub const MIN_ATTACK_INTERVAL_MS: u64 = 200;
    pub const ATTACK_UPGRADE_STEP_MS: u64 = 100;
    pub const SPEED_UPGRADE_STEP: f32 = 30.0;
}

pub mod projectile {
    pub const SPEED: f32 = 300.0;
    pub const RADIUS: f32 = 5.0;
    pub const DAMAGE: f32 = 1.0;

    // Enemy-owned shots
    pub const ENEMY_SPEED: f32 = 180.0;
    pub const ENEMY_RADIUS: f32 = 5.0;
}

/// Base stats for one enemy kind
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub speed: f32,
    pub health: f32,
    pub damage: f32,
    pub radius: f32,
}

pub fn enemy_stats(enemy_type: EnemyType) -> EnemyStats {
    match enemy_type {
        EnemyType::Normal => EnemyStats {
            speed: 120.0,
            health: 3.0,
            damage: 1.0,
            radius: 10.0,
        },
        EnemyType::Tank => EnemyStats {
            speed: 90.0,
            health: 6.0,
            damage: 2.0,
            radius: 20.0,
        },
        EnemyType::Shooter => EnemyStats {
            speed: 108.0,
            health: 4.0,
            damage: 1.0,
            radius: 15.0,
        },
        EnemyType::Berserker => EnemyStats {
            speed: 96.0,
            health: 8.0,
            damage: 1.0,
            radius: 12.0,
        },
        EnemyType::Boss => EnemyStats {
            speed: 60.0,
            health: 15.0,
            damage: 3.0,
            radius: 40.0,
        },
        EnemyType::ArsenalBoss => EnemyStats {
            speed: 48.0,
            health: 40.0,
            damage: 2.0,
            radius: 50.0,
        },
        EnemyType::ArsenalTurret => EnemyStats {
            speed: 0.0,
            health: 5.0,
            damage: 1.0,
            radius: 12.0,
        },
    }
}

/// XP granted to the player for a kill
pub fn xp_reward(enemy_type: EnemyType) -> u32 {
    match enemy_type {
        EnemyType::Normal => 1,
        EnemyType::Tank => 5,
        EnemyType::Shooter => 3,
        EnemyType::Berserker => 4,
        EnemyType::Boss => 10,
        EnemyType::ArsenalBoss => 15,
        EnemyType::ArsenalTurret => 2,
    }
}

pub mod shooter {
    /// Shooters hold position once closer to the player than this
    pub const RANGE: f32 = 150.0;
    pub const COOLDOWN_MS: u64 = 2_000;
}

pub mod turret {
    pub const RANGE: f32 = 400.0;
    pub const COOLDOWN_MS: u64 = 2_500;
}
