//! The single authoritative local player.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{self, WORLD_HEIGHT, WORLD_WIDTH};
use crate::math::Vec2;
use crate::weapons::Weapon;

/// Stat categories that banked points can be spent on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatUpgrade {
    AttackSpeed,
    Health,
    Damage,
    AdditionalProjectiles,
    MoveSpeed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub xp: u32,
    pub level: u32,
    pub xp_to_next_level: u32,
    pub weapon: Weapon,
    pub projectile_strength: f32,
    pub additional_projectiles: u32,
    pub attack_interval_ms: u64,
    pub invincible_until_ms: u64,
    pub stat_points: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            id: generate_player_id(),
            pos: Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            radius: config::player::RADIUS,
            speed: config::player::SPEED,
            health: config::player::HEALTH,
            max_health: config::player::HEALTH,
            xp: 0,
            level: 1,
            xp_to_next_level: config::player::XP_TO_NEXT_LEVEL,
            weapon: Weapon::Shotgun,
            projectile_strength: config::player::PROJECTILE_STRENGTH,
            additional_projectiles: config::player::ADDITIONAL_PROJECTILES,
            attack_interval_ms: config::player::ATTACK_INTERVAL_MS,
            invincible_until_ms: 0,
            stat_points: 0,
        }
    }

    /// Step the player by a movement direction. Diagonal input is
    /// normalized to unit length and the result is clamped to the world
    /// bounds minus the entity diameter.
    pub fn apply_movement(&mut self, direction: Vec2, dt: f32) {
        let dir = direction.normalized();
        if dir == Vec2::default() {
            return;
        }

        self.pos.x = (self.pos.x + dir.x * self.speed * dt)
            .clamp(0.0, WORLD_WIDTH - self.radius * 2.0);
        self.pos.y = (self.pos.y + dir.y * self.speed * dt)
            .clamp(0.0, WORLD_HEIGHT - self.radius * 2.0);
    }

    /// Add XP and level up when the threshold is reached.
    ///
    /// Returns `true` on level-up. XP above the threshold is discarded
    /// (intentional simplification), the threshold grows by 1.5x floored,
    /// and one stat point is banked.
    pub fn add_xp(&mut self, amount: u32) -> bool {
        self.xp += amount;
        if self.xp < self.xp_to_next_level {
            return false;
        }

        self.level += 1;
        self.xp = 0;
        self.xp_to_next_level = (self.xp_to_next_level as f32 * 1.5).floor() as u32;
        self.stat_points += 1;
        true
    }

    /// Spend one banked stat point. Returns `false` without touching
    /// anything when no points are available.
    pub fn apply_stat_upgrade(&mut self, stat: StatUpgrade) -> bool {
        if self.stat_points == 0 {
            return false;
        }

        match stat {
            StatUpgrade::AttackSpeed => {
                self.attack_interval_ms = self
                    .attack_interval_ms
                    .saturating_sub(config::player::ATTACK_UPGRADE_STEP_MS)
                    .max(config::player::MIN_ATTACK_INTERVAL_MS);
            }
            StatUpgrade::Health => {
                self.max_health += 1.0;
                self.health += 1.0;
            }
            StatUpgrade::Damage => {
                self.projectile_strength += 1.0;
            }
            StatUpgrade::AdditionalProjectiles => {
                self.additional_projectiles += 1;
            }
            StatUpgrade::MoveSpeed => {
                self.speed += config::player::SPEED_UPGRADE_STEP;
            }
        }

        self.stat_points -= 1;
        true
    }

    pub fn is_invincible(&self, now_ms: u64) -> bool {
        now_ms < self.invincible_until_ms
    }

    /// Remaining invincibility for the UI countdown
    pub fn invincible_remaining_ms(&self, now_ms: u64) -> u64 {
        self.invincible_until_ms.saturating_sub(now_ms)
    }

    /// Cycle the equipped weapon forward (+1) or backward (-1)
    pub fn switch_weapon(&mut self, direction: i32) {
        let all = Weapon::ALL;
        let current = all.iter().position(|w| *w == self.weapon).unwrap_or(0) as i32;
        let next = (current + direction).rem_euclid(all.len() as i32);
        self.weapon = all[next as usize];
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_player_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..12)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
