//! Power-up drops.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::POWERUP_DROP_CHANCE;
use crate::math::Vec2;

pub const PICKUP_RADIUS: f32 = 15.0;
pub const INVINCIBILITY_MS: u64 = 5_000;
pub const EXTRA_HEALTH_AMOUNT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerupKind {
    /// Wipes every enemy currently on screen, granting their XP
    KillAll,
    ExtraHealth,
    Invincibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
}

/// Roll the drop table for a dying enemy
pub fn roll_drop(pos: Vec2) -> Option<Powerup> {
    let mut rng = rand::thread_rng();
    if !rng.gen_bool(POWERUP_DROP_CHANCE) {
        return None;
    }

    let kind = match rng.gen_range(0..3) {
        0 => PowerupKind::KillAll,
        1 => PowerupKind::ExtraHealth,
        _ => PowerupKind::Invincibility,
    };
    Some(Powerup { pos, kind })
}
