//! Laser: instantaneous piercing beams.
//!
//! Beams are not projectiles. Each one persists for a few frames so
//! the renderer can draw it, damages every enemy it crosses exactly
//! once, and pierces shields entirely.

use crate::config::{CAMERA_HEIGHT, CAMERA_WIDTH};
use crate::math::{from_angle, point_to_segment_distance, Vec2};
use crate::player::Player;

use crate::enemies::Enemy;

const BEAM_WIDTH: f32 = 3.0;
const BEAM_LIFETIME_MS: u64 = 160;
const DAMAGE_FACTOR: f32 = 0.8;
const MIN_DAMAGE: f32 = 0.5;

/// Targets must be inside this box around the player
const TARGET_RANGE_X: f32 = CAMERA_WIDTH / 2.0;
const TARGET_RANGE_Y: f32 = CAMERA_HEIGHT / 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    pub start: Vec2,
    pub angle: f32,
    pub width: f32,
    pub length: f32,
    pub damage: f32,
    pub expires_at_ms: u64,
    /// Enemy ids already damaged by this beam
    pub hit: Vec<u64>,
}

impl Beam {
    pub fn end(&self) -> Vec2 {
        let dir = from_angle(self.angle);
        Vec2::new(
            self.start.x + dir.x * self.length,
            self.start.y + dir.y * self.length,
        )
    }

    /// Whether a circle at `pos` with `radius` crosses the beam line
    pub fn crosses(&self, pos: Vec2, radius: f32) -> bool {
        point_to_segment_distance(pos, self.start, self.end()) <= radius + self.width
    }
}

/// One trigger pull: a beam per target at the `1 + additional` closest
/// distinct enemies in range. Fewer targets than beams means fewer
/// beams.
pub fn fire(player: &Player, enemies: &[Enemy], now_ms: u64) -> Vec<Beam> {
    let beam_count = 1 + player.additional_projectiles as usize;
    let damage = (player.projectile_strength * DAMAGE_FACTOR).max(MIN_DAMAGE);

    let mut in_range: Vec<&Enemy> = enemies
        .iter()
        .filter(|e| {
            (e.pos.x - player.pos.x).abs() <= TARGET_RANGE_X
                && (e.pos.y - player.pos.y).abs() <= TARGET_RANGE_Y
        })
        .collect();
    in_range.sort_by(|a, b| {
        let da = player.pos.distance_to(a.pos);
        let db = player.pos.distance_to(b.pos);
        da.total_cmp(&db)
    });

    in_range
        .iter()
        .take(beam_count)
        .map(|target| Beam {
            start: player.pos,
            angle: player.pos.angle_to(target.pos),
            width: BEAM_WIDTH,
            length: CAMERA_WIDTH,
            damage,
            expires_at_ms: now_ms + BEAM_LIFETIME_MS,
            hit: Vec::new(),
        })
        .collect()
}

/// Drop beams whose display lifetime has ended
pub fn expire(beams: &mut Vec<Beam>, now_ms: u64) {
    beams.retain(|b| now_ms < b.expires_at_ms);
}
