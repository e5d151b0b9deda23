//! Chain lightning: instant hit that arcs between nearby enemies.
//!
//! The bolt resolves in the same frame it fires. Each arc picks the
//! nearest enemy not yet struck by this bolt, damage falls off ten
//! percent per jump, and shields absorb an arc like any other hit.
//! Struck enemies carry a brief crackling mark for the renderer.

use crate::enemies::Enemy;
use crate::math::Vec2;
use crate::player::Player;

const TARGET_RANGE: f32 = 500.0;
const JUMP_RANGE: f32 = 250.0;
const FALLOFF_PER_JUMP: f32 = 0.1;
const MARK_MS: u64 = 1_000;

/// Fire one bolt. Strikes up to `1 + additional_projectiles` enemies,
/// the initial target counting as the first. Returns the ids of every
/// enemy struck, in arc order.
pub fn fire(player: &Player, enemies: &mut [Enemy], now_ms: u64) -> Vec<u64> {
    let max_hits = 1 + player.additional_projectiles as usize;
    let mut struck: Vec<u64> = Vec::new();
    let mut arc_from = player.pos;
    let mut range = TARGET_RANGE;

    while struck.len() < max_hits {
        let next = nearest_unstruck(enemies, arc_from, range, &struck, now_ms);
        let Some(idx) = next else { break };

        let falloff = 1.0 - FALLOFF_PER_JUMP * struck.len() as f32;
        let damage = player.projectile_strength * falloff.max(0.0);

        let enemy = &mut enemies[idx];
        enemy.absorb_or_damage(damage);
        enemy.crackling_until_ms = now_ms + MARK_MS;
        struck.push(enemy.id);
        arc_from = enemy.pos;
        range = JUMP_RANGE;
    }

    struck
}

fn nearest_unstruck(
    enemies: &[Enemy],
    from: Vec2,
    range: f32,
    struck: &[u64],
    now_ms: u64,
) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| !struck.contains(&e.id) && !e.is_invulnerable(now_ms))
        .map(|(i, e)| (i, from.distance_to(e.pos)))
        .filter(|(_, dist)| *dist <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::EnemyType;

    fn enemy(id: u64, pos: Vec2) -> Enemy {
        Enemy::spawn(id, EnemyType::Normal, pos, false, 0, None)
    }

    fn player_at(pos: Vec2) -> Player {
        let mut player = Player::new();
        player.pos = pos;
        player
    }

    #[test]
    fn test_base_bolt_strikes_exactly_one_enemy() {
        let player = player_at(Vec2::new(1000.0, 1000.0));
        let mut enemies = vec![
            enemy(1, Vec2::new(1100.0, 1000.0)),
            enemy(2, Vec2::new(1250.0, 1000.0)),
        ];

        let struck = fire(&player, &mut enemies, 0);
        assert_eq!(struck, vec![1]);
        assert_eq!(enemies[1].health, enemies[1].max_health);
    }

    #[test]
    fn test_arcs_to_nearest_with_falloff() {
        let mut player = player_at(Vec2::new(1000.0, 1000.0));
        player.additional_projectiles = 1;
        let mut enemies = vec![
            enemy(1, Vec2::new(1100.0, 1000.0)),
            enemy(2, Vec2::new(1250.0, 1000.0)),
            enemy(3, Vec2::new(2900.0, 1000.0)), // far out of any arc
        ];

        let struck = fire(&player, &mut enemies, 0);
        assert_eq!(struck, vec![1, 2]);

        let full = config_health();
        assert_eq!(enemies[0].health, full - 1.0);
        assert_eq!(enemies[1].health, full - 0.9);
        assert_eq!(enemies[2].health, full);
        assert!(enemies[0].is_crackling(500));
        assert!(!enemies[0].is_crackling(MARK_MS));
    }

    fn config_health() -> f32 {
        crate::config::enemy_stats(EnemyType::Normal).health
    }

    #[test]
    fn test_never_strikes_the_same_enemy_twice() {
        let mut player = player_at(Vec2::new(1000.0, 1000.0));
        player.additional_projectiles = 5;
        let mut enemies = vec![enemy(1, Vec2::new(1050.0, 1000.0))];

        let struck = fire(&player, &mut enemies, 0);
        assert_eq!(struck, vec![1]);
    }

    #[test]
    fn test_shield_absorbs_an_arc() {
        let player = player_at(Vec2::new(1000.0, 1000.0));
        let shielded = Enemy::spawn(1, EnemyType::Normal, Vec2::new(1050.0, 1000.0), true, 0, None);
        let full = shielded.health;
        let mut enemies = vec![shielded.clone()];

        fire(&player, &mut enemies, 0);
        assert_eq!(enemies[0].health, full);
        assert_eq!(enemies[0].shield, shielded.shield - 1);
    }

    #[test]
    fn test_additional_projectiles_extend_the_chain() {
        let mut player = player_at(Vec2::new(1000.0, 1000.0));
        player.additional_projectiles = 2;
        let mut enemies: Vec<Enemy> = (0..6)
            .map(|i| enemy(i + 1, Vec2::new(1050.0 + i as f32 * 100.0, 1000.0)))
            .collect();

        let struck = fire(&player, &mut enemies, 0);
        assert_eq!(struck.len(), 3);
    }
}
