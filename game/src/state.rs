//! The authoritative simulation state and its frame loop.
//!
//! Everything the game knows lives in [`GameState`]; there is no
//! global. One [`GameState::tick`] call advances the world by `dt`
//! seconds of simulation time and returns the events that frame
//! produced. The simulation clock only moves while unpaused, so every
//! timer in the game freezes across a pause with no rescheduling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::camera::Camera;
use crate::combat;
use crate::config;
use crate::enemies::{self, Enemy, EnemyAction, EnemyType, TurretOrbit};
use crate::enemies::spawner::{self, WaveComposition};
use crate::math::{random_edge_position, Vec2};
use crate::player::Player;
use crate::powerups::{self, Powerup, PowerupKind, EXTRA_HEALTH_AMOUNT, INVINCIBILITY_MS, PICKUP_RADIUS};
use crate::projectiles::{self, Projectile};
use crate::waves::WaveState;
use crate::weapons::laser::Beam;
use crate::weapons::{self, drones::Drone, Weapon};

/// Millisecond simulation clock. Fractional carry keeps sub-frame
/// precision across variable frame times.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimClock {
    now_ms: f64,
}

impl SimClock {
    pub fn advance(&mut self, dt: f32) {
        self.now_ms += dt as f64 * 1_000.0;
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms as u64
    }
}

/// Per-frame movement input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Analog override; takes precedence over the key flags
    pub joystick: Option<Vec2>,
}

impl PlayerInput {
    pub fn direction(&self) -> Vec2 {
        if let Some(stick) = self.joystick {
            return stick;
        }
        let mut dir = Vec2::default();
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Things a frame produced that the UI layer reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    WaveStarted { number: u32 },
    BossIncoming,
    LevelUp { level: u32 },
    EnemyKilled { enemy_type: EnemyType, xp: u32 },
    PowerupCollected { kind: PowerupKind },
    GameOver,
}

/// Host-to-peer world sync payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub wave_number: u32,
    pub wave_remaining_ms: u64,
    pub paused: bool,
}

impl WorldSnapshot {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub clock: SimClock,
    pub paused: bool,
    pub game_over: bool,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub beams: Vec<Beam>,
    pub drones: Vec<Drone>,
    pub powerups: Vec<Powerup>,
    pub wave: WaveState,
    pub camera: Camera,
    pub kill_count: u32,
    next_enemy_id: u64,
    next_attack_at_ms: u64,
    pending_sync: Option<WorldSnapshot>,
}

impl GameState {
    pub fn new() -> Self {
        let player = Player::new();
        let mut camera = Camera::new();
        camera.follow(player.pos);
        Self {
            clock: SimClock::default(),
            paused: false,
            game_over: false,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            beams: Vec::new(),
            drones: Vec::new(),
            powerups: Vec::new(),
            wave: WaveState::new(),
            camera,
            kill_count: 0,
            next_enemy_id: 1,
            next_attack_at_ms: 0,
            pending_sync: None,
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance the world by `dt` seconds. Returns the frame's events.
    pub fn tick(&mut self, input: PlayerInput, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if let Some(snapshot) = self.pending_sync.take() {
            self.apply_snapshot(snapshot);
        }

        if self.paused || self.game_over {
            return events;
        }

        self.clock.advance(dt);
        let now = self.clock.now_ms();

        self.player.apply_movement(input.direction(), dt);

        let actions = enemies::update_enemies(&mut self.enemies, self.player.pos, now, dt);
        self.apply_enemy_actions(actions, now);

        self.run_weapons(now, dt);

        projectiles::integrate(&mut self.projectiles, dt, now);
        weapons::laser::expire(&mut self.beams, now);

        let game_over = combat::resolve(
            &mut self.player,
            &mut self.enemies,
            &mut self.projectiles,
            &mut self.beams,
            now,
        );

        self.sweep_deaths(&mut events);
        self.collect_powerups(now, &mut events);

        let boss_alive = self.enemies.iter().any(|e| e.is_boss());
        if let Some(number) = self.wave.advance_if_due(boss_alive, now) {
            self.spawn_wave(number, now, &mut events);
        }

        self.camera.follow(self.player.pos);

        if game_over && !self.game_over {
            self.game_over = true;
            events.push(GameEvent::GameOver);
        }

        events
    }

    fn apply_enemy_actions(&mut self, actions: Vec<EnemyAction>, now_ms: u64) {
        for action in actions {
            match action {
                EnemyAction::Fire(projectile) => self.projectiles.push(projectile),
                EnemyAction::Summon { enemy_type, pos, orbit } => {
                    self.spawn_enemy(enemy_type, false, Some(pos), orbit, now_ms);
                }
            }
        }
    }

    /// Auto-attack at the nearest enemy on the attack cooldown. The
    /// drone swarm replaces the aimed attack entirely.
    fn run_weapons(&mut self, now_ms: u64, dt: f32) {
        if self.player.weapon == Weapon::DroneSwarm {
            weapons::drones::sync_swarm(&mut self.drones, &self.player);
            let shots = weapons::drones::update_swarm(
                &mut self.drones,
                &self.player,
                &self.enemies,
                now_ms,
                dt,
            );
            self.projectiles.extend(shots);
            return;
        }
        self.drones.clear();

        if now_ms < self.next_attack_at_ms || self.enemies.is_empty() {
            return;
        }

        let target = self
            .enemies
            .iter()
            .min_by(|a, b| {
                self.player
                    .pos
                    .distance_to(a.pos)
                    .total_cmp(&self.player.pos.distance_to(b.pos))
            })
            .map(|e| e.pos);
        let Some(target) = target else { return };

        match self.player.weapon {
            Weapon::Shotgun => {
                self.projectiles
                    .extend(weapons::shotgun::fire(&self.player, target));
            }
            Weapon::Laser => {
                self.beams
                    .extend(weapons::laser::fire(&self.player, &self.enemies, now_ms));
            }
            Weapon::Rockets => {
                self.projectiles
                    .push(weapons::rocket::fire(&self.player, target));
            }
            Weapon::ChainLightning => {
                weapons::chain::fire(&self.player, &mut self.enemies, now_ms);
            }
            Weapon::DroneSwarm => unreachable!(),
        }
        self.next_attack_at_ms = now_ms + self.player.attack_interval_ms;
    }

    /// Remove dead enemies and grant their rewards exactly once
    fn sweep_deaths(&mut self, events: &mut Vec<GameEvent>) {
        let dead: Vec<Enemy> = {
            let mut kept = Vec::with_capacity(self.enemies.len());
            let mut dead = Vec::new();
            for enemy in self.enemies.drain(..) {
                if enemy.is_dead() {
                    dead.push(enemy);
                } else {
                    kept.push(enemy);
                }
            }
            self.enemies = kept;
            dead
        };

        for enemy in dead {
            self.kill_count += 1;
            let xp = enemy.xp_reward();
            events.push(GameEvent::EnemyKilled {
                enemy_type: enemy.kind_type(),
                xp,
            });
            if self.player.add_xp(xp) {
                events.push(GameEvent::LevelUp {
                    level: self.player.level,
                });
            }
            if let Some(drop) = powerups::roll_drop(enemy.pos) {
                self.powerups.push(drop);
            }
        }
    }

    fn collect_powerups(&mut self, now_ms: u64, events: &mut Vec<GameEvent>) {
        let player_pos = self.player.pos;
        let player_radius = self.player.radius;
        let mut collected = Vec::new();
        self.powerups.retain(|powerup| {
            if powerup.pos.distance_to(player_pos) < player_radius + PICKUP_RADIUS {
                collected.push(powerup.kind);
                false
            } else {
                true
            }
        });

        for kind in collected {
            match kind {
                PowerupKind::KillAll => self.kill_all_in_view(events),
                PowerupKind::ExtraHealth => {
                    self.player.health =
                        (self.player.health + EXTRA_HEALTH_AMOUNT).min(self.player.max_health);
                }
                PowerupKind::Invincibility => {
                    self.player.invincible_until_ms = now_ms + INVINCIBILITY_MS;
                }
            }
            events.push(GameEvent::PowerupCollected { kind });
        }
    }

    /// Kill every enemy on screen, bosses included, granting XP
    fn kill_all_in_view(&mut self, events: &mut Vec<GameEvent>) {
        let camera = self.camera;
        for enemy in &mut self.enemies {
            if camera.contains(enemy.pos) {
                enemy.shield = 0;
                enemy.health = 0.0;
            }
        }
        self.sweep_deaths(events);
    }

    fn spawn_wave(&mut self, number: u32, now_ms: u64, events: &mut Vec<GameEvent>) {
        let WaveComposition { boss, groups } = spawner::wave_composition(number);
        events.push(GameEvent::WaveStarted { number });

        if let Some(boss_type) = boss {
            events.push(GameEvent::BossIncoming);
            self.spawn_enemy(boss_type, false, None, None, now_ms);
            return;
        }

        for (enemy_type, count, shielded) in groups {
            for _ in 0..count {
                self.spawn_enemy(enemy_type, shielded, None, None, now_ms);
            }
        }
    }

    /// Create one enemy. `pos: None` spawns on a random world edge.
    pub fn spawn_enemy(
        &mut self,
        enemy_type: EnemyType,
        shielded: bool,
        pos: Option<Vec2>,
        orbit: Option<TurretOrbit>,
        now_ms: u64,
    ) -> u64 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        let pos = pos
            .unwrap_or_else(|| random_edge_position(config::WORLD_WIDTH, config::WORLD_HEIGHT));
        self.enemies
            .push(Enemy::spawn(id, enemy_type, pos, shielded, now_ms, orbit));
        id
    }

    // Multiplayer sync: the host streams snapshots, peers overwrite
    // their shared-world stores wholesale on the next tick.

    pub fn host_snapshot(&self) -> WorldSnapshot {
        let now = self.clock.now_ms();
        WorldSnapshot {
            enemies: self.enemies.clone(),
            projectiles: self.projectiles.clone(),
            wave_number: self.wave.number,
            wave_remaining_ms: self.wave.next_wave_at_ms.saturating_sub(now),
            paused: self.paused,
        }
    }

    pub fn queue_remote_sync(&mut self, snapshot: WorldSnapshot) {
        self.pending_sync = Some(snapshot);
    }

    fn apply_snapshot(&mut self, snapshot: WorldSnapshot) {
        let now = self.clock.now_ms();
        self.next_enemy_id = snapshot
            .enemies
            .iter()
            .map(|e| e.id + 1)
            .max()
            .max(Some(self.next_enemy_id))
            .unwrap_or(1);
        self.enemies = snapshot.enemies;
        self.projectiles = snapshot.projectiles;
        self.wave.number = snapshot.wave_number;
        self.wave.next_wave_at_ms = now + snapshot.wave_remaining_ms;
        self.paused = snapshot.paused;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
