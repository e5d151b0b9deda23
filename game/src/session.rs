//! Multiplayer session glue on top of the relay protocol.
//!
//! Every client runs its own full simulation. Players exchange small
//! per-player reports every frame; the lobby host additionally streams
//! authoritative world snapshots on a fixed interval, which peers
//! apply wholesale. The relay never inspects any of these payloads.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use horde_shared::{RelayMessage, REMOTE_PLAYER_TIMEOUT_MS, SYNC_INTERVAL_MS};

use crate::math::Vec2;
use crate::projectiles::{Owner, Projectile};
use crate::state::{GameState, WorldSnapshot};
use crate::weapons::Weapon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Peer,
}

/// What one player shares about themselves every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateReport {
    pub id: String,
    pub pos: Vec2,
    pub health: f32,
    pub weapon: Weapon,
    pub projectiles: Vec<Projectile>,
}

impl PlayerStateReport {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            id: state.player.id.clone(),
            pos: state.player.pos,
            health: state.player.health,
            weapon: state.player.weapon,
            projectiles: state
                .projectiles
                .iter()
                .filter(|p| p.owner == Owner::Player)
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemotePlayer {
    pub state: PlayerStateReport,
    pub last_update_ms: u64,
}

#[derive(Debug)]
pub struct Session {
    pub role: Role,
    pub player_id: String,
    pub remote_players: HashMap<String, RemotePlayer>,
    next_sync_at_ms: u64,
}

impl Session {
    pub fn new(role: Role, player_id: String) -> Self {
        Self {
            role,
            player_id,
            remote_players: HashMap::new(),
            next_sync_at_ms: 0,
        }
    }

    pub fn is_host(&self) -> bool {
        self.role == Role::Host
    }

    /// Messages to send this frame: always the player report, plus a
    /// world snapshot when hosting and the sync interval has elapsed.
    pub fn outgoing(&mut self, state: &GameState, now_ms: u64) -> Vec<RelayMessage> {
        let report = PlayerStateReport::from_state(state);
        let mut messages = vec![RelayMessage::GameState {
            state: serde_json::to_value(&report).unwrap_or(serde_json::Value::Null),
        }];

        if self.is_host() && now_ms >= self.next_sync_at_ms {
            messages.push(RelayMessage::SyncGameState {
                state: state.host_snapshot().to_value(),
            });
            self.next_sync_at_ms = now_ms + SYNC_INTERVAL_MS;
        }

        messages
    }

    pub fn pause_message(&self, is_paused: bool) -> RelayMessage {
        RelayMessage::PlayerPause {
            player_id: self.player_id.clone(),
            is_paused,
        }
    }

    /// Apply one relayed message to the local simulation
    pub fn handle_message(&mut self, state: &mut GameState, message: RelayMessage, now_ms: u64) {
        match message {
            RelayMessage::GameState { state: payload } => {
                match serde_json::from_value::<PlayerStateReport>(payload) {
                    Ok(report) if report.id != self.player_id => {
                        self.remote_players.insert(
                            report.id.clone(),
                            RemotePlayer {
                                state: report,
                                last_update_ms: now_ms,
                            },
                        );
                    }
                    Ok(_) => {}
                    Err(err) => warn!("Dropping malformed player report: {}", err),
                }
            }
            RelayMessage::SyncGameState { state: payload } => {
                if self.is_host() {
                    debug!("Ignoring world sync while hosting");
                    return;
                }
                match WorldSnapshot::from_value(&payload) {
                    Some(snapshot) => state.queue_remote_sync(snapshot),
                    None => warn!("Dropping malformed world snapshot"),
                }
            }
            RelayMessage::PlayerPause { player_id, is_paused } => {
                // A player's own pause already took effect locally
                if player_id != self.player_id {
                    state.set_paused(is_paused);
                }
            }
            RelayMessage::PlayerLeft | RelayMessage::LobbyClosed { .. } => {
                debug!("Lobby membership changed: {:?}", message_name(&message));
            }
            other => debug!("Ignoring in-game message: {}", message_name(&other)),
        }
    }

    /// Forget remote players that stopped reporting
    pub fn prune_stale(&mut self, now_ms: u64) {
        self.remote_players
            .retain(|_, remote| now_ms < remote.last_update_ms + REMOTE_PLAYER_TIMEOUT_MS);
    }
}

fn message_name(message: &RelayMessage) -> &'static str {
    match message {
        RelayMessage::CreateLobby => "CREATE_LOBBY",
        RelayMessage::LobbyCreated { .. } => "LOBBY_CREATED",
        RelayMessage::JoinLobby { .. } => "JOIN_LOBBY",
        RelayMessage::JoinedLobby => "JOINED_LOBBY",
        RelayMessage::PlayerJoined => "PLAYER_JOINED",
        RelayMessage::StartGame => "START_GAME",
        RelayMessage::GameStarted => "GAME_STARTED",
        RelayMessage::GameState { .. } => "GAME_STATE",
        RelayMessage::SyncGameState { .. } => "SYNC_GAME_STATE",
        RelayMessage::PlayerPause { .. } => "PLAYER_PAUSE",
        RelayMessage::PlayerLeft => "PLAYER_LEFT",
        RelayMessage::LobbyClosed { .. } => "LOBBY_CLOSED",
        RelayMessage::Error { .. } => "ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayerInput;

    fn report_value(id: &str) -> serde_json::Value {
        serde_json::to_value(PlayerStateReport {
            id: id.to_string(),
            pos: Vec2::new(100.0, 100.0),
            health: 5.0,
            weapon: Weapon::Shotgun,
            projectiles: Vec::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_host_syncs_on_the_interval() {
        let state = GameState::new();
        let mut session = Session::new(Role::Host, state.player.id.clone());

        let first = session.outgoing(&state, 0);
        assert_eq!(first.len(), 2);
        assert!(matches!(first[0], RelayMessage::GameState { .. }));
        assert!(matches!(first[1], RelayMessage::SyncGameState { .. }));

        // Inside the interval only the player report goes out
        let second = session.outgoing(&state, SYNC_INTERVAL_MS - 1);
        assert_eq!(second.len(), 1);

        let third = session.outgoing(&state, SYNC_INTERVAL_MS);
        assert_eq!(third.len(), 2);
    }

    #[test]
    fn test_peers_never_sync() {
        let state = GameState::new();
        let mut session = Session::new(Role::Peer, state.player.id.clone());
        for now in [0, 50, 100, 1_000] {
            let messages = session.outgoing(&state, now);
            assert_eq!(messages.len(), 1);
            assert!(matches!(messages[0], RelayMessage::GameState { .. }));
        }
    }

    #[test]
    fn test_remote_reports_are_tracked_and_pruned() {
        let mut state = GameState::new();
        let mut session = Session::new(Role::Peer, "me".to_string());

        session.handle_message(
            &mut state,
            RelayMessage::GameState { state: report_value("other") },
            1_000,
        );
        assert_eq!(session.remote_players.len(), 1);

        // The local player's own echo is not a remote
        session.handle_message(
            &mut state,
            RelayMessage::GameState { state: report_value("me") },
            1_000,
        );
        assert_eq!(session.remote_players.len(), 1);

        session.prune_stale(1_000 + REMOTE_PLAYER_TIMEOUT_MS - 1);
        assert_eq!(session.remote_players.len(), 1);
        session.prune_stale(1_000 + REMOTE_PLAYER_TIMEOUT_MS);
        assert!(session.remote_players.is_empty());
    }

    #[test]
    fn test_pause_from_another_player_applies() {
        let mut state = GameState::new();
        let mut session = Session::new(Role::Peer, "me".to_string());

        session.handle_message(
            &mut state,
            RelayMessage::PlayerPause {
                player_id: "other".to_string(),
                is_paused: true,
            },
            0,
        );
        assert!(state.paused);

        // Our own pause echo must not double-toggle
        state.set_paused(false);
        session.handle_message(
            &mut state,
            RelayMessage::PlayerPause {
                player_id: "me".to_string(),
                is_paused: true,
            },
            0,
        );
        assert!(!state.paused);
    }

    #[test]
    fn test_peer_applies_host_snapshot() {
        let mut host_state = GameState::new();
        host_state.tick(PlayerInput::default(), 1.0 / 60.0);

        let mut peer_state = GameState::new();
        let mut session = Session::new(Role::Peer, "me".to_string());
        session.handle_message(
            &mut peer_state,
            RelayMessage::SyncGameState {
                state: host_state.host_snapshot().to_value(),
            },
            0,
        );
        peer_state.tick(PlayerInput::default(), 1.0 / 60.0);
        assert_eq!(peer_state.enemies.len(), host_state.enemies.len());

        // A host ignores snapshots from anyone
        host_state.enemies.truncate(3);
        let mut host_session = Session::new(Role::Host, "h".to_string());
        let mut other_state = GameState::new();
        host_session.handle_message(
            &mut other_state,
            RelayMessage::SyncGameState {
                state: host_state.host_snapshot().to_value(),
            },
            0,
        );
        other_state.tick(PlayerInput::default(), 1.0 / 60.0);
        assert_ne!(other_state.enemies.len(), host_state.enemies.len());
    }
}
