//! Lobby bookkeeping and message routing.
//!
//! Pure state machine: every inbound message maps to a list of
//! `(connection, message)` pairs for the transport to deliver. The
//! relay never parses game payloads; it only routes envelopes by
//! lobby membership.

use std::collections::HashMap;

use log::warn;
use rand::Rng;

use horde_shared::{RelayMessage, LOBBY_CODE_LEN};

pub type ConnId = u64;

/// Messages to deliver, as (target connection, message) pairs
pub type Outbox = Vec<(ConnId, RelayMessage)>;

#[derive(Debug)]
struct Lobby {
    host: ConnId,
    /// All members, host included, in join order
    players: Vec<ConnId>,
    game_started: bool,
}

#[derive(Debug, Default)]
pub struct LobbyManager {
    lobbies: HashMap<String, Lobby>,
}

impl LobbyManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, conn: ConnId, message: RelayMessage) -> Outbox {
        match message {
            RelayMessage::CreateLobby => self.create_lobby(conn),
            RelayMessage::JoinLobby { lobby_code } => self.join_lobby(conn, &lobby_code),
            RelayMessage::StartGame => self.start_game(conn),
            RelayMessage::GameState { state } => {
                self.relay_to_others(conn, RelayMessage::GameState { state })
            }
            RelayMessage::SyncGameState { state } => self.sync_game_state(conn, state),
            RelayMessage::PlayerPause { player_id, is_paused } => {
                self.relay_to_others(conn, RelayMessage::PlayerPause { player_id, is_paused })
            }
            other => {
                warn!("Connection {}: unexpected client message {:?}", conn, other);
                Vec::new()
            }
        }
    }

    /// A connection went away. The host leaving closes the whole
    /// lobby; anyone else leaving just notifies the host.
    pub fn disconnect(&mut self, conn: ConnId) -> Outbox {
        let Some(code) = self.lobby_of(conn) else {
            return Vec::new();
        };

        let lobby = &self.lobbies[&code];
        if lobby.host == conn {
            let outbox = lobby
                .players
                .iter()
                .filter(|p| **p != conn)
                .map(|p| {
                    (
                        *p,
                        RelayMessage::LobbyClosed {
                            message: "Host left the game".to_string(),
                        },
                    )
                })
                .collect();
            self.lobbies.remove(&code);
            return outbox;
        }

        let lobby = self.lobbies.get_mut(&code).expect("lobby exists");
        lobby.players.retain(|p| *p != conn);
        if lobby.players.is_empty() {
            self.lobbies.remove(&code);
            return Vec::new();
        }
        vec![(lobby.host, RelayMessage::PlayerLeft)]
    }

    fn create_lobby(&mut self, conn: ConnId) -> Outbox {
        let code = loop {
            let candidate = random_lobby_code();
            if !self.lobbies.contains_key(&candidate) {
                break candidate;
            }
        };

        self.lobbies.insert(
            code.clone(),
            Lobby {
                host: conn,
                players: vec![conn],
                game_started: false,
            },
        );
        vec![(conn, RelayMessage::LobbyCreated { lobby_code: code })]
    }

    fn join_lobby(&mut self, conn: ConnId, code: &str) -> Outbox {
        let Some(lobby) = self.lobbies.get_mut(code) else {
            return error_to(conn, "Lobby not found");
        };
        if lobby.game_started {
            return error_to(conn, "Game already started");
        }

        lobby.players.push(conn);
        vec![
            (conn, RelayMessage::JoinedLobby),
            (lobby.host, RelayMessage::PlayerJoined),
        ]
    }

    fn start_game(&mut self, conn: ConnId) -> Outbox {
        let Some(code) = self.lobby_of(conn) else {
            return error_to(conn, "Not in a lobby");
        };
        let lobby = self.lobbies.get_mut(&code).expect("lobby exists");
        if lobby.host != conn {
            return error_to(conn, "Not a lobby host");
        }

        lobby.game_started = true;
        lobby
            .players
            .iter()
            .map(|p| (*p, RelayMessage::GameStarted))
            .collect()
    }

    /// Authoritative snapshots are accepted from hosts only and fan
    /// out to every non-host member.
    fn sync_game_state(&mut self, conn: ConnId, state: serde_json::Value) -> Outbox {
        let Some(code) = self.lobby_of(conn) else {
            return Vec::new();
        };
        let lobby = &self.lobbies[&code];
        if lobby.host != conn {
            warn!("Connection {}: sync from non-host dropped", conn);
            return Vec::new();
        }

        lobby
            .players
            .iter()
            .filter(|p| **p != conn)
            .map(|p| (*p, RelayMessage::SyncGameState { state: state.clone() }))
            .collect()
    }

    fn relay_to_others(&self, conn: ConnId, message: RelayMessage) -> Outbox {
        let Some(code) = self.lobby_of(conn) else {
            return Vec::new();
        };
        self.lobbies[&code]
            .players
            .iter()
            .filter(|p| **p != conn)
            .map(|p| (*p, message.clone()))
            .collect()
    }

    fn lobby_of(&self, conn: ConnId) -> Option<String> {
        self.lobbies
            .iter()
            .find(|(_, lobby)| lobby.players.contains(&conn))
            .map(|(code, _)| code.clone())
    }
}

fn random_lobby_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    (0..LOBBY_CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

fn error_to(conn: ConnId, message: &str) -> Outbox {
    vec![(
        conn,
        RelayMessage::Error {
            message: message.to_string(),
        },
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HOST: ConnId = 1;
    const PEER: ConnId = 2;
    const OTHER: ConnId = 3;

    fn created_code(outbox: &Outbox) -> String {
        match &outbox[0].1 {
            RelayMessage::LobbyCreated { lobby_code } => lobby_code.clone(),
            other => panic!("expected LOBBY_CREATED, got {:?}", other),
        }
    }

    fn lobby_with_peer(manager: &mut LobbyManager) -> String {
        let code = created_code(&manager.handle(HOST, RelayMessage::CreateLobby));
        manager.handle(PEER, RelayMessage::JoinLobby { lobby_code: code.clone() });
        code
    }

    #[test]
    fn test_create_join_start_flow() {
        let mut manager = LobbyManager::new();

        let outbox = manager.handle(HOST, RelayMessage::CreateLobby);
        let code = created_code(&outbox);
        assert_eq!(code.len(), LOBBY_CODE_LEN);

        let outbox = manager.handle(PEER, RelayMessage::JoinLobby { lobby_code: code });
        assert_eq!(outbox[0], (PEER, RelayMessage::JoinedLobby));
        assert_eq!(outbox[1], (HOST, RelayMessage::PlayerJoined));

        let outbox = manager.handle(HOST, RelayMessage::StartGame);
        assert_eq!(outbox.len(), 2);
        assert!(outbox
            .iter()
            .all(|(_, m)| *m == RelayMessage::GameStarted));
    }

    #[test]
    fn test_join_unknown_lobby() {
        let mut manager = LobbyManager::new();
        let outbox = manager.handle(PEER, RelayMessage::JoinLobby {
            lobby_code: "ZZZZ".to_string(),
        });
        assert_eq!(
            outbox,
            vec![(PEER, RelayMessage::Error { message: "Lobby not found".to_string() })]
        );
    }

    #[test]
    fn test_only_the_host_can_start() {
        let mut manager = LobbyManager::new();
        lobby_with_peer(&mut manager);

        let outbox = manager.handle(PEER, RelayMessage::StartGame);
        assert_eq!(
            outbox,
            vec![(PEER, RelayMessage::Error { message: "Not a lobby host".to_string() })]
        );
    }

    #[test]
    fn test_no_joining_a_started_game() {
        let mut manager = LobbyManager::new();
        let code = lobby_with_peer(&mut manager);
        manager.handle(HOST, RelayMessage::StartGame);

        let outbox = manager.handle(OTHER, RelayMessage::JoinLobby { lobby_code: code });
        assert_eq!(
            outbox,
            vec![(OTHER, RelayMessage::Error { message: "Game already started".to_string() })]
        );
    }

    #[test]
    fn test_game_state_relays_to_everyone_else() {
        let mut manager = LobbyManager::new();
        let code = lobby_with_peer(&mut manager);
        manager.handle(OTHER, RelayMessage::JoinLobby { lobby_code: code });

        let payload = json!({ "id": "p2", "x": 10 });
        let outbox = manager.handle(PEER, RelayMessage::GameState { state: payload.clone() });
        let targets: Vec<ConnId> = outbox.iter().map(|(c, _)| *c).collect();
        assert_eq!(targets, vec![HOST, OTHER]);
        assert!(outbox
            .iter()
            .all(|(_, m)| *m == RelayMessage::GameState { state: payload.clone() }));
    }

    #[test]
    fn test_sync_is_host_only() {
        let mut manager = LobbyManager::new();
        lobby_with_peer(&mut manager);

        let payload = json!({ "enemies": [] });
        let outbox = manager.handle(PEER, RelayMessage::SyncGameState { state: payload.clone() });
        assert!(outbox.is_empty(), "non-host sync must be dropped");

        let outbox = manager.handle(HOST, RelayMessage::SyncGameState { state: payload });
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].0, PEER);
    }

    #[test]
    fn test_host_disconnect_closes_the_lobby() {
        let mut manager = LobbyManager::new();
        let code = lobby_with_peer(&mut manager);

        let outbox = manager.disconnect(HOST);
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].0, PEER);
        assert!(matches!(outbox[0].1, RelayMessage::LobbyClosed { .. }));

        // The code is free again
        let outbox = manager.handle(OTHER, RelayMessage::JoinLobby { lobby_code: code });
        assert!(matches!(outbox[0].1, RelayMessage::Error { .. }));
    }

    #[test]
    fn test_peer_disconnect_notifies_the_host() {
        let mut manager = LobbyManager::new();
        lobby_with_peer(&mut manager);

        let outbox = manager.disconnect(PEER);
        assert_eq!(outbox, vec![(HOST, RelayMessage::PlayerLeft)]);

        // And the lobby still accepts new players
        let outbox = manager.handle(PEER, RelayMessage::StartGame);
        assert!(matches!(outbox[0].1, RelayMessage::Error { .. }));
    }

    #[test]
    fn test_unknown_connection_disconnect_is_quiet() {
        let mut manager = LobbyManager::new();
        assert!(manager.disconnect(99).is_empty());
    }
}
