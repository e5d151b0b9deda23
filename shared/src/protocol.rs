//! Relay wire protocol shared between game clients and the relay server.
//!
//! Messages are JSON text frames with a `{"type": "...", ...payload}`
//! envelope. Game state payloads are opaque to the relay and forwarded
//! verbatim; their concrete shapes live with the simulation crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default relay port (overridable via the `PORT` environment variable)
pub const DEFAULT_PORT: u16 = 3000;

/// How often the host pushes a full authoritative snapshot, in milliseconds
pub const SYNC_INTERVAL_MS: u64 = 50;

/// A remote player is assumed disconnected after this long without an update
pub const REMOTE_PLAYER_TIMEOUT_MS: u64 = 5_000;

/// Length of generated lobby codes
pub const LOBBY_CODE_LEN: usize = 4;

/// Every message that travels over the relay, in both directions.
///
/// There is no versioning and no acknowledgement; delivery is best-effort
/// per the underlying transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelayMessage {
    /// Client -> server: allocate a lobby; the sender becomes its host
    #[serde(rename = "CREATE_LOBBY")]
    CreateLobby,

    /// Server -> host: lobby allocated
    #[serde(rename = "LOBBY_CREATED")]
    LobbyCreated {
        #[serde(rename = "lobbyCode")]
        lobby_code: String,
    },

    /// Client -> server: join an existing lobby by code
    #[serde(rename = "JOIN_LOBBY")]
    JoinLobby {
        #[serde(rename = "lobbyCode")]
        lobby_code: String,
    },

    /// Server -> joiner: join succeeded
    #[serde(rename = "JOINED_LOBBY")]
    JoinedLobby,

    /// Server -> host: a player joined the lobby
    #[serde(rename = "PLAYER_JOINED")]
    PlayerJoined,

    /// Host -> server: start the game for everyone in the lobby
    #[serde(rename = "START_GAME")]
    StartGame,

    /// Server -> all lobby members: the host started the game
    #[serde(rename = "GAME_STARTED")]
    GameStarted,

    /// Per-player partial state (position, own projectiles), relayed to
    /// every other member of the sender's lobby
    #[serde(rename = "GAME_STATE")]
    GameState { state: Value },

    /// Authoritative full snapshot. Accepted only from a lobby's host and
    /// relayed to all non-host members.
    #[serde(rename = "SYNC_GAME_STATE")]
    SyncGameState { state: Value },

    /// Pause toggle, relayed to every other member of the sender's lobby
    #[serde(rename = "PLAYER_PAUSE")]
    PlayerPause {
        #[serde(rename = "playerId")]
        player_id: String,
        #[serde(rename = "isPaused")]
        is_paused: bool,
    },

    /// Server -> host: a non-host player disconnected
    #[serde(rename = "PLAYER_LEFT")]
    PlayerLeft,

    /// Server -> remaining players: the host disconnected, lobby deleted
    #[serde(rename = "LOBBY_CLOSED")]
    LobbyClosed { message: String },

    /// Server -> client: a request was rejected
    #[serde(rename = "ERROR")]
    Error { message: String },
}

impl RelayMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("Failed to serialize RelayMessage")
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}
