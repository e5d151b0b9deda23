//! Wave-survival shooter simulation core.
//!
//! Everything here is renderer-agnostic: a frontend drives the
//! simulation through [`state::GameState::tick`], reads the entity
//! stores for drawing, and reacts to the returned [`state::GameEvent`]s.
//! Multiplayer hosts and peers additionally run a [`session::Session`]
//! on top of the relay protocol from `horde-shared`.

pub mod camera;
pub mod combat;
pub mod config;
pub mod enemies;
pub mod math;
pub mod player;
pub mod powerups;
pub mod projectiles;
pub mod session;
pub mod state;
pub mod waves;
pub mod weapons;

pub use state::{GameEvent, GameState, PlayerInput};
