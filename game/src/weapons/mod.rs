//! The five player weapons.
//!
//! Aimed weapons produce projectiles or beams from a single trigger
//! pull; the drone swarm is passive and handled every frame. All
//! damage scales from the player's projectile strength stat.

pub mod chain;
pub mod drones;
pub mod laser;
pub mod rocket;
pub mod shotgun;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    Shotgun,
    Laser,
    Rockets,
    ChainLightning,
    DroneSwarm,
}

impl Weapon {
    /// Cycling order for weapon switching
    pub const ALL: [Weapon; 5] = [
        Weapon::Shotgun,
        Weapon::Laser,
        Weapon::Rockets,
        Weapon::ChainLightning,
        Weapon::DroneSwarm,
    ];
}
