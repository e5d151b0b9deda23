//! Wave scheduling.
//!
//! Waves advance on a fixed simulation-clock interval. A live boss
//! makes the timer inert: the deadline is left alone and simply cannot
//! fire, so an overdue wave starts at the first check after the kill.

use serde::{Deserialize, Serialize};

use crate::config::WAVE_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStatus {
    Countdown { remaining_ms: u64 },
    BossFight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    pub number: u32,
    pub next_wave_at_ms: u64,
}

impl WaveState {
    pub fn new() -> Self {
        Self {
            number: 0,
            next_wave_at_ms: 0,
        }
    }

    pub fn status(&self, boss_alive: bool, now_ms: u64) -> WaveStatus {
        if boss_alive {
            WaveStatus::BossFight
        } else {
            WaveStatus::Countdown {
                remaining_ms: self.next_wave_at_ms.saturating_sub(now_ms),
            }
        }
    }

    /// Start the next wave if its time has come. A live boss blocks
    /// advancement without touching the deadline.
    pub fn advance_if_due(&mut self, boss_alive: bool, now_ms: u64) -> Option<u32> {
        if boss_alive || now_ms < self.next_wave_at_ms {
            return None;
        }

        self.number += 1;
        self.next_wave_at_ms = now_ms + WAVE_INTERVAL_MS;
        Some(self.number)
    }
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}
