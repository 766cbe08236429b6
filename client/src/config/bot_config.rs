use std::time::Duration;

use common::config::Validate;
use common::games::tictactoe::{Difficulty, GameMode, Mark, TimingSettings};
use serde::{Deserialize, Serialize};

use super::MAX_DELAY_MS;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct BotConfig {
    pub human_mark: Mark,
    pub difficulty: Difficulty,
    pub reply_delay_ms: u64,
    pub opening_delay_ms: u64,
}

impl BotConfig {
    pub fn single_player_mode(&self) -> GameMode {
        GameMode::SinglePlayer {
            human: self.human_mark,
            difficulty: self.difficulty,
        }
    }

    pub fn timing(&self) -> TimingSettings {
        TimingSettings {
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            opening_delay: Duration::from_millis(self.opening_delay_ms),
        }
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<(), String> {
        if self.reply_delay_ms > MAX_DELAY_MS {
            return Err(format!("reply_delay_ms must not exceed {}", MAX_DELAY_MS));
        }
        if self.opening_delay_ms > MAX_DELAY_MS {
            return Err(format!("opening_delay_ms must not exceed {}", MAX_DELAY_MS));
        }
        Ok(())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            difficulty: Difficulty::Hard,
            reply_delay_ms: 250,
            opening_delay_ms: 350,
        }
    }
}
