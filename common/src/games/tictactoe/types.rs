use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const CELL_COUNT: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Mark::X),
            "o" | "O" => Ok(Mark::O),
            other => Err(format!("Unknown mark '{}', expected X or O", other)),
        }
    }
}

/// A single board square. `None` is an empty cell.
pub type Cell = Option<Mark>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    /// Chance that the bot plays a uniformly random cell instead of the searched one.
    pub fn random_move_probability(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 0.3,
            Difficulty::Hard => 0.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty '{}', expected easy, medium or hard", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    SinglePlayer { human: Mark, difficulty: Difficulty },
    LocalTwoPlayer,
    Networked,
}

impl GameMode {
    /// The mark played by the automated opponent, if this mode has one.
    pub fn bot_mark(&self) -> Option<Mark> {
        match self {
            GameMode::SinglePlayer { human, .. } => Some(human.opponent()),
            _ => None,
        }
    }

    pub fn is_networked(&self) -> bool {
        matches!(self, GameMode::Networked)
    }

    pub fn label(&self) -> String {
        match self {
            GameMode::SinglePlayer { human, .. } => format!("Mode: 1 Player (You = {})", human),
            GameMode::LocalTwoPlayer => "Mode: 2 Players (same device)".to_string(),
            GameMode::Networked => "Mode: Online".to_string(),
        }
    }
}
