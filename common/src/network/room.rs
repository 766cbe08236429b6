use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{Board, Mark};

pub const DEFAULT_ROOM_COLLECTION: &str = "tttRooms";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPlayers {
    #[serde(rename = "X")]
    pub x: bool,
    #[serde(rename = "O")]
    pub o: bool,
}

impl RoomPlayers {
    pub fn is_present(&self, mark: Mark) -> bool {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    pub fn set(&mut self, mark: Mark, present: bool) {
        match mark {
            Mark::X => self.x = present,
            Mark::O => self.o = present,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.x && !self.o
    }
}

/// The shared record of one networked match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDocument {
    pub board: Board,
    pub current: Mark,
    pub players: RoomPlayers,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    #[serde(default)]
    pub round: u64,
}

impl RoomDocument {
    /// A fresh room with the creator seated as X.
    pub fn new(created_at: i64) -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            players: RoomPlayers { x: true, o: false },
            created_at,
            round: 0,
        }
    }
}

/// Partial write; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomUpdate {
    pub board: Option<Board>,
    pub current: Option<Mark>,
    pub player_x: Option<bool>,
    pub player_o: Option<bool>,
    pub round: Option<u64>,
}

impl RoomUpdate {
    pub fn move_played(board: Board, current: Mark) -> Self {
        Self {
            board: Some(board),
            current: Some(current),
            ..Self::default()
        }
    }

    pub fn presence(mark: Mark, present: bool) -> Self {
        match mark {
            Mark::X => Self { player_x: Some(present), ..Self::default() },
            Mark::O => Self { player_o: Some(present), ..Self::default() },
        }
    }

    pub fn next_round(round: u64) -> Self {
        Self {
            board: Some(Board::new()),
            current: Some(Mark::X),
            round: Some(round),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, doc: &mut RoomDocument) {
        if let Some(board) = self.board {
            doc.board = board;
        }
        if let Some(current) = self.current {
            doc.current = current;
        }
        if let Some(present) = self.player_x {
            doc.players.x = present;
        }
        if let Some(present) = self.player_o {
            doc.players.o = present;
        }
        if let Some(round) = self.round {
            doc.round = round;
        }
    }
}
