mod board;
mod bot_controller;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::{Board, MoveError};
pub use bot_controller::{BotInput, best_move, calculate_move, difficulty_move, random_move, score_moves};
pub use game_state::{DecisionKey, GameError, GamePhase, GameSession, Scoreboard, SnapshotEffect};
pub use session::{ClientCommand, GameController, TimingSettings};
pub use types::{CELL_COUNT, Cell, Difficulty, GameMode, Mark};
pub use win_detector::{Outcome, WINNING_LINES, WinningLine, check_win_with_line, evaluate};
