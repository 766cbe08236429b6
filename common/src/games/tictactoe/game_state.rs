use std::fmt;

use super::board::{Board, MoveError};
use super::types::{Difficulty, GameMode, Mark};
use super::win_detector::{Outcome, evaluate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub x: u32,
    pub o: u32,
    pub ties: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win { mark: Mark::X, .. } => self.x += 1,
            Outcome::Win { mark: Mark::O, .. } => self.o += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Undecided => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingInput,
    Decided(Outcome),
}

/// Identifies one decided networked match. Seeing the same key twice must not score twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionKey {
    pub room: String,
    pub created_at: i64,
    pub round: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    GameOver,
    NotYourTurn(Mark),
    InvalidMove(MoveError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameOver => write!(f, "Game is already over"),
            GameError::NotYourTurn(mark) => write!(f, "It is not {}'s turn", mark),
            GameError::InvalidMove(e) => write!(f, "Invalid move: {}", e),
        }
    }
}

impl std::error::Error for GameError {}

impl From<MoveError> for GameError {
    fn from(e: MoveError) -> Self {
        GameError::InvalidMove(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotEffect {
    pub outcome: Outcome,
    pub scored: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Mark,
    phase: GamePhase,
    scores: Scoreboard,
    mode: GameMode,
    generation: u64,
    last_remote_decision: Option<DecisionKey>,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            phase: GamePhase::AwaitingInput,
            scores: Scoreboard::default(),
            mode,
            generation: 0,
            last_remote_decision: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Mark {
        self.current
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        match self.phase {
            GamePhase::AwaitingInput => Outcome::Undecided,
            GamePhase::Decided(outcome) => outcome,
        }
    }

    pub fn is_decided(&self) -> bool {
        matches!(self.phase, GamePhase::Decided(_))
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Bumped by every new game; deferred work compares against it to detect staleness.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn submit_move(&mut self, index: usize, mark: Mark) -> Result<Outcome, GameError> {
        if self.is_decided() {
            return Err(GameError::GameOver);
        }
        if mark != self.current {
            return Err(GameError::NotYourTurn(mark));
        }

        self.board = self.board.place(index, mark)?;
        self.current = mark.opponent();

        let outcome = evaluate(&self.board);
        if outcome.is_decided() {
            self.phase = GamePhase::Decided(outcome);
            self.scores.record(&outcome);
        }
        Ok(outcome)
    }

    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.current = Mark::X;
        self.phase = GamePhase::AwaitingInput;
        self.generation += 1;
    }

    pub fn reset_scores(&mut self) {
        self.scores = Scoreboard::default();
        self.new_game();
    }

    pub fn switch_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.new_game();
    }

    /// The mark the automated opponent should play now, if any.
    pub fn pending_bot_turn(&self) -> Option<(Mark, Difficulty)> {
        if self.is_decided() {
            return None;
        }
        match self.mode {
            GameMode::SinglePlayer { human, difficulty } if self.current != human => {
                Some((self.current, difficulty))
            }
            _ => None,
        }
    }

    /// Replaces board and turn with the shared document's values. Re-applying an
    /// identical snapshot changes nothing; a decided snapshot scores once per key.
    pub fn apply_remote_snapshot(
        &mut self,
        board: Board,
        current: Mark,
        key: DecisionKey,
    ) -> SnapshotEffect {
        self.board = board;
        self.current = current;

        let outcome = evaluate(&board);
        let mut scored = false;
        if outcome.is_decided() {
            self.phase = GamePhase::Decided(outcome);
            if self.last_remote_decision.as_ref() != Some(&key) {
                self.scores.record(&outcome);
                self.last_remote_decision = Some(key);
                scored = true;
            }
        } else {
            self.phase = GamePhase::AwaitingInput;
        }

        SnapshotEffect { outcome, scored }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::board_from;

    fn single_player(human: Mark) -> GameSession {
        GameSession::new(GameMode::SinglePlayer { human, difficulty: Difficulty::Hard })
    }

    fn key(round: u64) -> DecisionKey {
        DecisionKey { room: "ABC123".to_string(), created_at: 1, round }
    }

    #[test]
    fn test_new_session_awaits_x() {
        let session = GameSession::new(GameMode::LocalTwoPlayer);
        assert_eq!(session.current(), Mark::X);
        assert_eq!(session.phase(), GamePhase::AwaitingInput);
        assert_eq!(session.board().mark_count(), 0);
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = GameSession::new(GameMode::LocalTwoPlayer);
        session.submit_move(0, Mark::X).unwrap();
        assert_eq!(session.current(), Mark::O);
        assert_eq!(session.submit_move(1, Mark::X), Err(GameError::NotYourTurn(Mark::X)));
        session.submit_move(1, Mark::O).unwrap();
        assert_eq!(session.current(), Mark::X);
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_changes() {
        let mut session = GameSession::new(GameMode::LocalTwoPlayer);
        session.submit_move(4, Mark::X).unwrap();
        let before = *session.board();

        assert_eq!(
            session.submit_move(4, Mark::O),
            Err(GameError::InvalidMove(MoveError::Occupied(4)))
        );
        assert_eq!(*session.board(), before);
        assert_eq!(session.current(), Mark::O);
    }

    #[test]
    fn test_win_decides_and_scores() {
        let mut session = GameSession::new(GameMode::LocalTwoPlayer);
        for (index, mark) in [(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O)] {
            session.submit_move(index, mark).unwrap();
        }
        let outcome = session.submit_move(2, Mark::X).unwrap();

        assert_eq!(outcome.winner(), Some(Mark::X));
        assert_eq!(outcome.winning_cells(), vec![0, 1, 2]);
        assert!(session.is_decided());
        assert_eq!(session.scores(), Scoreboard { x: 1, o: 0, ties: 0 });
        assert_eq!(session.submit_move(5, Mark::O), Err(GameError::GameOver));
    }

    #[test]
    fn test_tie_scores_tie_counter() {
        let mut session = GameSession::new(GameMode::LocalTwoPlayer);
        let moves = [0, 1, 2, 4, 3, 5, 7, 6, 8];
        let mut mark = Mark::X;
        let mut outcome = Outcome::Undecided;
        for index in moves {
            outcome = session.submit_move(index, mark).unwrap();
            mark = mark.opponent();
        }

        assert_eq!(outcome, Outcome::Tie);
        assert!(outcome.winning_cells().is_empty());
        assert_eq!(session.scores().ties, 1);
    }

    #[test]
    fn test_new_game_keeps_scores_and_bumps_generation() {
        let mut session = GameSession::new(GameMode::LocalTwoPlayer);
        for (index, mark) in [(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O), (2, Mark::X)] {
            session.submit_move(index, mark).unwrap();
        }
        let generation = session.generation();

        session.new_game();

        assert_eq!(session.phase(), GamePhase::AwaitingInput);
        assert_eq!(session.current(), Mark::X);
        assert_eq!(session.board().mark_count(), 0);
        assert_eq!(session.scores().x, 1);
        assert_eq!(session.generation(), generation + 1);
    }

    #[test]
    fn test_reset_scores_clears_counters_and_board() {
        let mut session = GameSession::new(GameMode::LocalTwoPlayer);
        for (index, mark) in [(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O), (2, Mark::X)] {
            session.submit_move(index, mark).unwrap();
        }

        session.reset_scores();

        assert_eq!(session.scores(), Scoreboard::default());
        assert!(!session.is_decided());
    }

    #[test]
    fn test_switch_mode_forces_new_game() {
        let mut session = GameSession::new(GameMode::LocalTwoPlayer);
        session.submit_move(4, Mark::X).unwrap();

        session.switch_mode(GameMode::Networked);

        assert_eq!(session.mode(), GameMode::Networked);
        assert_eq!(session.board().mark_count(), 0);
        assert_eq!(session.current(), Mark::X);
    }

    #[test]
    fn test_bot_opens_when_human_plays_o() {
        let session = single_player(Mark::O);
        assert_eq!(session.pending_bot_turn(), Some((Mark::X, Difficulty::Hard)));

        let session = single_player(Mark::X);
        assert_eq!(session.pending_bot_turn(), None);
    }

    #[test]
    fn test_bot_turn_follows_human_move() {
        let mut session = single_player(Mark::X);
        session.submit_move(4, Mark::X).unwrap();
        assert_eq!(session.pending_bot_turn(), Some((Mark::O, Difficulty::Hard)));
    }

    #[test]
    fn test_no_bot_turn_outside_single_player() {
        let mut session = GameSession::new(GameMode::LocalTwoPlayer);
        session.submit_move(4, Mark::X).unwrap();
        assert_eq!(session.pending_bot_turn(), None);
    }

    #[test]
    fn test_remote_snapshot_replaces_state() {
        let mut session = GameSession::new(GameMode::Networked);
        session.submit_move(0, Mark::X).unwrap();

        let effect = session.apply_remote_snapshot(board_from("__X\n_O_\n___"), Mark::X, key(0));

        assert_eq!(effect.outcome, Outcome::Undecided);
        assert_eq!(*session.board(), board_from("__X\n_O_\n___"));
        assert_eq!(session.current(), Mark::X);
    }

    #[test]
    fn test_identical_decided_snapshot_scores_once() {
        let mut session = GameSession::new(GameMode::Networked);
        let decided = board_from("XXX\nOO_\n___");

        let first = session.apply_remote_snapshot(decided, Mark::O, key(0));
        let replay = session.apply_remote_snapshot(decided, Mark::O, key(0));

        assert!(first.scored);
        assert!(!replay.scored);
        assert_eq!(session.scores().x, 1);
        assert!(session.is_decided());
    }

    #[test]
    fn test_next_round_with_same_board_scores_again() {
        let mut session = GameSession::new(GameMode::Networked);
        let decided = board_from("XXX\nOO_\n___");

        session.apply_remote_snapshot(decided, Mark::O, key(0));
        session.apply_remote_snapshot(Board::new(), Mark::X, key(1));
        assert!(!session.is_decided());
        session.apply_remote_snapshot(decided, Mark::O, key(1));

        assert_eq!(session.scores().x, 2);
    }
}
