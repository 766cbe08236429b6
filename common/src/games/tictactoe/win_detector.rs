use super::board::Board;
use super::types::Mark;

/// Rows, then columns, then the two diagonals.
pub const WINNING_LINES: [WinningLine; 8] = [
    WinningLine([0, 1, 2]),
    WinningLine([3, 4, 5]),
    WinningLine([6, 7, 8]),
    WinningLine([0, 3, 6]),
    WinningLine([1, 4, 7]),
    WinningLine([2, 5, 8]),
    WinningLine([0, 4, 8]),
    WinningLine([2, 4, 6]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinningLine(pub [usize; 3]);

impl WinningLine {
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Undecided,
    Win { mark: Mark, line: WinningLine },
    Tie,
}

impl Outcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Cells to highlight. Empty unless someone won.
    pub fn winning_cells(&self) -> Vec<usize> {
        match self {
            Outcome::Win { line, .. } => line.cells().to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn headline(&self) -> Option<String> {
        match self {
            Outcome::Undecided => None,
            Outcome::Win { mark, .. } => Some(format!("{} wins!", mark)),
            Outcome::Tie => Some("Tie game!".to_string()),
        }
    }
}

pub fn check_win_with_line(board: &Board) -> Option<(Mark, WinningLine)> {
    WINNING_LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells();
        match board.get(a) {
            Some(mark) if board.get(b) == Some(mark) && board.get(c) == Some(mark) => {
                Some((mark, *line))
            }
            _ => None,
        }
    })
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = check_win_with_line(board) {
        return Outcome::Win { mark, line };
    }
    if board.is_full() {
        Outcome::Tie
    } else {
        Outcome::Undecided
    }
}
