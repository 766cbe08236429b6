use crate::games::SessionRng;
use super::board::Board;
use super::types::{Difficulty, Mark};
use super::win_detector::{Outcome, evaluate};

const WIN_SCORE: i32 = 10;

pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
    pub difficulty: Difficulty,
}

pub fn calculate_move(input: &BotInput, rng: &mut SessionRng) -> usize {
    difficulty_move(&input.board, input.bot_mark, input.difficulty, rng)
}

/// Hard never touches `rng`; the other levels draw once to pick a branch.
pub fn difficulty_move(
    board: &Board,
    bot_mark: Mark,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> usize {
    match difficulty {
        Difficulty::Hard => best_move(board, bot_mark),
        Difficulty::Medium | Difficulty::Easy => {
            if rng.chance(difficulty.random_move_probability()) {
                random_move(board, rng)
            } else {
                best_move(board, bot_mark)
            }
        }
    }
}

pub fn random_move(board: &Board, rng: &mut SessionRng) -> usize {
    let available_moves = board.empty_cells();
    assert!(!available_moves.is_empty(), "random_move called on a full board");
    available_moves[rng.random_range(0..available_moves.len())]
}

/// Lowest index among the moves with the highest minimax score.
pub fn best_move(board: &Board, bot_mark: Mark) -> usize {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for (index, score) in score_moves(board, bot_mark) {
        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    match best_move {
        Some(index) => index,
        None => panic!("best_move called on a full board"),
    }
}

/// Minimax value of every empty cell for `bot_mark`, in ascending cell order.
pub fn score_moves(board: &Board, bot_mark: Mark) -> Vec<(usize, i32)> {
    let mut board = *board;
    board
        .empty_cells()
        .into_iter()
        .map(|index| {
            board.set(index, Some(bot_mark));
            let score = minimax(&mut board, 0, false, bot_mark, i32::MIN, i32::MAX);
            board.set(index, None);
            (index, score)
        })
        .collect()
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match evaluate(board) {
        Outcome::Win { mark, .. } if mark == bot_mark => return WIN_SCORE - depth,
        Outcome::Win { .. } => return depth - WIN_SCORE,
        Outcome::Tie => return 0,
        Outcome::Undecided => {}
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in board.empty_cells() {
            board.set(index, Some(bot_mark));
            let eval = minimax(board, depth + 1, false, bot_mark, alpha, beta);
            board.set(index, None);

            max_eval = max_eval.max(eval);
            alpha = alpha.max(max_eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let opponent_mark = bot_mark.opponent();
        let mut min_eval = i32::MAX;
        for index in board.empty_cells() {
            board.set(index, Some(opponent_mark));
            let eval = minimax(board, depth + 1, true, bot_mark, alpha, beta);
            board.set(index, None);

            min_eval = min_eval.min(eval);
            beta = beta.min(min_eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::board_from;

    fn score_of(scores: &[(usize, i32)], index: usize) -> i32 {
        scores.iter().find(|(i, _)| *i == index).map(|(_, s)| *s).unwrap()
    }

    fn play_out_optimally(mut board: Board, mut to_move: Mark) -> Outcome {
        loop {
            let outcome = evaluate(&board);
            if outcome.is_decided() {
                return outcome;
            }
            let index = best_move(&board, to_move);
            board = board.place(index, to_move).unwrap();
            to_move = to_move.opponent();
        }
    }

    fn assert_bot_never_loses(board: Board, to_move: Mark, bot_mark: Mark) {
        let outcome = evaluate(&board);
        if outcome.is_decided() {
            assert_ne!(outcome.winner(), Some(bot_mark.opponent()), "bot lost on\n{}", board);
            return;
        }

        if to_move == bot_mark {
            let index = best_move(&board, bot_mark);
            let next = board.place(index, bot_mark).unwrap();
            assert_bot_never_loses(next, to_move.opponent(), bot_mark);
        } else {
            for index in board.empty_cells() {
                let next = board.place(index, to_move).unwrap();
                assert_bot_never_loses(next, to_move.opponent(), bot_mark);
            }
        }
    }

    #[test]
    fn test_perfect_play_from_empty_board_is_a_tie() {
        assert_eq!(play_out_optimally(Board::new(), Mark::X), Outcome::Tie);
    }

    #[test]
    fn test_bot_never_loses_as_x() {
        assert_bot_never_loses(Board::new(), Mark::X, Mark::X);
    }

    #[test]
    fn test_bot_never_loses_as_o() {
        assert_bot_never_loses(Board::new(), Mark::X, Mark::O);
    }

    #[test]
    fn test_empty_board_picks_first_cell_on_equal_scores() {
        let scores = score_moves(&Board::new(), Mark::X);
        assert!(scores.iter().all(|(_, score)| *score == 0));
        assert_eq!(best_move(&Board::new(), Mark::X), 0);
    }

    #[test]
    fn test_o_completes_row_instead_of_leaving_x_the_win() {
        let board = board_from("XX_\nOO_\n___");
        let scores = score_moves(&board, Mark::O);

        assert_eq!(best_move(&board, Mark::O), 5);
        assert!(score_of(&scores, 2) < score_of(&scores, 5));
    }

    #[test]
    fn test_blocks_immediate_threat() {
        // X threatens 2; O has no win of its own.
        let board = board_from("XX_\n_O_\n___");
        assert_eq!(best_move(&board, Mark::O), 2);
    }

    #[test]
    fn test_prefers_fastest_win() {
        // X can finish row 0 right away.
        let board = board_from("XX_\nOO_\nX_O");
        let scores = score_moves(&board, Mark::X);

        assert_eq!(score_of(&scores, 2), WIN_SCORE);
        assert_eq!(best_move(&board, Mark::X), 2);
    }

    #[test]
    fn test_unstoppable_fork_scores_every_reply_as_loss() {
        // X threatens both 3 and 7; O can only block one.
        let board = board_from("X_O\n_O_\nX_X");
        let scores = score_moves(&board, Mark::O);

        assert_eq!(scores.len(), 4);
        assert!(scores.iter().all(|(_, score)| *score == 1 - WIN_SCORE));
        assert_eq!(best_move(&board, Mark::O), 1);
    }

    #[test]
    fn test_random_move_only_picks_empty_cells() {
        let board = board_from("XOX\nO_X\nOX_");
        let mut rng = SessionRng::new(11);
        for _ in 0..50 {
            let index = random_move(&board, &mut rng);
            assert!(index == 4 || index == 8);
        }
    }

    #[test]
    fn test_random_move_is_roughly_uniform() {
        let board = Board::new();
        let mut rng = SessionRng::new(3);
        let mut counts = [0usize; 9];
        for _ in 0..9000 {
            counts[random_move(&board, &mut rng)] += 1;
        }
        assert!(counts.iter().all(|&c| (800..1200).contains(&c)), "{:?}", counts);
    }

    #[test]
    fn test_hard_matches_best_move_and_never_draws_randomness() {
        let board = board_from("X__\n_O_\n___");
        let mut rng = SessionRng::new(99);
        let mut untouched = SessionRng::new(99);

        for _ in 0..20 {
            assert_eq!(
                difficulty_move(&board, Mark::X, Difficulty::Hard, &mut rng),
                best_move(&board, Mark::X)
            );
        }
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    fn count_non_best(difficulty: Difficulty, seed: u64) -> usize {
        // Best reply is 2 (immediate win), which is also the first of five empty cells.
        let board = board_from("XX_\nOO_\n___");
        let mut rng = SessionRng::new(seed);
        (0..2000)
            .filter(|_| difficulty_move(&board, Mark::X, difficulty, &mut rng) != 2)
            .count()
    }

    #[test]
    fn test_easy_plays_randomly_most_of_the_time() {
        // Expected 2000 * 0.7 * 4/5 = 1120.
        let misses = count_non_best(Difficulty::Easy, 5);
        assert!((1000..1240).contains(&misses), "{}", misses);
    }

    #[test]
    fn test_medium_plays_randomly_sometimes() {
        // Expected 2000 * 0.3 * 4/5 = 480.
        let misses = count_non_best(Difficulty::Medium, 5);
        assert!((390..570).contains(&misses), "{}", misses);
    }

    #[test]
    fn test_calculate_move_uses_input_difficulty() {
        let input = BotInput {
            board: board_from("XX_\nOO_\n___"),
            bot_mark: Mark::O,
            difficulty: Difficulty::Hard,
        };
        let mut rng = SessionRng::new(0);
        assert_eq!(calculate_move(&input, &mut rng), 5);
    }

    #[test]
    #[should_panic]
    fn test_best_move_on_full_board_panics() {
        best_move(&board_from("XOX\nXOO\nOXX"), Mark::X);
    }
}
