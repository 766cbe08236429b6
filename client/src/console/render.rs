use common::games::GameView;
use common::games::tictactoe::CELL_COUNT;

/// Text rendering of one view. Empty cells show their 1-based input number and
/// winning cells are bracketed.
pub fn render_view(seat: &str, view: &GameView) -> String {
    let winning = view.outcome.winning_cells();
    let cells: Vec<String> = (0..CELL_COUNT)
        .map(|index| {
            let symbol = match view.board.get(index) {
                Some(mark) => mark.to_string(),
                None => (index + 1).to_string(),
            };
            if winning.contains(&index) {
                format!("[{}]", symbol)
            } else {
                format!(" {} ", symbol)
            }
        })
        .collect();

    let mut lines = vec![format!("== {} == {}", seat, view.mode_label)];
    for (row, chunk) in cells.chunks(3).enumerate() {
        if row > 0 {
            lines.push("---+---+---".to_string());
        }
        lines.push(chunk.join("|"));
    }
    lines.push(view.turn_label.clone());
    lines.push(format!(
        "Score  X: {}  O: {}  Ties: {}",
        view.scores.x, view.scores.o, view.scores.ties
    ));
    lines.push(format!("Online: {}", view.connection_status));
    lines.join("\n")
}
