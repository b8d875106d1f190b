use crate::games::tictactoe::{Board, Player, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    BotChoice,
    WinCombination,
}

/// Rendering side of a session. Calls arrive while the session lock is held,
/// so implementations must not call back into the session.
pub trait GameView: Send + Sync + 'static {
    fn render_board(&self, board: &Board);

    fn show_message(&self, message: &str);

    fn display_score(&self, human: &Player, bot: &Player);

    fn highlight_cells(&self, positions: &[Position], highlight: Highlight);

    fn clear_highlights(&self, highlight: Highlight);

    fn mark_cell_used(&self, position: Position);
}
