use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Mutex;

use common::engine::session::{GameView, Highlight};
use common::games::tictactoe::{BOARD_SIZE, Board, Player, Position};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Default, Clone)]
pub struct ViewState {
    pub board: Board,
    pub message: String,
    pub human_score: (String, u32),
    pub bot_score: (String, u32),
    pub highlights: HashMap<Highlight, Vec<Position>>,
    pub last_move: Option<Position>,
}

impl ViewState {
    fn highlight_of(&self, position: Position) -> Option<Highlight> {
        [Highlight::BotChoice, Highlight::WinCombination]
            .into_iter()
            .find(|h| self.highlights.get(h).is_some_and(|cells| cells.contains(&position)))
    }
}

pub struct TerminalView {
    state: Mutex<ViewState>,
    clear_screen: bool,
}

impl TerminalView {
    pub fn new(clear_screen: bool) -> Self {
        Self {
            state: Mutex::new(ViewState::default()),
            clear_screen,
        }
    }

    /// Out-of-band line below the frame, e.g. a rejected command.
    pub fn show_notice(&self, notice: &str) {
        println!("{}", notice);
    }

    fn update(&self, redraw: bool, f: impl FnOnce(&mut ViewState)) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        f(&mut state);
        if redraw {
            let frame = render_frame(&state);
            if self.clear_screen {
                print!("{}", CLEAR_SCREEN);
            }
            println!("{}", frame);
        }
    }
}

impl GameView for TerminalView {
    fn render_board(&self, board: &Board) {
        self.update(false, |state| {
            state.board = board.clone();
            if state.last_move.is_some_and(|p| board.is_empty_at(p)) {
                state.last_move = None;
            }
        });
    }

    fn show_message(&self, message: &str) {
        self.update(true, |state| state.message = message.to_string());
    }

    fn display_score(&self, human: &Player, bot: &Player) {
        self.update(true, |state| {
            state.human_score = (human.name().to_string(), human.wins());
            state.bot_score = (bot.name().to_string(), bot.wins());
        });
    }

    fn highlight_cells(&self, positions: &[Position], highlight: Highlight) {
        self.update(true, |state| {
            state.highlights.insert(highlight, positions.to_vec());
        });
    }

    fn clear_highlights(&self, highlight: Highlight) {
        self.update(false, |state| {
            state.highlights.remove(&highlight);
        });
    }

    fn mark_cell_used(&self, position: Position) {
        self.update(false, |state| {
            state.last_move = Some(position);
        });
    }
}

fn render_cell(state: &ViewState, position: Position) -> String {
    let mark = state.board.get_cell(position);
    let content = if mark.is_empty() {
        (position.index() + 1).to_string()
    } else {
        mark.to_string()
    };

    match state.highlight_of(position) {
        Some(Highlight::WinCombination) => format!("[{}]", content),
        Some(Highlight::BotChoice) => format!("({})", content),
        None if state.last_move == Some(position) => format!(" {}*", content),
        None => format!(" {} ", content),
    }
}

pub fn render_frame(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {}   {}: {}",
        state.human_score.0, state.human_score.1, state.bot_score.0, state.bot_score.1
    );
    let _ = writeln!(out);

    for row in 0..BOARD_SIZE {
        let cells: Vec<String> = (0..BOARD_SIZE)
            .filter_map(|col| Position::from_row_col(row, col).ok())
            .map(|position| render_cell(state, position))
            .collect();
        let _ = writeln!(out, " {}", cells.join("|"));
        if row + 1 < BOARD_SIZE {
            let _ = writeln!(out, " ---+---+---");
        }
    }

    let _ = writeln!(out);
    out.push_str(&state.message);
    out
}
