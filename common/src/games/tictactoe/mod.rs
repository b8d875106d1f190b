mod board;
mod bot_controller;
mod error;
mod game_state;
mod player;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::choose_move;
pub use error::InvalidMoveError;
pub use game_state::{DEFAULT_BOT_NAME, DEFAULT_HUMAN_NAME, TicTacToeGameState};
pub use player::Player;
pub use types::{
    BOARD_SIZE, CELL_COUNT, GameStatus, Mark, PlayOutcome, PlayerSlot, Position, WinCombination,
};
pub use win_detector::{
    WIN_COMBINATIONS, combinations_containing, find_winning_combinations, winning_cells,
    winning_combination_at,
};
