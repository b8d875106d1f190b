mod tictactoe_session;
mod view;

pub use tictactoe_session::{BotTimings, TicTacToeSession, TicTacToeSessionSettings};
pub use view::{GameView, Highlight};
