use common::games::tictactoe::{CELL_COUNT, InvalidMoveError, PlayerSlot, Position};

pub const HELP_TEXT: &str = "Commands: 1-9 mark a cell, r restart, s reset scores, h help, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Position),
    Restart,
    ResetScores,
    Help,
    Quit,
}

/// Cells are typed 1-based, the way they are drawn on the board.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let command = match trimmed.to_ascii_lowercase().as_str() {
        "r" | "restart" => Command::Restart,
        "s" | "scores" => Command::ResetScores,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => {
            let cell: usize = other
                .parse()
                .map_err(|_| format!("Unknown command '{}'. {}", trimmed, HELP_TEXT))?;
            if cell == 0 || cell > CELL_COUNT {
                return Err(format!("Cell must be between 1 and {}", CELL_COUNT));
            }
            let position = Position::new(cell - 1).map_err(|e| e.to_string())?;
            Command::Play(position)
        }
    };

    Ok(Some(command))
}

/// Rejections phrased in the 1-based numbering the player types.
pub fn describe_rejection(error: &InvalidMoveError) -> String {
    match error {
        InvalidMoveError::CellOccupied(position) => {
            format!("Cell {} is already marked", position.index() + 1)
        }
        InvalidMoveError::OutOfRange(_) => format!("Cell must be between 1 and {}", CELL_COUNT),
        InvalidMoveError::NotYourTurn(PlayerSlot::Human) => "Wait for the bot to move".to_string(),
        InvalidMoveError::GameNotInProgress => "Game is over, press r to play again".to_string(),
        other => other.to_string(),
    }
}
