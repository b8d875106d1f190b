use std::fmt;

use super::types::{PlayerSlot, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveError {
    OutOfRange(usize),
    CellOccupied(Position),
    GameNotInProgress,
    NotYourTurn(PlayerSlot),
}

impl fmt::Display for InvalidMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveError::OutOfRange(index) => {
                write!(f, "Position {} is out of bounds", index)
            }
            InvalidMoveError::CellOccupied(position) => {
                write!(f, "Cell {} is already marked", position)
            }
            InvalidMoveError::GameNotInProgress => write!(f, "Game is not in progress"),
            InvalidMoveError::NotYourTurn(slot) => write!(f, "Not the {}'s turn", slot),
        }
    }
}

impl std::error::Error for InvalidMoveError {}
