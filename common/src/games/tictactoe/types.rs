use std::fmt;

use super::error::InvalidMoveError;

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Row-major index of a cell, always in `0..CELL_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(usize);

impl Position {
    pub fn new(index: usize) -> Result<Self, InvalidMoveError> {
        if index >= CELL_COUNT {
            return Err(InvalidMoveError::OutOfRange(index));
        }
        Ok(Self(index))
    }

    pub fn from_row_col(row: usize, col: usize) -> Result<Self, InvalidMoveError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(InvalidMoveError::OutOfRange(row * BOARD_SIZE + col));
        }
        Ok(Self(row * BOARD_SIZE + col))
    }

    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn row(&self) -> usize {
        self.0 / BOARD_SIZE
    }

    pub fn col(&self) -> usize {
        self.0 % BOARD_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    Human,
    Bot,
}

impl PlayerSlot {
    pub fn other(&self) -> PlayerSlot {
        match self {
            PlayerSlot::Human => PlayerSlot::Bot,
            PlayerSlot::Bot => PlayerSlot::Human,
        }
    }

    /// Human moves on even rounds, the bot on odd ones.
    pub fn for_round(round: u8) -> PlayerSlot {
        if round % 2 == 0 {
            PlayerSlot::Human
        } else {
            PlayerSlot::Bot
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSlot::Human => write!(f, "human"),
            PlayerSlot::Bot => write!(f, "bot"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinCombination {
    cells: [Position; 3],
}

impl WinCombination {
    pub(crate) fn from_indices(indices: [usize; 3]) -> Self {
        Self {
            cells: indices.map(Position),
        }
    }

    pub fn cells(&self) -> &[Position; 3] {
        &self.cells
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    pub fn indices(&self) -> [usize; 3] {
        self.cells.map(|p| p.index())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingMove(PlayerSlot),
    Won {
        slot: PlayerSlot,
        combination: WinCombination,
    },
    Draw,
    Idle,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Won { .. } | GameStatus::Draw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Continue {
        next: PlayerSlot,
    },
    Won {
        slot: PlayerSlot,
        combination: WinCombination,
    },
    Draw,
}
