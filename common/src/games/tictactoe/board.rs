use super::types::{CELL_COUNT, Mark, Position};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the cell. Occupancy is checked by the game state, not here.
    pub fn set_cell(&mut self, position: Position, mark: Mark) {
        self.cells[position.index()] = mark;
    }

    pub fn get_cell(&self, position: Position) -> Mark {
        self.cells[position.index()]
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.get_cell(position).is_empty()
    }

    pub fn reset(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all()
            .filter(|&pos| self.is_empty_at(pos))
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    #[cfg(test)]
    pub fn from_marks(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }
}
