use crate::core::player::Symbol;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[readonly::make]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn from_index(index: usize, board_size: usize) -> Self {
        Self::new(index / board_size, index % board_size)
    }

    pub fn index(&self, board_size: usize) -> usize {
        self.row * board_size + self.col
    }

    pub fn is_within(&self, board_size: usize) -> bool {
        self.row < board_size && self.col < board_size
    }

    /// Neighbor one step along `(d_row, d_col)`, or `None` past the board edge.
    pub fn step(&self, d_row: isize, d_col: isize, board_size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let next = Self::new(row, col);
        next.is_within(board_size).then_some(next)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[readonly::make]
pub struct Move {
    pub pos: CellPos,
    pub symbol: Symbol,
}

impl Move {
    pub fn new(pos: CellPos, symbol: Symbol) -> Self {
        Self { pos, symbol }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        let pos = CellPos::new(2, 1);
        assert_eq!(pos.index(4), 9);
        assert_eq!(CellPos::from_index(9, 4), pos);
    }

    #[test]
    fn step_stops_at_every_edge() {
        let corner = CellPos::new(0, 0);
        assert_eq!(corner.step(-1, 0, 3), None);
        assert_eq!(corner.step(0, -1, 3), None);
        assert_eq!(corner.step(1, 1, 3), Some(CellPos::new(1, 1)));

        let far_corner = CellPos::new(2, 2);
        assert_eq!(far_corner.step(1, 0, 3), None);
        assert_eq!(far_corner.step(0, 1, 3), None);
        assert_eq!(far_corner.step(-1, -1, 3), Some(CellPos::new(1, 1)));
    }

    #[test]
    fn display_names_symbol_and_cell() {
        let mv = Move::new(CellPos::new(0, 2), Symbol::X);
        assert_eq!(mv.to_string(), "X@(0, 2)");
    }
}
