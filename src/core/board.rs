use crate::core::{
    error::{GameError, GameResult},
    player::Symbol,
    position::CellPos,
    rule_helper,
    settings::GameSettings,
};
use itertools::Itertools;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Symbol>>, // row-major, size * size
}

impl Board {
    pub fn new(size: usize) -> GameResult<Self> {
        if !rule_helper::is_valid_board_size(size) {
            return Err(GameError::InvalidBoardSize { found: size });
        }

        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Empty board for already validated settings.
    pub fn for_settings(settings: &GameSettings) -> Self {
        Self {
            size: settings.board_size,
            cells: vec![None; settings.num_cells()],
        }
    }

    /// Rebuilds a board from row-major cell contents, as stored in a snapshot.
    pub fn from_cells(size: usize, cells: Vec<Option<Symbol>>) -> GameResult<Self> {
        if !rule_helper::is_valid_board_size(size) {
            return Err(GameError::InvalidBoardSize { found: size });
        }

        let expected = size * size;
        if cells.len() != expected {
            return Err(GameError::CellCountMismatch {
                size,
                expected,
                found: cells.len(),
            });
        }

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Option<Symbol>] {
        &self.cells
    }

    /// Contents at `pos`; out-of-bounds reads as empty.
    pub fn get(&self, pos: CellPos) -> Option<Symbol> {
        if !pos.is_within(self.size) {
            return None;
        }
        self.cells[pos.index(self.size)]
    }

    pub fn place(&mut self, pos: CellPos, symbol: Symbol) -> GameResult<()> {
        if !pos.is_within(self.size) {
            return Err(GameError::cell_out_of_bounds(pos.row, pos.col, self.size));
        }

        let cell = &mut self.cells[pos.index(self.size)];
        if cell.is_some() {
            return Err(GameError::cell_occupied(pos.row, pos.col));
        }
        *cell = Some(symbol);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn num_marked(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (CellPos, Symbol)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|symbol| (CellPos::from_index(idx, self.size), symbol)))
    }

    pub fn summary(&self, indentation_level: usize) -> String {
        let indentation = "  ".repeat(indentation_level);
        self.cells
            .chunks(self.size)
            .map(|row| {
                let row_text = row
                    .iter()
                    .map(|cell| cell.map(Symbol::as_str).unwrap_or("."))
                    .join(" ");
                format!("{indentation}{row_text}")
            })
            .join("\n")
    }
}
