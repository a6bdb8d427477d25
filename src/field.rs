//! Playfield: fixed grid of empty and hard cells.

/// Playfield width in cells.
pub const FIELD_WIDTH: usize = 12;
/// Playfield height in cells.
pub const FIELD_HEIGHT: usize = 18;

/// Default layout: 1 = hard wall, 0 = empty. Row 0 is the top.
const DEFAULT_LAYOUT: [[u8; FIELD_WIDTH]; FIELD_HEIGHT] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Single cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    /// Static obstacle.
    Hard,
    /// Overlay for the active block; only ever appears in a rendered view.
    Falling,
}

/// Static playfield. `cells[y][x]`, y=0 is top. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cells: [[CellState; FIELD_WIDTH]; FIELD_HEIGHT],
}

impl Field {
    /// Field built from the default wall layout.
    pub fn standard() -> Self {
        let mut cells = [[CellState::Empty; FIELD_WIDTH]; FIELD_HEIGHT];
        for (row, layout_row) in cells.iter_mut().zip(DEFAULT_LAYOUT.iter()) {
            for (cell, &flag) in row.iter_mut().zip(layout_row.iter()) {
                if flag != 0 {
                    *cell = CellState::Hard;
                }
            }
        }
        Self { cells }
    }

    #[inline]
    pub const fn width(&self) -> usize {
        FIELD_WIDTH
    }

    #[inline]
    pub const fn height(&self) -> usize {
        FIELD_HEIGHT
    }

    /// Cell at column `x`, row `y`.
    ///
    /// Callers range-check first; an out-of-range coordinate panics.
    #[inline]
    pub fn cell_at(&self, x: usize, y: usize) -> CellState {
        self.cells[y][x]
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> &[[CellState; FIELD_WIDTH]; FIELD_HEIGHT] {
        &self.cells
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::standard()
    }
}
