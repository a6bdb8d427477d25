//! Falling block: shape registry, spawn, rotation and translation.

use rand::Rng;

/// Side of the square box every pattern is stored in.
pub const BOX_SIZE: usize = 4;

/// Occupancy pattern, `pattern[y][x]`.
pub type Pattern = [[bool; BOX_SIZE]; BOX_SIZE];

const O: bool = false;
const X: bool = true;

/// Registered shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    L,
}

impl ShapeKind {
    pub const ALL: [Self; 2] = [Self::I, Self::L];

    /// Spawn pattern and active sub-grid size.
    pub const fn shape(self) -> Shape {
        match self {
            Self::I => Shape {
                size: 3,
                pattern: [
                    [O, X, O, O],
                    [O, X, O, O],
                    [O, X, O, O],
                    [O, O, O, O],
                ],
            },
            Self::L => Shape {
                size: 3,
                pattern: [
                    [O, X, O, O],
                    [O, X, X, O],
                    [O, O, O, O],
                    [O, O, O, O],
                ],
            },
        }
    }
}

/// Pattern plus the extent (`size` x `size`, top-left) that rotates.
/// Cells outside the active extent are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub size: usize,
    pub pattern: Pattern,
}

impl Shape {
    /// Quarter turn of the active sub-grid: source `(y, x)` lands on `(size-1-x, y)`.
    pub fn rotated(&self) -> Self {
        let mut pattern = self.pattern;
        for y in 0..self.size {
            for x in 0..self.size {
                pattern[self.size - 1 - x][y] = self.pattern[y][x];
            }
        }
        Self {
            size: self.size,
            pattern,
        }
    }

    /// Occupied `(x, y)` offsets inside the active sub-grid, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| self.pattern[y][x].then_some((x, y)))
        })
    }
}

/// The active piece. A plain value: moves and rotations return new blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Block {
    /// Random registered shape, centred horizontally on the top row.
    pub fn spawn<R: Rng + ?Sized>(field_width: usize, rng: &mut R) -> Self {
        let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
        Self::spawn_kind(kind, field_width)
    }

    /// Spawn position for a given shape: `x = width/2 - size/2`, `y = 0`.
    pub fn spawn_kind(kind: ShapeKind, field_width: usize) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            x: (field_width / 2) as i32 - (shape.size / 2) as i32,
            y: 0,
        }
    }

    /// Same position, pattern turned a quarter.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Shifted by `(dx, dy)`; no clamping.
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Occupied cells in field coordinates (may be outside the field).
    pub fn field_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(|(x, y)| (self.x + x as i32, self.y + y as i32))
    }
}
