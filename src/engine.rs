//! Game state: field, current block, gravity, collision and frame composition.

use crate::block::Block;
use crate::field::{CellState, FIELD_HEIGHT, FIELD_WIDTH, Field};
use crate::input::Action;
use crate::theme::Theme;
use rand::Rng;
use std::time::{Duration, Instant};

/// Composed view: field cells with the block overlaid as `Falling`.
pub type View = [[CellState; FIELD_WIDTH]; FIELD_HEIGHT];

/// True if any occupied cell of `block` is off the field or on a non-empty field cell.
pub fn intersects(block: &Block, field: &Field) -> bool {
    for (sx, sy) in block.field_cells() {
        let inside = sx >= 0
            && (sx as usize) < field.width()
            && sy >= 0
            && (sy as usize) < field.height();
        if !inside || field.cell_at(sx as usize, sy as usize) != CellState::Empty {
            return true;
        }
    }
    false
}

/// Fixed-interval gravity timer.
#[derive(Debug, Clone)]
pub struct GravityClock {
    interval: Duration,
    last: Instant,
}

impl GravityClock {
    pub const fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last: start,
        }
    }

    /// True once per elapsed interval; restarts the interval from `now` when due.
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// The field plus the single active block.
///
/// A landed block never locks into the field and no further block spawns;
/// gravity simply stops moving it.
#[derive(Debug, Clone)]
pub struct Engine {
    field: Field,
    block: Block,
}

impl Engine {
    /// New game with a block drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(field: Field, rng: &mut R) -> Self {
        let block = Block::spawn(field.width(), rng);
        tracing::info!(kind = ?block.kind, x = block.x, y = block.y, "spawned block");
        Self { field, block }
    }

    /// New game with a given block.
    #[cfg(test)]
    pub const fn with_block(field: Field, block: Block) -> Self {
        Self { field, block }
    }

    #[cfg(test)]
    pub const fn field(&self) -> &Field {
        &self.field
    }

    #[cfg(test)]
    pub const fn block(&self) -> &Block {
        &self.block
    }

    /// Commit `candidate` unless it intersects; the current block is the rollback value.
    fn try_commit(&mut self, candidate: Block) -> bool {
        if intersects(&candidate, &self.field) {
            false
        } else {
            self.block = candidate;
            true
        }
    }

    /// One gravity step. Returns false when the block is resting.
    pub fn tick(&mut self) -> bool {
        let moved = self.try_commit(self.block.translated(0, 1));
        if !moved {
            tracing::trace!(x = self.block.x, y = self.block.y, "gravity blocked");
        }
        moved
    }

    /// Apply a player action. Returns true if the block changed.
    /// `Exit` is handled by the caller and never touches the block.
    pub fn handle(&mut self, action: Action) -> bool {
        let candidate = match action {
            Action::MoveLeft => self.block.translated(-1, 0),
            Action::MoveRight => self.block.translated(1, 0),
            Action::MoveDown => self.block.translated(0, 1),
            Action::Rotate => self.block.rotated(),
            Action::Exit => return false,
        };
        let committed = self.try_commit(candidate);
        tracing::debug!(
            ?action,
            committed,
            x = self.block.x,
            y = self.block.y,
            "handled action"
        );
        committed
    }

    /// Field cells with the block overlaid. Off-field block cells are skipped.
    pub fn view(&self) -> View {
        let mut view = *self.field.rows();
        for (sx, sy) in self.block.field_cells() {
            if sx >= 0 && sy >= 0 {
                if let Some(cell) = view
                    .get_mut(sy as usize)
                    .and_then(|row| row.get_mut(sx as usize))
                {
                    *cell = CellState::Falling;
                }
            }
        }
        view
    }

    /// One string per row, top first, one theme glyph per cell.
    pub fn render_frame(&self, theme: &Theme) -> Vec<String> {
        self.view()
            .iter()
            .map(|row| row.iter().map(|&cell| theme.glyph(cell)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ShapeKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine(kind: ShapeKind) -> Engine {
        let field = Field::standard();
        let block = Block::spawn_kind(kind, field.width());
        Engine::with_block(field, block)
    }

    #[test]
    fn test_spawned_block_is_legal() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let game = Engine::new(Field::standard(), &mut rng);
            assert!(!intersects(game.block(), game.field()));
            assert_eq!(game.block().y, 0);
        }
    }

    #[test]
    fn test_in_bounds_empty_placement_does_not_intersect() {
        let field = Field::standard();
        let block = Block::spawn_kind(ShapeKind::L, 12).translated(-4, 2);
        assert!(block.field_cells().all(|(x, y)| {
            (0..12).contains(&x)
                && (0..18).contains(&y)
                && field.cell_at(x as usize, y as usize) == CellState::Empty
        }));
        assert!(!intersects(&block, &field));
    }

    #[test]
    fn test_out_of_bounds_intersects() {
        let field = Field::standard();
        let block = Block::spawn_kind(ShapeKind::I, 12);
        // occupied column is x+1
        assert!(intersects(&block.translated(-block.x - 2, 0), &field));
        assert!(intersects(&block.translated(12 - block.x - 1, 0), &field));
        assert!(intersects(&block.translated(0, -1), &field));
        assert!(intersects(&block.translated(0, 18), &field));
    }

    #[test]
    fn test_shift_onto_edge_intersects() {
        let field = Field::standard();
        let rightmost = Block::spawn_kind(ShapeKind::I, 12).translated(4, 0);
        assert_eq!(rightmost.field_cells().map(|(x, _)| x).max(), Some(10));
        assert!(!intersects(&rightmost, &field));
        // column 11 is wall, column 12 is off the field
        assert!(intersects(&rightmost.translated(1, 0), &field));
        assert!(intersects(&rightmost.translated(2, 0), &field));
    }

    #[test]
    fn test_hard_cell_intersects() {
        let field = Field::standard();
        // I occupies column 6; bottom row is hard.
        let block = Block::spawn_kind(ShapeKind::I, 12).translated(0, 15);
        assert!(intersects(&block, &field));
    }

    #[test]
    fn test_gravity_stops_on_hard_cells() {
        let mut game = engine(ShapeKind::I);
        assert_eq!((game.block().x, game.block().y), (5, 0));
        let mut first_blocked = None;
        for step in 1..=17 {
            let candidate = game.block().translated(0, 1);
            if first_blocked.is_none() && intersects(&candidate, game.field()) {
                first_blocked = Some(candidate.y);
            }
            game.tick();
            assert!(game.block().y <= step);
        }
        let first_blocked = first_blocked.unwrap();
        assert_eq!(game.block().y, first_blocked - 1);
        // column 6 is empty down to row 16; the bar spans three rows.
        assert_eq!(game.block().y, 14);
        assert!(!game.tick());
        assert_eq!(game.block().y, 14);
    }

    #[test]
    fn test_moves_commit() {
        let mut game = engine(ShapeKind::L);
        let start = *game.block();
        assert!(game.handle(Action::MoveLeft));
        assert_eq!(game.block().x, start.x - 1);
        assert!(game.handle(Action::MoveRight));
        assert!(game.handle(Action::MoveRight));
        assert_eq!(game.block().x, start.x + 1);
        assert!(game.handle(Action::MoveDown));
        assert_eq!(game.block().y, start.y + 1);
        assert!(game.handle(Action::Rotate));
        assert_eq!(game.block().shape, start.shape.rotated());
    }

    #[test]
    fn test_rejected_actions_roll_back() {
        let mut game = engine(ShapeKind::I);
        // against the left wall
        while game.handle(Action::MoveLeft) {}
        let resting = *game.block();
        assert!(!game.handle(Action::MoveLeft));
        assert_eq!(*game.block(), resting);

        // on the floor
        while game.handle(Action::MoveDown) {}
        let landed = *game.block();
        assert!(!game.handle(Action::MoveDown));
        assert_eq!(*game.block(), landed);
        assert!(!game.tick());
        assert_eq!(*game.block(), landed);
    }

    #[test]
    fn test_right_wall_rolls_back() {
        let mut game = engine(ShapeKind::I);
        while game.handle(Action::MoveRight) {}
        let resting = *game.block();
        // occupied column sits next to the right wall at column 11
        assert_eq!(resting.field_cells().map(|(x, _)| x).max(), Some(10));
        assert!(!game.handle(Action::MoveRight));
        assert_eq!(*game.block(), resting);
    }

    #[test]
    fn test_rejected_rotation_rolls_back() {
        // Vertical bar pressed against the left wall at the top: turning it
        // horizontal would put a cell into column 0.
        let mut game = engine(ShapeKind::I);
        while game.handle(Action::MoveLeft) {}
        assert_eq!(game.block().field_cells().next().map(|(x, _)| x), Some(1));
        let before = *game.block();
        assert!(!game.handle(Action::Rotate));
        assert_eq!(*game.block(), before);
    }

    #[test]
    fn test_exit_is_noop() {
        let mut game = engine(ShapeKind::L);
        let before = *game.block();
        assert!(!game.handle(Action::Exit));
        assert_eq!(*game.block(), before);
    }

    #[test]
    fn test_view_overlays_block_without_touching_field() {
        let game = engine(ShapeKind::I);
        let view = game.view();
        for y in 0..3 {
            assert_eq!(view[y][6], CellState::Falling);
        }
        assert_eq!(view[3][6], CellState::Empty);
        assert_eq!(view[0][0], CellState::Hard);
        let falling = view.iter().flatten().filter(|c| **c == CellState::Falling).count();
        assert_eq!(falling, 3);
        assert_eq!(*game.field(), Field::standard());
    }

    #[test]
    fn test_render_frame_rows() {
        let game = engine(ShapeKind::L);
        let rows = game.render_frame(&Theme::ascii());
        assert_eq!(rows.len(), 18);
        assert_eq!(rows[0], format!("[]{}(){}[]", " ".repeat(10), " ".repeat(8)));
        assert_eq!(rows[1], format!("[]{}()(){}[]", " ".repeat(10), " ".repeat(6)));
        assert_eq!(rows[17], "[]".repeat(12));
        assert!(rows.iter().all(|r| r.len() == 24));
    }

    #[test]
    fn test_gravity_clock() {
        let start = Instant::now();
        let mut clock = GravityClock::new(Duration::from_millis(100), start);
        assert!(!clock.due(start));
        assert!(!clock.due(start + Duration::from_millis(99)));
        assert!(clock.due(start + Duration::from_millis(100)));
        assert!(!clock.due(start + Duration::from_millis(150)));
        assert!(clock.due(start + Duration::from_millis(200)));
    }
}
