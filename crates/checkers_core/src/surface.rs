//! The rendering capabilities the interaction layer relies on.

use crate::animation::Point;
use crate::types::{PieceId, Square, BOARD_SIZE};
use std::collections::BTreeSet;

/// Hit-testing and highlighting provided by whatever draws the board.
pub trait Surface {
    /// Square under a surface position, if any.
    fn square_at_point(&self, point: Point) -> Option<Square>;

    /// Centre of a square in surface coordinates.
    fn square_center(&self, square: Square) -> Point;

    /// Marks a square as a legal drop target.
    fn highlight_target(&mut self, square: Square);

    fn clear_target(&mut self, square: Square);

    /// Marks the target the held piece would currently drop on.
    fn set_pending(&mut self, square: Square);

    fn clear_pending(&mut self, square: Square);

    /// The held piece follows the pointer.
    fn hold_piece(&mut self, _piece: PieceId, _at: Point) {}

    /// The held piece is no longer attached to the pointer.
    fn release_piece(&mut self, _piece: PieceId) {}
}

/// Headless surface: a uniform grid of square cells with row 0 at the top.
#[derive(Clone, Debug)]
pub struct GridSurface {
    pub origin: Point,
    pub square_size: f32,
    targets: BTreeSet<Square>,
    pending: Option<Square>,
    held: Option<(PieceId, Point)>,
}

impl Default for GridSurface {
    fn default() -> Self {
        Self::new(Point::default(), 64.0)
    }
}

impl GridSurface {
    pub fn new(origin: Point, square_size: f32) -> Self {
        Self {
            origin,
            square_size,
            targets: BTreeSet::new(),
            pending: None,
            held: None,
        }
    }

    pub fn targets(&self) -> impl Iterator<Item = Square> + '_ {
        self.targets.iter().copied()
    }

    pub fn is_target(&self, square: Square) -> bool {
        self.targets.contains(&square)
    }

    pub fn pending(&self) -> Option<Square> {
        self.pending
    }

    pub fn held(&self) -> Option<(PieceId, Point)> {
        self.held
    }
}

impl Surface for GridSurface {
    fn square_at_point(&self, point: Point) -> Option<Square> {
        let x = (point.x - self.origin.x) / self.square_size;
        let y = (point.y - self.origin.y) / self.square_size;
        if x < 0.0 || y < 0.0 || x >= BOARD_SIZE as f32 || y >= BOARD_SIZE as f32 {
            return None;
        }
        Square::new(y as i8, x as i8)
    }

    fn square_center(&self, square: Square) -> Point {
        Point::new(
            self.origin.x + (square.col as f32 + 0.5) * self.square_size,
            self.origin.y + (square.row as f32 + 0.5) * self.square_size,
        )
    }

    fn highlight_target(&mut self, square: Square) {
        self.targets.insert(square);
    }

    fn clear_target(&mut self, square: Square) {
        self.targets.remove(&square);
    }

    fn set_pending(&mut self, square: Square) {
        self.pending = Some(square);
    }

    fn clear_pending(&mut self, square: Square) {
        if self.pending == Some(square) {
            self.pending = None;
        }
    }

    fn hold_piece(&mut self, piece: PieceId, at: Point) {
        self.held = Some((piece, at));
    }

    fn release_piece(&mut self, piece: PieceId) {
        if matches!(self.held, Some((held, _)) if held == piece) {
            self.held = None;
        }
    }
}
