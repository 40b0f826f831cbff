//! Collision testing and merging of pieces against the board.
//!
//! A piece collides when any of its filled cells:
//!
//! - lies left of column 0 or right of the last column ([`Collision::Wall`]),
//! - lies below the last row ([`Collision::Floor`]), or
//! - lands on a settled cell ([`Collision::Block`]).
//!
//! Cells above row 0 never collide, which lets pieces sit partly above the
//! visible board.

use serde::{Deserialize, Serialize};

use super::{board::Board, piece::Piece};

/// What blocked a piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Collision {
    /// A side wall (column out of range).
    #[display("wall")]
    Wall,
    /// The bottom edge (row out of range).
    #[display("floor")]
    Floor,
    /// A settled block.
    #[display("block")]
    Block,
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const WIDTH: i32 = Board::WIDTH as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const HEIGHT: i32 = Board::HEIGHT as i32;

impl Board {
    /// Returns what blocks `piece`, or `None` if it fits.
    ///
    /// Walls and the floor take precedence over settled blocks.
    #[must_use]
    pub fn collision(&self, piece: &Piece) -> Option<Collision> {
        let mut blocked = false;
        for (col, row) in piece.occupied_positions() {
            if !(0..WIDTH).contains(&col) {
                return Some(Collision::Wall);
            }
            if row >= HEIGHT {
                return Some(Collision::Floor);
            }
            if row >= 0 {
                // Coordinates are in range here; an error would still mean "blocked".
                blocked |= self.is_occupied(col, row).unwrap_or(true);
            }
        }
        blocked.then_some(Collision::Block)
    }

    /// Returns whether `piece` collides with the walls, the floor, or settled cells.
    ///
    /// # Example
    ///
    /// ```
    /// use gestris_engine::{Board, Piece, PieceColor, PiecePosition, ShapeKind};
    ///
    /// let board = Board::EMPTY;
    /// let piece = Piece::new(ShapeKind::I, PieceColor::Cyan);
    ///
    /// assert!(!board.is_colliding(&piece));
    /// assert!(board.is_colliding(&piece.with_position(PiecePosition::new(7, 0))));
    /// assert!(!board.is_colliding(&piece.with_position(PiecePosition::new(0, -3))));
    /// ```
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        self.collision(piece).is_some()
    }

    /// Writes the piece's color into every cell it covers.
    ///
    /// Cells above the board are skipped. Every other cell must lie on the
    /// board, which holds for any piece that passed [`Self::collision`]
    /// against the walls and floor.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for (col, row) in piece.occupied_positions() {
            if row < 0 {
                continue;
            }
            let filled = self.set_cell(col, row, piece.color());
            debug_assert!(filled.is_ok(), "filled piece off the board: {filled:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{PieceColor, PiecePosition, ShapeKind};

    use super::*;

    fn piece_at(kind: ShapeKind, col: i32, row: i32) -> Piece {
        Piece::new(kind, PieceColor::Cyan).with_position(PiecePosition::new(col, row))
    }

    #[test]
    fn test_empty_board_in_range_no_collision() {
        let board = Board::EMPTY;
        for kind in ShapeKind::ALL {
            assert_eq!(board.collision(&piece_at(kind, 0, 0)), None, "{kind:?}");
            assert_eq!(board.collision(&piece_at(kind, 5, 0)), None, "{kind:?}");
        }
    }

    #[test]
    fn test_wall_collision_regardless_of_contents() {
        let mut full = Board::EMPTY;
        for row in 0..20 {
            for col in 0..10 {
                full.set_cell(col, row, PieceColor::Red).unwrap();
            }
        }

        for board in [Board::EMPTY, full] {
            assert_eq!(
                board.collision(&piece_at(ShapeKind::O, -1, 5)),
                Some(Collision::Wall)
            );
            assert_eq!(
                board.collision(&piece_at(ShapeKind::I, 7, 5)),
                Some(Collision::Wall)
            );
            assert_eq!(
                board.collision(&piece_at(ShapeKind::O, 4, 19)),
                Some(Collision::Floor)
            );
        }
    }

    #[test]
    fn test_floor_collision() {
        let board = Board::EMPTY;
        assert_eq!(board.collision(&piece_at(ShapeKind::I, 0, 19)), None);
        assert_eq!(
            board.collision(&piece_at(ShapeKind::I, 0, 20)),
            Some(Collision::Floor)
        );
        assert_eq!(
            board.collision(&piece_at(ShapeKind::T, 3, 19)),
            Some(Collision::Floor)
        );
    }

    #[test]
    fn test_rows_above_top_do_not_collide() {
        let board = Board::EMPTY;
        let vertical_i = piece_at(ShapeKind::I, 5, -3).rotated_clockwise();
        assert_eq!(board.collision(&vertical_i), None);
        assert_eq!(board.collision(&piece_at(ShapeKind::O, 0, -10)), None);

        // Still blocked by walls while above the board.
        assert_eq!(
            board.collision(&piece_at(ShapeKind::O, 9, -10)),
            Some(Collision::Wall)
        );
    }

    #[test]
    fn test_block_collision() {
        let mut board = Board::EMPTY;
        board.set_cell(4, 10, PieceColor::Green).unwrap();

        // T body on the block: (3,10) (4,10) (5,10) (4,11)
        assert_eq!(
            board.collision(&piece_at(ShapeKind::T, 3, 10)),
            Some(Collision::Block)
        );
        // T stem on the block: (3,9) (4,9) (5,9) (4,10)
        assert_eq!(
            board.collision(&piece_at(ShapeKind::T, 3, 9)),
            Some(Collision::Block)
        );
        // S lower-left cell on the block: (5,9) (6,9) (4,10) (5,10)
        assert_eq!(
            board.collision(&piece_at(ShapeKind::S, 4, 9)),
            Some(Collision::Block)
        );
        // Z empty corner over the block: (4,9) (5,9) (5,10) (6,10)
        assert_eq!(board.collision(&piece_at(ShapeKind::Z, 4, 9)), None);
    }

    #[test]
    fn test_fill_piece_marks_cells() {
        let mut board = Board::EMPTY;
        let piece = Piece::new(ShapeKind::L, PieceColor::Orange)
            .with_position(PiecePosition::new(0, 18));
        assert!(!board.is_colliding(&piece));

        board.fill_piece(&piece);

        let mut cells = board.occupied_cells().collect::<Vec<_>>();
        cells.sort_unstable();
        assert_eq!(
            cells,
            [
                (0, 18, PieceColor::Orange),
                (0, 19, PieceColor::Orange),
                (1, 18, PieceColor::Orange),
                (2, 18, PieceColor::Orange),
            ]
        );
        assert_eq!(board.collision(&piece), Some(Collision::Block));
    }

    #[test]
    fn test_fill_piece_skips_cells_above_board() {
        let mut board = Board::EMPTY;
        let piece = piece_at(ShapeKind::I, 0, -1).rotated_clockwise();
        board.fill_piece(&piece);
        assert_eq!(board.occupied_count(), 3);
        assert_eq!(board.is_occupied(0, 0), Ok(true));
        assert_eq!(board.is_occupied(0, 2), Ok(true));
        assert_eq!(board.is_occupied(0, 3), Ok(false));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "filled piece off the board")]
    fn test_fill_piece_past_wall_panics_in_debug() {
        let mut board = Board::EMPTY;
        board.fill_piece(&piece_at(ShapeKind::O, 9, 5));
    }

    #[test]
    fn test_merged_cells_collide_for_every_kind() {
        for kind in ShapeKind::ALL {
            for turns in 0..4 {
                let mut piece = piece_at(kind, 3, 12);
                for _ in 0..turns {
                    piece = piece.rotated_clockwise();
                }
                let mut board = Board::EMPTY;
                board.fill_piece(&piece);
                assert!(board.is_colliding(&piece), "{kind:?} turns={turns}");
            }
        }
    }
}
