use tracing::debug;

use crate::{
    PieceCollisionError, TopOutError,
    core::{board::Board, piece::Piece},
};

use super::piece_source::{PieceSource, RandomPieceSource};

/// Result of moving the active piece one row down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GravityOutcome {
    /// The piece moved down.
    Fell,
    /// The piece could not move, was merged, and a new piece spawned.
    Merged,
}

/// Board, active piece, and the source of the pieces that follow.
///
/// Every transform builds a candidate piece, tests it against the board, and
/// only then replaces the active piece, so a rejected move never leaves a
/// partial update behind.
#[derive(Debug, Clone)]
pub struct GameField<S = RandomPieceSource> {
    board: Board,
    active_piece: Piece,
    source: S,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new(RandomPieceSource::new())
    }
}

impl<S> GameField<S>
where
    S: PieceSource,
{
    /// Creates a field with an empty board and a freshly spawned piece.
    #[must_use]
    pub fn new(mut source: S) -> Self {
        let active_piece = spawn(&mut source);
        Self {
            board: Board::EMPTY,
            active_piece,
            source,
        }
    }

    /// Creates a field on a pre-filled board.
    ///
    /// The first piece may already collide at its spawn position; check
    /// [`Self::is_topped_out`].
    #[must_use]
    pub fn with_board(board: Board, mut source: S) -> Self {
        let active_piece = spawn(&mut source);
        Self {
            board,
            active_piece,
            source,
        }
    }

    /// Returns whether the active piece overlaps the board, which only
    /// happens when a spawn was blocked.
    #[must_use]
    pub fn is_topped_out(&self) -> bool {
        self.board.is_colliding(&self.active_piece)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active_piece
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replaces the active piece if `piece` fits on the board.
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if let Some(kind) = self.board.collision(&piece) {
            return Err(PieceCollisionError { kind });
        }
        self.active_piece = piece;
        Ok(())
    }

    /// Rotates the active piece a quarter turn clockwise about its anchor.
    ///
    /// There are no wall kicks: a rotation that collides is rejected as a
    /// whole.
    pub fn try_rotate_clockwise(&mut self) -> Result<(), PieceCollisionError> {
        self.set_active_piece(self.active_piece.rotated_clockwise())
    }

    pub fn try_translate(
        &mut self,
        delta_col: i32,
        delta_row: i32,
    ) -> Result<(), PieceCollisionError> {
        self.set_active_piece(self.active_piece.translated(delta_col, delta_row))
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.set_active_piece(self.active_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.set_active_piece(self.active_piece.right())
    }

    /// Moves the active piece down one row, merging it when it cannot fall.
    ///
    /// Returns [`TopOutError`] when the piece spawned after the merge
    /// collides at its spawn position.
    pub fn apply_gravity(&mut self) -> Result<GravityOutcome, TopOutError> {
        if self.set_active_piece(self.active_piece.down()).is_ok() {
            return Ok(GravityOutcome::Fell);
        }
        self.complete_piece_drop()?;
        Ok(GravityOutcome::Merged)
    }

    /// Merges the active piece into the board where it is and spawns the next
    /// one.
    ///
    /// On [`TopOutError`] the colliding piece is still installed as the active
    /// piece so that it can be drawn.
    pub fn complete_piece_drop(&mut self) -> Result<(), TopOutError> {
        self.board.fill_piece(&self.active_piece);
        debug!(piece = ?self.active_piece, "merged piece");

        self.active_piece = spawn(&mut self.source);
        debug!(piece = ?self.active_piece, "spawned piece");

        if self.is_topped_out() {
            return Err(TopOutError);
        }
        Ok(())
    }
}

fn spawn<S>(source: &mut S) -> Piece
where
    S: PieceSource,
{
    let (kind, color) = source.next_piece();
    Piece::new(kind, color)
}
