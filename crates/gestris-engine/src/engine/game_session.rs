use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::{
    PieceCollisionError, TopOutError,
    core::{board::Board, piece::Piece},
};

use super::{
    GameStats,
    game_field::{GameField, GravityOutcome},
    gesture::Gesture,
    piece_source::{PieceSource, RandomPieceSource},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Playing,
    GameOver,
}

/// What a single [`GameSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The game was already over; nothing changed.
    Idle,
    /// The active piece moved down one row.
    Fell,
    /// The active piece was merged and a new one spawned.
    Merged,
    /// The active piece was merged and the new one collided at spawn.
    ToppedOut,
}

/// A game from the first spawn to top-out, advanced one frame per gesture.
#[derive(Debug, Clone)]
pub struct GameSession<S = RandomPieceSource> {
    field: GameField<S>,
    stats: GameStats,
    state: SessionState,
    last_gesture: Gesture,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(RandomPieceSource::new())
    }
}

impl<S> GameSession<S>
where
    S: PieceSource,
{
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            field: GameField::new(source),
            stats: GameStats::new(),
            state: SessionState::Playing,
            last_gesture: Gesture::None,
        }
    }

    /// Starts a session on a pre-filled board.
    ///
    /// If the first piece already collides at its spawn position the session
    /// starts in [`SessionState::GameOver`].
    #[must_use]
    pub fn with_board(board: Board, source: S) -> Self {
        let field = GameField::with_board(board, source);
        let state = if field.is_topped_out() {
            info!("game over: spawn blocked on the initial board");
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        Self {
            field,
            stats: GameStats::new(),
            state,
            last_gesture: Gesture::None,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField<S> {
        &self.field
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        self.field.active_piece()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// The gesture consumed by the most recent tick.
    #[must_use]
    pub fn last_gesture(&self) -> Gesture {
        self.last_gesture
    }

    /// Replaces the active piece if it fits. Intended for setting up
    /// positions; play itself only moves pieces through [`Self::tick`].
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        self.field.set_active_piece(piece)
    }

    /// Advances the game by one frame.
    ///
    /// The gesture is applied first and silently discarded if its candidate
    /// collides; gravity follows. After game over this does nothing and
    /// returns [`TickOutcome::Idle`].
    pub fn tick(&mut self, gesture: Gesture) -> TickOutcome {
        if self.state.is_game_over() {
            return TickOutcome::Idle;
        }

        self.stats.increment_frame();
        self.last_gesture = gesture;
        trace!(frame = self.stats.frames(), %gesture, "tick");

        if let Err(err) = self.apply_gesture(gesture) {
            trace!(%gesture, %err, "gesture rejected");
            self.stats.reject_transform();
        }

        match self.field.apply_gravity() {
            Ok(GravityOutcome::Fell) => TickOutcome::Fell,
            Ok(GravityOutcome::Merged) => {
                self.stats.complete_piece_merge();
                TickOutcome::Merged
            }
            Err(TopOutError) => {
                self.stats.complete_piece_merge();
                self.state = SessionState::GameOver;
                info!(
                    frames = self.stats.frames(),
                    merged_pieces = self.stats.merged_pieces(),
                    "game over"
                );
                TickOutcome::ToppedOut
            }
        }
    }

    fn apply_gesture(&mut self, gesture: Gesture) -> Result<(), PieceCollisionError> {
        match gesture {
            Gesture::None => Ok(()),
            Gesture::Rotate => self.field.try_rotate_clockwise(),
            Gesture::MoveLeft => self.field.try_move_left(),
            Gesture::MoveRight => self.field.try_move_right(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{PieceColor, PiecePosition, SequencePieceSource, ShapeKind};

    use super::*;

    fn session_of(kind: ShapeKind) -> GameSession<SequencePieceSource> {
        GameSession::new(SequencePieceSource::repeat(kind, PieceColor::Purple))
    }

    #[test]
    fn test_new_session_is_playing() {
        let session = session_of(ShapeKind::T);
        assert!(session.state().is_playing());
        assert_eq!(session.stats(), &GameStats::new());
        assert_eq!(session.last_gesture(), Gesture::None);
        assert_eq!(session.active_piece().position(), PiecePosition::SPAWN);
    }

    #[test]
    fn test_moves_past_left_wall_are_rejected() {
        let mut session = session_of(ShapeKind::O);
        for _ in 0..9 {
            assert_eq!(session.tick(Gesture::MoveLeft), TickOutcome::Fell);
        }
        // Five moves reach column 0; the other four hit the wall.
        assert_eq!(session.active_piece().position(), PiecePosition::new(0, 9));
        assert_eq!(session.stats().rejected_transforms(), 4);
        assert_eq!(session.stats().frames(), 9);
        assert_eq!(session.last_gesture(), Gesture::MoveLeft);
    }

    #[test]
    fn test_moves_past_right_wall_are_rejected() {
        let mut session = session_of(ShapeKind::O);
        for _ in 0..6 {
            session.tick(Gesture::MoveRight);
        }
        // O is two wide: the rightmost anchor is column 8.
        assert_eq!(session.active_piece().position(), PiecePosition::new(8, 6));
        assert_eq!(session.stats().rejected_transforms(), 3);
    }

    #[test]
    fn test_idle_i_lands_on_bottom_row() {
        let mut session = session_of(ShapeKind::I);
        let anchor = session.active_piece().position().col;

        for frame in 1..=19 {
            assert_eq!(
                session.tick(Gesture::None),
                TickOutcome::Fell,
                "frame {frame}"
            );
        }
        assert_eq!(
            session.active_piece().position(),
            PiecePosition::new(anchor, 19)
        );
        assert_eq!(session.tick(Gesture::None), TickOutcome::Merged);

        let mut cells = session.board().occupied_cells().collect::<Vec<_>>();
        cells.sort_unstable();
        let expected = (anchor..anchor + 4)
            .map(|col| (usize::try_from(col).unwrap(), 19, PieceColor::Purple))
            .collect::<Vec<_>>();
        assert_eq!(cells, expected);

        assert_eq!(session.active_piece().position(), PiecePosition::SPAWN);
        assert_eq!(session.stats().merged_pieces(), 1);
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_aligned_i_fills_gap_in_bottom_row() {
        let mut board = Board::EMPTY;
        for col in 4..10 {
            board.set_cell(col, 19, PieceColor::Green).unwrap();
        }
        let gap =
            Piece::new(ShapeKind::I, PieceColor::Cyan).with_position(PiecePosition::new(0, 19));
        assert!(!board.is_colliding(&gap));

        let mut session = GameSession::with_board(
            board,
            SequencePieceSource::repeat(ShapeKind::I, PieceColor::Cyan),
        );
        assert!(session.state().is_playing());

        for _ in 0..5 {
            session.tick(Gesture::MoveLeft);
        }
        assert_eq!(session.active_piece().position(), PiecePosition::new(0, 5));

        let mut outcome = TickOutcome::Fell;
        for _ in 0..20 {
            outcome = session.tick(Gesture::None);
            if outcome.is_merged() {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Merged);
        assert!(session.board().is_row_full(19));
        // No line clear: the full row stays.
        assert_eq!(session.board().occupied_count(), 10);
    }

    #[test]
    fn test_blocked_spawn_starts_in_game_over() {
        let mut board = Board::EMPTY;
        board.set_cell(6, 0, PieceColor::Red).unwrap();

        let mut session = GameSession::with_board(
            board,
            SequencePieceSource::repeat(ShapeKind::T, PieceColor::Red),
        );
        assert!(session.state().is_game_over());
        assert_eq!(session.tick(Gesture::Rotate), TickOutcome::Idle);
        assert_eq!(session.stats().frames(), 0);
    }

    #[test]
    fn test_stacking_tops_out() {
        // Each O lands two rows higher; the tenth fills rows 0-1 and the
        // eleventh cannot spawn.
        let mut session = session_of(ShapeKind::O);
        let mut merges = 0;
        let mut outcome = TickOutcome::Fell;
        for _ in 0..1000 {
            outcome = session.tick(Gesture::None);
            match outcome {
                TickOutcome::Merged => merges += 1,
                TickOutcome::ToppedOut => break,
                _ => {}
            }
        }

        assert_eq!(outcome, TickOutcome::ToppedOut);
        assert_eq!(merges, 9);
        assert_eq!(session.stats().merged_pieces(), 10);
        assert_eq!(session.stats().frames(), 100);
        assert!(session.state().is_game_over());
        assert!(session.board().is_colliding(session.active_piece()));

        let board = session.board().clone();
        let piece = *session.active_piece();
        for gesture in Gesture::ALL {
            assert_eq!(session.tick(gesture), TickOutcome::Idle);
        }
        assert_eq!(session.board(), &board);
        assert_eq!(*session.active_piece(), piece);
        assert_eq!(session.stats().frames(), 100);
    }

    #[test]
    fn test_rejected_rotation_counts() {
        let mut session = session_of(ShapeKind::I);
        let vertical = session
            .active_piece()
            .rotated_clockwise()
            .with_position(PiecePosition::new(9, 3));
        session.set_active_piece(vertical).unwrap();

        assert_eq!(session.tick(Gesture::Rotate), TickOutcome::Fell);
        assert_eq!(session.active_piece().rotation(), 1);
        assert_eq!(session.active_piece().position(), PiecePosition::new(9, 4));
        assert_eq!(session.stats().rejected_transforms(), 1);
    }
}
