//! Per-frame game logic on top of the [`core`](crate::core) grid model.
//!
//! - [`GameField`] - board, active piece, and the piece source; applies
//!   validated transforms, gravity, merge, and respawn
//! - [`GameSession`] - the Playing → GameOver state machine, one
//!   [`tick`](GameSession::tick) per frame
//! - [`GameStats`] - diagnostic frame and piece counters
//! - [`Gesture`] - the discrete input symbol read once per frame
//! - [`PieceSource`] - where new pieces come from ([`RandomPieceSource`],
//!   [`SequencePieceSource`])
//!
//! # Frame order
//!
//! 1. The gesture is applied as a candidate transform; a colliding candidate
//!    is discarded.
//! 2. Gravity moves the piece down one row. If that collides, the piece is
//!    merged where it was and a new one spawns.
//! 3. If the new piece collides at its spawn position the game is over.
//!
//! # Example
//!
//! ```
//! use gestris_engine::{
//!     GameSession, Gesture, PieceColor, SequencePieceSource, ShapeKind, TickOutcome,
//! };
//!
//! let source = SequencePieceSource::repeat(ShapeKind::O, PieceColor::Red);
//! let mut session = GameSession::new(source);
//!
//! assert_eq!(session.tick(Gesture::MoveLeft), TickOutcome::Fell);
//! assert_eq!(session.active_piece().position().col, 4);
//! ```

pub use self::{game_field::*, game_session::*, game_stats::*, gesture::*, piece_source::*};

mod game_field;
mod game_session;
mod game_stats;
mod gesture;
mod piece_source;
