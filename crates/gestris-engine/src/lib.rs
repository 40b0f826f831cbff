//! Falling-block puzzle engine driven by one gesture symbol per frame.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - the grid model: shapes, colors, [`Board`], [`Piece`] and the
//!   collision/merge rules.
//! - [`engine`] - the per-frame state machine ([`GameSession`]) and the piece
//!   sources it draws new pieces from.
//!
//! # Example
//!
//! ```
//! use gestris_engine::{GameSession, Gesture, PieceSeed, RandomPieceSource};
//!
//! let seed: PieceSeed = "000000000000000000000000000000ff".parse().unwrap();
//! let mut session = GameSession::new(RandomPieceSource::with_seed(seed));
//!
//! session.tick(Gesture::MoveLeft);
//! session.tick(Gesture::Rotate);
//! session.tick(Gesture::None);
//!
//! assert!(session.state().is_playing());
//! assert_eq!(session.stats().frames(), 3);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A board query addressed a cell outside the 10×20 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({col}, {row}) is outside the board")]
pub struct OutOfBoundsError {
    pub col: i32,
    pub row: i32,
}

/// A candidate piece position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece blocked by {kind}")]
pub struct PieceCollisionError {
    pub kind: Collision,
}

/// The piece spawned after a merge collides with the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("new piece collides at its spawn position")]
pub struct TopOutError;
