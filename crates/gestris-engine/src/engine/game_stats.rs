use serde::{Deserialize, Serialize};

/// Diagnostic counters for a game session.
///
/// There is no score: these only describe how the session went.
///
/// - **Frames**: ticks processed while playing
/// - **Merged pieces**: pieces locked into the board, including the one whose
///   successor topped out
/// - **Rejected transforms**: gestures discarded because the candidate collided
///
/// # Example
///
/// ```
/// use gestris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.increment_frame();
/// stats.reject_transform();
///
/// assert_eq!(stats.frames(), 1);
/// assert_eq!(stats.rejected_transforms(), 1);
/// assert_eq!(stats.merged_pieces(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    frames: u64,
    merged_pieces: u64,
    rejected_transforms: u64,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames: 0,
            merged_pieces: 0,
            rejected_transforms: 0,
        }
    }

    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub const fn merged_pieces(&self) -> u64 {
        self.merged_pieces
    }

    #[must_use]
    pub const fn rejected_transforms(&self) -> u64 {
        self.rejected_transforms
    }

    pub fn increment_frame(&mut self) {
        self.frames += 1;
    }

    pub fn complete_piece_merge(&mut self) {
        self.merged_pieces += 1;
    }

    pub fn reject_transform(&mut self) {
        self.rejected_transforms += 1;
    }
}
