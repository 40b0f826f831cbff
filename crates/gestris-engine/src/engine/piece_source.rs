use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PieceColor, ShapeKind};

/// Supplies the shape and color of each newly spawned piece.
///
/// The game never touches a global random number generator; it asks its
/// `PieceSource` instead. Use [`RandomPieceSource`] for play and
/// [`SequencePieceSource`] when a test needs an exact order.
pub trait PieceSource {
    /// Returns the shape kind and color of the next piece.
    fn next_piece(&mut self) -> (ShapeKind, PieceColor);
}

impl<S> PieceSource for &mut S
where
    S: PieceSource + ?Sized,
{
    fn next_piece(&mut self) -> (ShapeKind, PieceColor) {
        (**self).next_piece()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit (16-byte) seed for the generator behind [`RandomPieceSource`].
/// The same seed always yields the same sequence of shapes and colors.
/// Seeds print and parse as 32 lowercase hex digits.
///
/// # Example
///
/// ```
/// use gestris_engine::{PieceSeed, PieceSource as _, RandomPieceSource};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let mut a = RandomPieceSource::with_seed(seed);
/// let mut b = RandomPieceSource::with_seed(seed);
/// assert_eq!(a.next_piece(), b.next_piece());
///
/// let text = seed.to_string();
/// assert_eq!(text.parse::<PieceSeed>().unwrap(), seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl std::fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid seed length: expected 32 hex digits, got {_0}")]
    Length(#[error(not(source))] usize),
    #[display("invalid seed: {_0:?} is not a hex number")]
    Digits(#[error(not(source))] String),
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::Length(s.len()));
        }
        // `from_str_radix` alone would also take a leading `+`.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::Digits(s.to_owned()));
        }
        let num =
            u128::from_str_radix(s, 16).map_err(|_| ParsePieceSeedError::Digits(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Draws shape and color independently and uniformly from a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceSource {
    /// Creates a source with a seed drawn from the thread-local generator.
    ///
    /// For reproducible games, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns the seed this source was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl PieceSource for RandomPieceSource {
    fn next_piece(&mut self) -> (ShapeKind, PieceColor) {
        let kind = self.rng.random();
        let color = self.rng.random();
        (kind, color)
    }
}

/// Replays a fixed list of pieces, starting over after the last one.
///
/// # Example
///
/// ```
/// use gestris_engine::{PieceColor, PieceSource as _, SequencePieceSource, ShapeKind};
///
/// let mut source = SequencePieceSource::new([
///     (ShapeKind::I, PieceColor::Cyan),
///     (ShapeKind::O, PieceColor::Red),
/// ]);
/// assert_eq!(source.next_piece(), (ShapeKind::I, PieceColor::Cyan));
/// assert_eq!(source.next_piece(), (ShapeKind::O, PieceColor::Red));
/// assert_eq!(source.next_piece(), (ShapeKind::I, PieceColor::Cyan));
/// ```
#[derive(Debug, Clone)]
pub struct SequencePieceSource {
    pieces: Vec<(ShapeKind, PieceColor)>,
    next: usize,
}

impl SequencePieceSource {
    /// # Panics
    ///
    /// Panics if `pieces` is empty.
    #[must_use]
    pub fn new<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = (ShapeKind, PieceColor)>,
    {
        let pieces = pieces.into_iter().collect::<Vec<_>>();
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, next: 0 }
    }

    /// Repeats a single shape and color forever.
    #[must_use]
    pub fn repeat(kind: ShapeKind, color: PieceColor) -> Self {
        Self::new([(kind, color)])
    }
}

impl PieceSource for SequencePieceSource {
    fn next_piece(&mut self) -> (ShapeKind, PieceColor) {
        let piece = self.pieces[self.next];
        self.next = (self.next + 1) % self.pieces.len();
        piece
    }
}
