use serde::{Deserialize, Serialize};

use super::{
    board::Board,
    color::PieceColor,
    shape::{Shape, ShapeKind},
};

/// The piece under player control.
///
/// A piece is a shape matrix in its current rotation state, a color, and the
/// board position of its bounding box's top-left corner. Pieces are values:
/// [`rotated_clockwise`](Self::rotated_clockwise) and
/// [`translated`](Self::translated) return candidates that the caller tests
/// against the board before committing them.
///
/// # Example
///
/// ```
/// use gestris_engine::{Piece, PieceColor, PiecePosition, ShapeKind};
///
/// let piece = Piece::new(ShapeKind::T, PieceColor::Purple);
/// assert_eq!(piece.position(), PiecePosition::SPAWN);
///
/// let moved = piece.left().rotated_clockwise();
/// assert_eq!(moved.position(), PiecePosition::new(4, 0));
/// assert_eq!(moved.rotation(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    shape: Shape,
    rotation: u8,
    color: PieceColor,
    position: PiecePosition,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@col,row:color" (e.g., "T#1@5,3:P")
        let s = format!(
            "{}#{}@{},{}:{}",
            self.kind.as_char(),
            self.rotation,
            self.position.col,
            self.position.row,
            self.color.as_char()
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let format_error = || -> D::Error {
            serde::de::Error::custom(format!(
                "expected format 'kind#rotation@col,row:color', got '{s}'"
            ))
        };

        let (kind_str, rest) = s.split_once('#').ok_or_else(format_error)?;
        let (rotation_str, rest) = rest.split_once('@').ok_or_else(format_error)?;
        let (position_str, color_str) = rest.split_once(':').ok_or_else(format_error)?;
        let (col_str, row_str) = position_str.split_once(',').ok_or_else(format_error)?;

        let kind = single_char(kind_str)
            .and_then(ShapeKind::from_char)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid shape kind: {kind_str}")))?;
        let color = single_char(color_str)
            .and_then(PieceColor::from_char)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color: {color_str}")))?;

        let rotation = rotation_str.parse::<u8>().map_err(|e| {
            serde::de::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        if rotation > 3 {
            return Err(serde::de::Error::custom(format!(
                "rotation must be 0-3, got {rotation}"
            )));
        }

        let col = col_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid column: {col_str} ({e})")))?;
        let row = row_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid row: {row_str} ({e})")))?;

        let mut piece = Piece::new(kind, color).with_position(PiecePosition::new(col, row));
        for _ in 0..rotation {
            piece = piece.rotated_clockwise();
        }
        Ok(piece)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

impl Piece {
    /// Creates a piece in its library orientation at [`PiecePosition::SPAWN`].
    #[must_use]
    pub fn new(kind: ShapeKind, color: PieceColor) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            rotation: 0,
            color,
            position: PiecePosition::SPAWN,
        }
    }

    #[must_use]
    pub fn with_position(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of clockwise quarter turns applied since spawn, modulo 4.
    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.color
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the board coordinates `(col, row)` of every filled cell.
    ///
    /// Coordinates may fall outside the board; collision testing decides what
    /// that means.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.filled_offsets().map(move |(dx, dy)| {
            (
                self.position.col + offset(dx),
                self.position.row + offset(dy),
            )
        })
    }

    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }

    #[must_use]
    pub fn translated(&self, delta_col: i32, delta_row: i32) -> Self {
        Self {
            position: self.position.translated(delta_col, delta_row),
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.translated(0, 1)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn offset(d: usize) -> i32 {
    // Shape offsets are bounded by the 4×4 shape box.
    d as i32
}

/// Board position of a piece's bounding-box top-left corner.
///
/// Column grows rightward and row grows downward; `(0, 0)` is the top-left
/// board cell. Positions are signed so that candidate moves past the walls can
/// be expressed and then rejected by collision testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    pub col: i32,
    pub row: i32,
}

impl PiecePosition {
    /// Where every new piece appears: the horizontal center of the top row.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN: Self = Self::new(Board::WIDTH as i32 / 2, 0);

    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn translated(self, delta_col: i32, delta_row: i32) -> Self {
        Self::new(self.col + delta_col, self.row + delta_row)
    }
}
