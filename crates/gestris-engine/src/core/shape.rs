use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest bounding box side of any shape in the library.
pub(crate) const MAX_SHAPE_SIZE: usize = 4;

/// A rectangular boolean matrix describing which cells of a piece are filled.
///
/// Shapes are plain values: rotation returns a new `Shape` and never mutates the
/// receiver. Cells outside `width × height` are always empty, so two shapes
/// compare equal exactly when their visible matrices match.
///
/// # Example
///
/// ```
/// use gestris_engine::ShapeKind;
///
/// let i = ShapeKind::I.shape();
/// assert_eq!((i.width(), i.height()), (4, 1));
///
/// let rotated = i.rotated_clockwise();
/// assert_eq!((rotated.width(), rotated.height()), (1, 4));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from row slices, `true` meaning filled.
    ///
    /// # Panics
    ///
    /// Panics if the rows are empty, ragged, or larger than 4×4.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows(rows: &[&[bool]]) -> Self {
        let height = rows.len();
        assert!(height > 0 && height <= MAX_SHAPE_SIZE);
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_SIZE);

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < height {
            assert!(rows[y].len() == width, "shape rows must be rectangular");
            let mut x = 0;
            while x < width {
                cells[y][x] = rows[y][x];
                x += 1;
            }
            y += 1;
        }

        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Returns whether the cell at `(x, y)` is filled. Out-of-range cells are empty.
    #[must_use]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Iterates over the rows of the visible matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(move |row| &row[..self.width()])
    }

    /// Returns the `(dx, dy)` offsets of filled cells, row by row.
    pub fn filled_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &filled)| filled.then_some((dx, dy)))
        })
    }

    /// Rotates the matrix 90° clockwise.
    ///
    /// The result is the transpose of the matrix with its rows reversed:
    /// `new[y][x] = old[height - 1 - x][y]`. A `w × h` shape becomes `h × w`.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let old_width = self.width as usize;
        let old_height = self.height as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < old_width {
            let mut x = 0;
            while x < old_height {
                cells[y][x] = self.cells[old_height - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .rows()
            .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect::<String>())
            .collect::<Vec<_>>();
        f.debug_tuple("Shape").field(&rows.join("/")).finish()
    }
}

/// One of the seven canonical tetrominoes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// `####`
    I = 0,
    /// `###` over `.#.`
    T = 1,
    /// `##` over `##`
    O = 2,
    /// `.##` over `##.`
    S = 3,
    /// `##.` over `.##`
    Z = 4,
    /// `###` over `#..`
    L = 5,
    /// `###` over `..#`
    J = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// Library order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
    ];

    /// Returns the spawn orientation of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        SHAPES[self as usize]
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::T => 'T',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
        }
    }

    /// Parses a shape kind from its single character code.
    ///
    /// # Examples
    ///
    /// ```
    /// use gestris_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_char('S'), Some(ShapeKind::S));
    /// assert_eq!(ShapeKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'T' => Some(ShapeKind::T),
            'O' => Some(ShapeKind::O),
            'S' => Some(ShapeKind::S),
            'Z' => Some(ShapeKind::Z),
            'L' => Some(ShapeKind::L),
            'J' => Some(ShapeKind::J),
            _ => None,
        }
    }
}

const SHAPES: [Shape; ShapeKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    [
        // I-piece
        Shape::from_rows(&[&[C, C, C, C]]),
        // T-piece
        Shape::from_rows(&[&[C, C, C], &[E, C, E]]),
        // O-piece
        Shape::from_rows(&[&[C, C], &[C, C]]),
        // S-piece
        Shape::from_rows(&[&[E, C, C], &[C, C, E]]),
        // Z-piece
        Shape::from_rows(&[&[C, C, E], &[E, C, C]]),
        // L-piece
        Shape::from_rows(&[&[C, C, C], &[C, E, E]]),
        // J-piece
        Shape::from_rows(&[&[C, C, C], &[E, E, C]]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shape: &Shape) -> Vec<String> {
        shape
            .rows()
            .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn test_library_shapes() {
        assert_eq!(render(&ShapeKind::I.shape()), ["####"]);
        assert_eq!(render(&ShapeKind::T.shape()), ["###", ".#."]);
        assert_eq!(render(&ShapeKind::O.shape()), ["##", "##"]);
        assert_eq!(render(&ShapeKind::S.shape()), [".##", "##."]);
        assert_eq!(render(&ShapeKind::Z.shape()), ["##.", ".##"]);
        assert_eq!(render(&ShapeKind::L.shape()), ["###", "#.."]);
        assert_eq!(render(&ShapeKind::J.shape()), ["###", "..#"]);
    }

    #[test]
    fn test_every_shape_is_a_tetromino() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.shape().filled_offsets().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_non_square_shape() {
        let rotated = ShapeKind::I.shape().rotated_clockwise();
        assert_eq!(render(&rotated), ["#", "#", "#", "#"]);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = ShapeKind::T.shape();
        assert_eq!(render(&t.rotated_clockwise()), [".#", "##", ".#"]);
        assert_eq!(
            render(&t.rotated_clockwise().rotated_clockwise()),
            [".#.", "###"]
        );
    }

    #[test]
    fn test_rotate_l_clockwise() {
        let l = ShapeKind::L.shape();
        assert_eq!(render(&l.rotated_clockwise()), ["##", ".#", ".#"]);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in ShapeKind::ALL {
            let shape = kind.shape();
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated_clockwise();
            }
            assert_eq!(rotated, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_o_rotation_is_invariant() {
        let o = ShapeKind::O.shape();
        assert_eq!(o.rotated_clockwise(), o);
    }

    #[test]
    fn test_is_filled_out_of_range() {
        let i = ShapeKind::I.shape();
        assert!(i.is_filled(3, 0));
        assert!(!i.is_filled(4, 0));
        assert!(!i.is_filled(0, 1));
    }

    #[test]
    fn test_shape_kind_char_conversion() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(ShapeKind::from_char('x'), None);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(
            format!("{:?}", ShapeKind::S.shape()),
            "Shape(\".##/##.\")"
        );
    }
}
