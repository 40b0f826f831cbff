use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Color of a piece, and of the board cells it leaves behind when merged.
///
/// The palette is drawn independently of the shape when a piece spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PieceColor {
    Cyan = 0,
    Orange = 1,
    Green = 2,
    Red = 3,
    Purple = 4,
}

impl Distribution<PieceColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceColor {
        PieceColor::ALL[rng.random_range(0..PieceColor::LEN)]
    }
}

impl PieceColor {
    /// Number of palette entries (5).
    pub const LEN: usize = 5;

    /// Palette in draw order.
    pub const ALL: [Self; Self::LEN] = [
        PieceColor::Cyan,
        PieceColor::Orange,
        PieceColor::Green,
        PieceColor::Red,
        PieceColor::Purple,
    ];

    /// Returns the display color as an `(r, g, b)` triple.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            PieceColor::Cyan => (0, 255, 255),
            PieceColor::Orange => (255, 165, 0),
            PieceColor::Green => (0, 255, 0),
            PieceColor::Red => (255, 0, 0),
            PieceColor::Purple => (128, 0, 128),
        }
    }

    /// Returns the single character code used in board and piece text formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use gestris_engine::PieceColor;
    ///
    /// assert_eq!(PieceColor::Orange.as_char(), 'O');
    /// assert_eq!(PieceColor::from_char('P'), Some(PieceColor::Purple));
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceColor::Cyan => 'C',
            PieceColor::Orange => 'O',
            PieceColor::Green => 'G',
            PieceColor::Red => 'R',
            PieceColor::Purple => 'P',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(PieceColor::Cyan),
            'O' => Some(PieceColor::Orange),
            'G' => Some(PieceColor::Green),
            'R' => Some(PieceColor::Red),
            'P' => Some(PieceColor::Purple),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_color_char_conversion() {
        for color in PieceColor::ALL {
            assert_eq!(PieceColor::from_char(color.as_char()), Some(color));
        }
        assert_eq!(PieceColor::from_char('c'), None);
        assert_eq!(PieceColor::from_char('.'), None);
    }

    #[test]
    fn test_palette_matches_reference_rgb() {
        assert_eq!(PieceColor::Cyan.rgb(), (0, 255, 255));
        assert_eq!(PieceColor::Orange.rgb(), (255, 165, 0));
        assert_eq!(PieceColor::Purple.rgb(), (128, 0, 128));
    }

    #[test]
    fn test_random_colors_cover_palette() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceColor::LEN];
        for _ in 0..500 {
            let color: PieceColor = rng.random();
            seen[color as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "unseen colors: {seen:?}");
    }
}
