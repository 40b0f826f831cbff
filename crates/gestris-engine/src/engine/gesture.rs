use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The discrete input consumed by one frame of the game.
///
/// Whatever classifies the player's hand produces at most one of these per
/// frame; "no gesture" is [`Gesture::None`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Gesture {
    #[default]
    None = 0,
    Rotate = 1,
    MoveLeft = 2,
    MoveRight = 3,
}

impl Gesture {
    pub const ALL: [Self; 4] = [
        Gesture::None,
        Gesture::Rotate,
        Gesture::MoveLeft,
        Gesture::MoveRight,
    ];

    /// Returns the `snake_case` name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::Rotate => "rotate",
            Gesture::MoveLeft => "move_left",
            Gesture::MoveRight => "move_right",
        }
    }

    /// Returns the one-character symbol used in gesture scripts.
    ///
    /// # Examples
    ///
    /// ```
    /// use gestris_engine::Gesture;
    ///
    /// assert_eq!(Gesture::MoveLeft.as_char(), '<');
    /// assert_eq!(Gesture::from_char('^'), Some(Gesture::Rotate));
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Gesture::None => '.',
            Gesture::Rotate => '^',
            Gesture::MoveLeft => '<',
            Gesture::MoveRight => '>',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Gesture::None),
            '^' => Some(Gesture::Rotate),
            '<' => Some(Gesture::MoveLeft),
            '>' => Some(Gesture::MoveRight),
            _ => None,
        }
    }

    /// Inverse of `gesture as u8`.
    #[must_use]
    pub const fn from_repr(value: u8) -> Option<Self> {
        match value {
            0 => Some(Gesture::None),
            1 => Some(Gesture::Rotate),
            2 => Some(Gesture::MoveLeft),
            3 => Some(Gesture::MoveRight),
            _ => None,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown gesture: {name:?}")]
pub struct ParseGestureError {
    pub name: String,
}

impl FromStr for Gesture {
    type Err = ParseGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gesture::ALL
            .into_iter()
            .find(|gesture| gesture.as_str() == s)
            .ok_or_else(|| ParseGestureError { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(Gesture::default(), Gesture::None);
    }

    #[test]
    fn test_names() {
        for gesture in Gesture::ALL {
            assert_eq!(gesture.as_str().parse::<Gesture>(), Ok(gesture));
            assert_eq!(gesture.to_string(), gesture.as_str());
        }
        assert!("MoveLeft".parse::<Gesture>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Gesture::MoveRight).unwrap(),
            "\"move_right\""
        );
        assert_eq!(
            serde_json::from_str::<Gesture>("\"rotate\"").unwrap(),
            Gesture::Rotate
        );
        assert!(serde_json::from_str::<Gesture>("\"jump\"").is_err());
    }

    #[test]
    fn test_char_and_repr_conversion() {
        for gesture in Gesture::ALL {
            assert_eq!(Gesture::from_char(gesture.as_char()), Some(gesture));
            assert_eq!(Gesture::from_repr(gesture as u8), Some(gesture));
        }
        assert_eq!(Gesture::from_char('x'), None);
        assert_eq!(Gesture::from_repr(4), None);
    }
}
