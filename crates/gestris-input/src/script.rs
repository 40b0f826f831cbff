use std::{fmt, str::FromStr};

use gestris_engine::Gesture;

/// A fixed sequence of per-frame gestures written as text.
///
/// Each gesture is one symbol: `.` none, `^` rotate, `<` move left, `>` move
/// right. A decimal count after a symbol repeats it, and whitespace is
/// ignored, so `"<3 .10 ^"` is three moves left, ten idle frames, and a
/// rotation.
///
/// # Example
///
/// ```
/// use gestris_engine::Gesture;
/// use gestris_input::GestureScript;
///
/// let script: GestureScript = "<2^ .".parse().unwrap();
/// assert_eq!(
///     script.gestures(),
///     [Gesture::MoveLeft, Gesture::MoveLeft, Gesture::Rotate, Gesture::None]
/// );
/// assert_eq!(script.to_string(), "<2^.");
///
/// let err = "<<x".parse::<GestureScript>().unwrap_err();
/// assert_eq!((err.position, err.found), (2, 'x'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureScript {
    gestures: Vec<Gesture>,
}

impl GestureScript {
    /// Largest repeat count accepted after a single symbol.
    pub const MAX_REPEAT: usize = 100_000;

    #[must_use]
    pub fn new(gestures: Vec<Gesture>) -> Self {
        Self { gestures }
    }

    #[must_use]
    pub fn gestures(&self) -> &[Gesture] {
        &self.gestures
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }
}

impl From<Vec<Gesture>> for GestureScript {
    fn from(gestures: Vec<Gesture>) -> Self {
        Self::new(gestures)
    }
}

impl IntoIterator for GestureScript {
    type Item = Gesture;
    type IntoIter = std::vec::IntoIter<Gesture>;

    fn into_iter(self) -> Self::IntoIter {
        self.gestures.into_iter()
    }
}

/// A gesture script contained a character that is neither a symbol, a
/// repeat count, nor whitespace, or a repeat count above
/// [`GestureScript::MAX_REPEAT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unexpected {found:?} at byte {position} in gesture script")]
pub struct ParseGestureScriptError {
    /// Byte offset of the offending character.
    pub position: usize,
    pub found: char,
}

impl FromStr for GestureScript {
    type Err = ParseGestureScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut gestures = vec![];
        let mut chars = s.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            if c.is_whitespace() {
                continue;
            }
            let gesture =
                Gesture::from_char(c).ok_or(ParseGestureScriptError { position, found: c })?;

            let mut count = None::<usize>;
            while let Some(&(digit_pos, d)) = chars.peek() {
                let Some(digit) = d.to_digit(10) else {
                    break;
                };
                chars.next();
                count = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .filter(|n| *n <= Self::MAX_REPEAT)
                    .map(Some)
                    .ok_or(ParseGestureScriptError {
                        position: digit_pos,
                        found: d,
                    })?;
            }

            gestures.extend(std::iter::repeat_n(gesture, count.unwrap_or(1)));
        }

        Ok(Self { gestures })
    }
}

/// Writes the script in its shortest form: runs longer than one symbol get a
/// count.
impl fmt::Display for GestureScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.gestures.as_slice();
        while let Some(&first) = rest.first() {
            let run = rest.iter().take_while(|g| **g == first).count();
            write!(f, "{}", first.as_char())?;
            if run > 1 {
                write!(f, "{run}")?;
            }
            rest = &rest[run..];
        }
        Ok(())
    }
}
