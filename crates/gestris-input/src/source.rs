use gestris_engine::Gesture;
use tracing::debug;

use super::{latch::GestureLatch, script::GestureScript};

/// Non-blocking, per-frame gesture input.
///
/// Called exactly once per frame. When nothing new is available the source
/// returns [`Gesture::None`] instead of waiting.
pub trait GestureSource {
    fn next_gesture(&mut self) -> Gesture;
}

impl GestureSource for GestureLatch {
    fn next_gesture(&mut self) -> Gesture {
        self.take()
    }
}

impl<S> GestureSource for &mut S
where
    S: GestureSource + ?Sized,
{
    fn next_gesture(&mut self) -> Gesture {
        (**self).next_gesture()
    }
}

/// Plays back a [`GestureScript`], then yields [`Gesture::None`] forever.
#[derive(Debug, Clone)]
pub struct ScriptedGestures {
    gestures: std::vec::IntoIter<Gesture>,
    exhausted: bool,
}

impl ScriptedGestures {
    #[must_use]
    pub fn new(script: GestureScript) -> Self {
        Self {
            gestures: script.into_iter(),
            exhausted: false,
        }
    }

    /// Number of scripted gestures not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.gestures.len()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.gestures.len() == 0
    }
}

impl From<GestureScript> for ScriptedGestures {
    fn from(script: GestureScript) -> Self {
        Self::new(script)
    }
}

impl GestureSource for ScriptedGestures {
    fn next_gesture(&mut self) -> Gesture {
        if let Some(gesture) = self.gestures.next() {
            return gesture;
        }
        if !self.exhausted {
            self.exhausted = true;
            debug!("gesture script exhausted");
        }
        Gesture::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_gestures_then_none() {
        let script = "<^".parse::<GestureScript>().unwrap();
        let mut source = ScriptedGestures::new(script);
        assert_eq!(source.remaining(), 2);

        assert_eq!(source.next_gesture(), Gesture::MoveLeft);
        assert_eq!(source.next_gesture(), Gesture::Rotate);
        assert!(source.is_exhausted());
        for _ in 0..3 {
            assert_eq!(source.next_gesture(), Gesture::None);
        }
    }

    #[test]
    fn test_latch_as_source() {
        let mut latch = GestureLatch::new();
        latch.publish(Gesture::MoveRight);
        assert_eq!(latch.next_gesture(), Gesture::MoveRight);
        assert_eq!(latch.next_gesture(), Gesture::None);
    }

    #[test]
    fn test_source_by_mutable_reference() {
        fn first(mut source: impl GestureSource) -> Gesture {
            source.next_gesture()
        }
        let mut source = ScriptedGestures::from(GestureScript::new(vec![
            Gesture::Rotate,
            Gesture::MoveLeft,
        ]));
        assert_eq!(first(&mut source), Gesture::Rotate);
        assert_eq!(first(&mut source), Gesture::MoveLeft);
    }
}
