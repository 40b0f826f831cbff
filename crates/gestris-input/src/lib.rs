//! Gesture input plumbing between whatever recognizes gestures and the frame
//! loop.
//!
//! - [`GestureLatch`] - a shared cell holding the most recent gesture, written
//!   by a producer and taken once per frame
//! - [`GestureSource`] - the per-frame, non-blocking read the frame loop uses
//! - [`GestureScript`] / [`ScriptedGestures`] - a fixed gesture sequence parsed
//!   from text, for replays and headless runs
//!
//! # Example
//!
//! ```
//! use gestris_engine::Gesture;
//! use gestris_input::{GestureLatch, GestureSource as _};
//!
//! let mut latch = GestureLatch::new();
//! let producer = latch.clone();
//!
//! producer.publish(Gesture::MoveLeft);
//! producer.publish(Gesture::Rotate);
//!
//! // Latest wins, and a gesture is only seen once.
//! assert_eq!(latch.next_gesture(), Gesture::Rotate);
//! assert_eq!(latch.next_gesture(), Gesture::None);
//! ```

pub use self::{latch::*, script::*, source::*};

mod latch;
mod script;
mod source;
