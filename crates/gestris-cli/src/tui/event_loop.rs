use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;
use tracing::debug;

use crate::tui::event::TuiEvent;

/// Schedules frames at a fixed interval and interleaves terminal events.
///
/// Frames never burst: if the loop falls more than one interval behind, the
/// missed frames are dropped and the schedule restarts from now.
#[derive(Debug)]
pub(super) struct EventLoop {
    frame_interval: Option<Duration>,
    next_frame: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a loop with no frame interval; only terminal events and
    /// renders are produced until one is set.
    pub(super) fn new() -> Self {
        Self {
            frame_interval: None,
            next_frame: Instant::now(),
            dirty: true,
        }
    }

    pub(super) fn set_frame_interval(&mut self, interval: Option<Duration>) {
        self.frame_interval = interval;
        self.next_frame = Instant::now() + interval.unwrap_or_default();
    }

    /// Blocks until a frame is due, a render is needed, or a terminal event
    /// arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.frame_interval
                && now >= self.next_frame
            {
                self.next_frame = next_frame_after(self.next_frame, interval, now);
                self.dirty = true;
                return Ok(TuiEvent::Frame);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if self.frame_interval.is_some() {
                let timeout = self.next_frame.saturating_duration_since(now);
                if !event::poll(timeout)? {
                    continue;
                }
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}

fn next_frame_after(scheduled: Instant, interval: Duration, now: Instant) -> Instant {
    let next = scheduled + interval;
    if next > now {
        return next;
    }
    let behind = now.duration_since(scheduled);
    debug!(?behind, "frame loop fell behind, dropping missed frames");
    now + interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_frame_keeps_schedule() {
        let start = Instant::now();
        let interval = Duration::from_millis(100);
        let now = start + Duration::from_millis(30);
        assert_eq!(next_frame_after(start, interval, now), start + interval);
    }

    #[test]
    fn test_next_frame_drops_missed_frames() {
        let start = Instant::now();
        let interval = Duration::from_millis(100);
        let now = start + Duration::from_millis(350);
        assert_eq!(next_frame_after(start, interval, now), now + interval);
    }

    #[test]
    fn test_first_event_is_render() {
        // No interval and a dirty initial state: no terminal access needed.
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());
    }
}
