use std::time::Duration;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many frames per second [`App::update`] is called.
    pub fn set_frame_rate(&mut self, fps: u32) {
        let interval = (fps > 0).then(|| Duration::from_secs(1) / fps);
        self.events.set_frame_interval(interval);
    }

    /// Runs `app` until [`App::should_exit`] returns true.
    ///
    /// The terminal is restored on return, including on error.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Frame => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
