use crossterm::event::Event;
use gestris_engine::PieceSeed;
use gestris_input::GestureScript;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    fps: u32,
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(fps: u32, seed: Option<PieceSeed>, script: Option<GestureScript>) -> Self {
        Self {
            fps,
            screen: PlayScreen::new(seed, script),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(self.fps);
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        if self.screen.is_playing() {
            self.screen.update();
        }
    }
}
