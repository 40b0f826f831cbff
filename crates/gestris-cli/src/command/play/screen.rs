use crossterm::event::{Event, KeyCode, KeyEventKind};
use gestris_engine::{GameSession, Gesture, PieceSeed, RandomPieceSource};
use gestris_input::{GestureLatch, GestureScript, GestureSource, ScriptedGestures};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};
use tracing::info;

use crate::ui::widgets::{SessionDisplay, style};

/// Where the per-frame gesture comes from.
#[derive(Debug)]
enum Input {
    /// Arrow keys stand in for hand gestures and are latched until the next
    /// frame.
    Keyboard(GestureLatch),
    Script(ScriptedGestures),
}

impl GestureSource for Input {
    fn next_gesture(&mut self) -> Gesture {
        match self {
            Input::Keyboard(latch) => latch.next_gesture(),
            Input::Script(script) => script.next_gesture(),
        }
    }
}

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    input: Input,
    fixed_seed: Option<PieceSeed>,
    script: Option<GestureScript>,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(fixed_seed: Option<PieceSeed>, script: Option<GestureScript>) -> Self {
        Self {
            session: new_session(fixed_seed),
            input: new_input(script.as_ref()),
            fixed_seed,
            script,
            is_exiting: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        !self.is_exiting && self.session.state().is_playing()
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    fn seed(&self) -> PieceSeed {
        self.session.field().source().seed()
    }

    /// Starts over with a new game. A `--seed` replays the same pieces.
    fn restart(&mut self) {
        self.session = new_session(self.fixed_seed);
        self.input = new_input(self.script.as_ref());
        info!(seed = %self.seed(), "new game");
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session).seed(self.seed());
        let help_text = match (&self.input, self.session.state().is_playing()) {
            (Input::Keyboard(_), true) => {
                "Controls: ← → (Move) | ↑ Space (Rotate) | Q Esc (Quit)"
            }
            (Input::Script(_), true) => "Playing script | Q Esc (Quit)",
            (_, false) => "Controls: R (New Game) | Q Esc (Quit)",
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind == KeyEventKind::Release {
            return;
        }

        let is_playing = self.is_playing();
        let gesture = match event.code {
            KeyCode::Left => Gesture::MoveLeft,
            KeyCode::Right => Gesture::MoveRight,
            KeyCode::Up | KeyCode::Char(' ') => Gesture::Rotate,
            KeyCode::Char('r') if !is_playing => {
                self.restart();
                return;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.is_exiting = true;
                return;
            }
            _ => return,
        };
        if let Input::Keyboard(latch) = &self.input
            && is_playing
        {
            latch.publish(gesture);
        }
    }

    pub fn update(&mut self) {
        let gesture = self.input.next_gesture();
        self.session.tick(gesture);
    }
}

fn new_session(fixed_seed: Option<PieceSeed>) -> GameSession {
    let source = fixed_seed.map_or_else(RandomPieceSource::new, RandomPieceSource::with_seed);
    GameSession::new(source)
}

fn new_input(script: Option<&GestureScript>) -> Input {
    match script {
        Some(script) => Input::Script(ScriptedGestures::new(script.clone())),
        None => Input::Keyboard(GestureLatch::new()),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_keys_are_latched_until_next_frame() {
        let seed = PieceSeed::from_bytes([5; 16]);
        let mut screen = PlayScreen::new(Some(seed), None);
        assert_eq!(screen.seed(), seed);

        screen.handle_event(&key(KeyCode::Left));
        screen.handle_event(&key(KeyCode::Up));
        screen.update();
        assert_eq!(screen.session.last_gesture(), Gesture::Rotate);

        screen.update();
        assert_eq!(screen.session.last_gesture(), Gesture::None);
        assert_eq!(screen.session.stats().frames(), 2);
    }

    #[test]
    fn test_script_input_ignores_arrow_keys() {
        let script = "<>".parse::<GestureScript>().unwrap();
        let mut screen = PlayScreen::new(None, Some(script));

        screen.handle_event(&key(KeyCode::Up));
        screen.update();
        assert_eq!(screen.session.last_gesture(), Gesture::MoveLeft);
        screen.update();
        assert_eq!(screen.session.last_gesture(), Gesture::MoveRight);
    }

    #[test]
    fn test_quit_and_restart() {
        let seed = PieceSeed::from_bytes([8; 16]);
        let mut screen = PlayScreen::new(Some(seed), None);

        // Restart is only offered after game over.
        screen.update();
        screen.handle_event(&key(KeyCode::Char('r')));
        assert_eq!(screen.session.stats().frames(), 1);

        while screen.is_playing() {
            screen.update();
        }
        assert!(screen.session.state().is_game_over());
        screen.handle_event(&key(KeyCode::Char('r')));
        assert!(screen.is_playing());
        assert_eq!(screen.session.stats().frames(), 0);
        assert_eq!(screen.seed(), seed);

        screen.handle_event(&key(KeyCode::Esc));
        assert!(screen.is_exiting());
        assert!(!screen.is_playing());
    }
}
