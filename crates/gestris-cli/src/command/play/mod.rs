use gestris_engine::PieceSeed;
use gestris_input::GestureScript;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Frames per second; one gesture is read and gravity applied per frame
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=60))]
    fps: u32,
    /// Piece sequence seed (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Play this gesture script instead of reading the keyboard
    #[clap(long)]
    script: Option<GestureScript>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            fps: 10,
            seed: None,
            script: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { fps, seed, script } = arg;

    let mut app = PlayApp::new(*fps, *seed, script.clone());
    Tui::new().run(&mut app)
}
