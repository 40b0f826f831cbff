use clap::{Parser, Subcommand};

use crate::logging::{self, Fallback, LogArg};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    log: LogArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal, with keys standing in for hand gestures
    Play(#[clap(flatten)] PlayArg),
    /// Run a game headless from a gesture script and print a JSON report
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => {
            logging::init(&args.log, Fallback::Discard)?;
            play::run(&arg)?;
        }
        Mode::Simulate(arg) => {
            logging::init(&args.log, Fallback::Stderr)?;
            simulate::run(&arg)?;
        }
    }
    Ok(())
}
