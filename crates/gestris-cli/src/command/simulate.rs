use std::path::PathBuf;

use chrono::{DateTime, Utc};
use gestris_engine::{
    Board, GameSession, GameStats, Piece, PieceSeed, PieceSource, RandomPieceSource, SessionState,
};
use gestris_input::{GestureScript, GestureSource, ScriptedGestures};
use rand::Rng as _;
use serde::Serialize;
use tracing::info;

use crate::util::ReportSink;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece sequence seed (32 hex digits); random if omitted
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
    /// Gestures to play, one symbol per frame: `.` none, `^` rotate, `<` left,
    /// `>` right, optionally followed by a repeat count (e.g. `<4^.10`)
    #[clap(long)]
    pub(super) gestures: Option<GestureScript>,
    /// Stop after this many frames if the game is not over yet
    #[clap(long, default_value_t = 10_000)]
    pub(super) max_frames: u64,
    /// Write the report here instead of stdout
    #[clap(long)]
    pub(super) output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    frames: u64,
    state: SessionState,
    stats: GameStats,
    board: Board,
    active_piece: Piece,
    finished_at: DateTime<Utc>,
}

impl SimulationReport {
    fn new(seed: PieceSeed, session: &GameSession) -> Self {
        Self {
            seed,
            frames: session.stats().frames(),
            state: session.state(),
            stats: *session.stats(),
            board: session.board().clone(),
            active_piece: *session.active_piece(),
            finished_at: Utc::now(),
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        gestures,
        max_frames,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut session = GameSession::new(RandomPieceSource::with_seed(seed));
    let mut gestures = ScriptedGestures::new(gestures.clone().unwrap_or_default());
    info!(%seed, max_frames, "starting simulation");

    simulate(&mut session, &mut gestures, *max_frames);
    info!(
        frames = session.stats().frames(),
        state = ?session.state(),
        "simulation finished"
    );

    ReportSink::from(output.clone()).write_json(&SimulationReport::new(seed, &session))
}

/// Ticks `session` with one gesture per frame until game over or until
/// `max_frames` frames have run.
fn simulate<S, G>(session: &mut GameSession<S>, gestures: &mut G, max_frames: u64)
where
    S: PieceSource,
    G: GestureSource,
{
    while session.state().is_playing() && session.stats().frames() < max_frames {
        session.tick(gestures.next_gesture());
    }
}
