use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The next frame is due.
    Frame,
    /// Something changed since the last draw.
    Render,
    Crossterm(CrosstermEvent),
}
