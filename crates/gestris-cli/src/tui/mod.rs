//! Frame-locked terminal runtime.
//!
//! [`Tui::run`] drives an [`App`]: one [`App::update`] per frame at a fixed
//! rate, terminal events delivered as they arrive in between, and a redraw
//! whenever either changed something.

pub use self::{app::App, runner::Tui};

mod app;
mod event;
mod event_loop;
mod runner;
