pub use self::{board::*, collision::*, color::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod collision;
pub(crate) mod color;
pub(crate) mod piece;
pub(crate) mod shape;
