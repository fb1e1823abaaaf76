pub use self::{grid::*, moves::*, position::*};

pub(crate) mod grid;
pub(crate) mod moves;
pub(crate) mod position;
