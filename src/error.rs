/// Fatal errors. Collisions are ordinary outcomes and do not live here.

use std::io;

use thiserror::Error;

use crate::domain::cell::Cell;
use crate::domain::grid::Pos;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The tail walked onto something that is not a body segment.
    #[error("corrupt playfield: tail reached ({}, {}) holding {found:?}", pos.x, pos.y)]
    CorruptGrid { pos: Pos, found: Option<Cell> },
}
