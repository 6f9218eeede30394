/// Events emitted during a session.
/// The presentation layer consumes these for sound and logging.

use crate::domain::cell::CornerKind;
use crate::domain::direction::Direction;
use crate::domain::grid::Pos;

use super::ports::EndReason;

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    /// A turn request was accepted. `corner` is `None` for a same-direction request.
    TurnAccepted { dir: Direction, corner: Option<CornerKind> },
    FoodEaten { pos: Pos },
    FoodSpawned { pos: Pos },
    Grew { length: u64 },
    LevelUp { level: u32 },
    Crashed { reason: EndReason },
}
