/// Turn validation, truth-table driven.
///
/// A request is compared with the heading the head is executing right now
/// (not with a turn already queued for the next step).
///
/// ┌───────────────────────────┬──────────┬──────────────────────────────┐
/// │ Requested                 │ Result   │ Side effect                  │
/// ├───────────────────────────┼──────────┼──────────────────────────────┤
/// │ == head.heading           │ ACCEPT   │ none                         │
/// │ == opposite(head.heading) │ REJECT   │ none                         │
/// │ perpendicular             │ ACCEPT   │ pending = requested,         │
/// │                           │          │ head cell = Corner(kind)     │
/// └───────────────────────────┴──────────┴──────────────────────────────┘
///
/// Corner kinds (see `CornerKind::for_turn`):
///   Right→Up, Left→Down, Up→Right, Down→Left   ForwardDiagonal
///   Left→Up, Right→Down, Up→Left, Down→Right   BackDiagonal

use super::cell::{Cell, CornerKind};
use super::direction::Direction;
use super::grid::Grid;
use super::snake::Snake;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnResult {
    /// Already heading that way.
    Unchanged,
    /// Perpendicular turn queued; the head cell now holds this corner.
    Turned(CornerKind),
    /// Reversal into the body.
    Rejected,
}

impl TurnResult {
    pub fn accepted(self) -> bool {
        !matches!(self, TurnResult::Rejected)
    }
}

pub fn request_turn(snake: &mut Snake, grid: &mut Grid, dir: Direction) -> TurnResult {
    let current = snake.head.heading;

    if dir == current {
        return TurnResult::Unchanged;
    }
    if dir == current.opposite() {
        return TurnResult::Rejected;
    }

    let kind = match CornerKind::for_turn(current, dir) {
        Some(k) => k,
        None => return TurnResult::Rejected,
    };
    snake.pending = dir;
    grid.set(snake.head.pos, Cell::Corner(kind));
    TurnResult::Turned(kind)
}
