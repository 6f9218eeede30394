/// Movement: advances head and tail by one cell per logic tick.
///
/// Processing order:
///   1. Stamp the cell the head is leaving (Straight, unless a turn already
///      stamped a Corner there) and adopt the pending heading
///   2. Step the head
///   3. Wall check
///   4. Content check (food grows, body kills)
///   5. Head marker on the new cell
///   6. Grow in place, or move the tail and re-read its heading from the glyph
///
/// Collisions are returned as outcomes. A tail landing on anything other than
/// a body segment means the grid no longer describes one snake; that is an error.

use crate::error::GameError;

use super::cell::Cell;
use super::grid::Grid;
use super::snake::Snake;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Continue { ate_food: bool, grew: bool },
    WallCollision,
    SelfCollision,
}

pub fn advance(snake: &mut Snake, grid: &mut Grid) -> Result<Outcome, GameError> {
    // 1. Leave a body glyph behind
    if !snake.turn_pending() {
        grid.set(snake.head.pos, Cell::straight(snake.head.heading));
    }
    snake.head.heading = snake.pending;
    if snake.tail.pos == snake.head.pos {
        // Single-cell body: the tail leaves this cell the way the head does.
        snake.tail.heading = snake.head.heading;
    }

    // 2–3. Step and bounds
    let next = snake.head.pos.step(snake.head.heading);
    let target = match grid.get(next) {
        Some(c) => c,
        None => return Ok(Outcome::WallCollision),
    };
    snake.head.pos = next;

    // 4. Content
    let ate_food = match target {
        Cell::Food => {
            snake.growth += 1;
            true
        }
        Cell::Empty => false,
        Cell::Straight(_) | Cell::Corner(_) | Cell::Head(_) => return Ok(Outcome::SelfCollision),
    };

    // 5. Head marker
    grid.set(next, Cell::Head(snake.head.heading));

    // 6. Growth or tail
    if snake.growth > 0 {
        snake.growth -= 1;
        snake.length += 1;
        return Ok(Outcome::Continue { ate_food, grew: true });
    }

    grid.set(snake.tail.pos, Cell::Empty);
    snake.tail.pos = snake.tail.pos.step(snake.tail.heading);
    snake.tail.heading = match grid.get(snake.tail.pos) {
        Some(Cell::Straight(_)) => snake.tail.heading,
        Some(Cell::Corner(kind)) => kind.redirect(snake.tail.heading),
        found => {
            return Err(GameError::CorruptGrid { pos: snake.tail.pos, found });
        }
    };

    Ok(Outcome::Continue { ate_food, grew: false })
}
