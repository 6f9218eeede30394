/// The snake: two directed endpoints and a pair of counters.
///
/// Everything between head and tail is read back from the grid.

use super::cell::Cell;
use super::direction::Direction;
use super::grid::{Grid, Pos};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DirectedPoint {
    pub pos: Pos,
    pub heading: Direction,
}

#[derive(Clone, Debug)]
pub struct Snake {
    /// Heading is the one actually being executed.
    pub head: DirectedPoint,
    /// Consumed by the next head advance. Equals `head.heading` when no turn is queued.
    pub pending: Direction,
    /// Heading is the direction the tail moves next.
    pub tail: DirectedPoint,
    /// Occupied cells. Never decreases.
    pub length: u64,
    /// Tail advances still to be skipped.
    pub growth: u64,
}

impl Snake {
    /// Place a length-1 snake at the grid centre, heading right,
    /// and mark its head on the grid.
    pub fn spawn(grid: &mut Grid, initial_growth: u64) -> Snake {
        let centre = Pos::new((grid.width() / 2) as i32, (grid.height() / 2) as i32);
        let start = DirectedPoint { pos: centre, heading: Direction::Right };
        grid.set(centre, Cell::Head(Direction::Right));

        Snake {
            head: start,
            pending: Direction::Right,
            tail: start,
            length: 1,
            growth: initial_growth,
        }
    }

    pub fn turn_pending(&self) -> bool {
        self.pending != self.head.heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_centres_and_marks_head() {
        let mut g = Grid::new(78, 22);
        let s = Snake::spawn(&mut g, 4);
        assert_eq!(s.head.pos, Pos::new(39, 11));
        assert_eq!(s.tail, s.head);
        assert_eq!(s.head.heading, Direction::Right);
        assert_eq!(s.length, 1);
        assert_eq!(s.growth, 4);
        assert!(!s.turn_pending());
        assert_eq!(g.get(s.head.pos), Some(Cell::Head(Direction::Right)));
        assert_eq!(g.count(Cell::is_body), 1);
    }
}
