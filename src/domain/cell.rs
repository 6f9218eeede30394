/// Cell types and their properties.
///
/// The snake body is not stored anywhere else: every occupied cell carries
/// a glyph saying how the body passes through it, and the tail follows those
/// glyphs. Properties are queried via methods so cell semantics live here.

use super::direction::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Orientation of a straight segment travelled in `heading`.
    pub fn of(heading: Direction) -> Orientation {
        if heading.is_vertical() {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

/// A 90° bend in the body.
///
/// `ForwardDiagonal` pairs Up↔Right and Down↔Left,
/// `BackDiagonal` pairs Up↔Left and Down↔Right.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CornerKind {
    ForwardDiagonal,
    BackDiagonal,
}

impl CornerKind {
    /// Corner left behind when the head turns from `from` to `to`.
    /// `None` unless the two headings are perpendicular.
    pub fn for_turn(from: Direction, to: Direction) -> Option<CornerKind> {
        use Direction::*;
        match (from, to) {
            (Right, Up) | (Left, Down) | (Up, Right) | (Down, Left) => Some(CornerKind::ForwardDiagonal),
            (Left, Up) | (Right, Down) | (Up, Left) | (Down, Right) => Some(CornerKind::BackDiagonal),
            _ => None,
        }
    }

    /// Heading after passing through this corner while travelling `heading`.
    pub fn redirect(self, heading: Direction) -> Direction {
        use Direction::*;
        match (self, heading) {
            (CornerKind::ForwardDiagonal, Up) => Right,
            (CornerKind::ForwardDiagonal, Right) => Up,
            (CornerKind::ForwardDiagonal, Down) => Left,
            (CornerKind::ForwardDiagonal, Left) => Down,
            (CornerKind::BackDiagonal, Up) => Left,
            (CornerKind::BackDiagonal, Left) => Up,
            (CornerKind::BackDiagonal, Down) => Right,
            (CornerKind::BackDiagonal, Right) => Down,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Food,
    Straight(Orientation),
    Corner(CornerKind),
    /// Current head position; replaced by a Straight or Corner when the head leaves.
    Head(Direction),
}

impl Cell {
    /// Straight segment for a head leaving this cell in `heading`.
    pub fn straight(heading: Direction) -> Cell {
        Cell::Straight(Orientation::of(heading))
    }

    /// Does this cell belong to the snake?
    pub fn is_body(self) -> bool {
        matches!(self, Cell::Straight(_) | Cell::Corner(_) | Cell::Head(_))
    }

    pub fn is_food(self) -> bool {
        matches!(self, Cell::Food)
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}
