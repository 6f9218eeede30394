/// The playfield: a fixed W × H array of cells.
///
/// Interior only; the border belongs to the renderer. Positions are signed so
/// that a step off the edge is representable and can be bounds-checked.

use super::cell::Cell;
use super::direction::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    /// Neighbour one step in `dir`.
    pub fn step(self, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        Pos { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Cell at `pos`, or `None` off the grid.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Write a cell. Writes outside the grid are ignored.
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Row-major walk over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Pos::new((i % w) as i32, (i / w) as i32), c))
    }

    pub fn count(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|&&c| pred(c)).count()
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.iter().filter(|(_, c)| c.is_empty()).map(|(p, _)| p)
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }
}

// ── ASCII pictures for tests ──
//
// Same alphabet the renderer draws: ' ' empty, '@' food, '-' '|' straight,
// '/' forward corner, '\' back corner, head 'V' '^' '>' '<'.

#[cfg(test)]
impl Grid {
    pub fn from_picture(rows: &[&str]) -> Grid {
        use super::cell::{CornerKind, Orientation};

        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '@' => Cell::Food,
                    '-' => Cell::Straight(Orientation::Horizontal),
                    '|' => Cell::Straight(Orientation::Vertical),
                    '/' => Cell::Corner(CornerKind::ForwardDiagonal),
                    '\\' => Cell::Corner(CornerKind::BackDiagonal),
                    'V' => Cell::Head(Direction::Up),
                    '^' => Cell::Head(Direction::Down),
                    '>' => Cell::Head(Direction::Left),
                    '<' => Cell::Head(Direction::Right),
                    _ => Cell::Empty,
                };
                grid.set(Pos::new(x as i32, y as i32), cell);
            }
        }
        grid
    }
}
