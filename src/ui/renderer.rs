/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of ScreenCell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Layout: `#` border around the playfield, status line under the bottom
/// border. Animation frames reuse the grid of the last full frame and only
/// restyle the head and tail cells.

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::cell::{Cell, CornerKind, Orientation};
use crate::domain::direction::Direction;
use crate::domain::grid::{Grid, Pos};
use crate::sim::ports::{AnimationHint, EndReason, FullView, Screen, SessionEnd};

// ── ScreenCell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct ScreenCell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl ScreenCell {
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: ScreenCell = ScreenCell { ch: ' ', fg: Color::White, bg: ScreenCell::BASE_BG };

    /// Sentinel used to invalidate the back buffer so every position is diffed.
    const INVALID: ScreenCell = ScreenCell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color) -> Self {
        ScreenCell { ch, fg, bg: Self::BASE_BG }
    }
}

// ── FrameBuffer: a 2D grid of ScreenCells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<ScreenCell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![ScreenCell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![ScreenCell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(ScreenCell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: ScreenCell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> ScreenCell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            ScreenCell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width {
                break;
            }
            self.set(x + i, y, ScreenCell::new(ch, fg));
        }
    }

    #[cfg(test)]
    fn row_text(&self, y: usize) -> String {
        (0..self.width).map(|x| self.get(x, y).ch).collect()
    }
}

// ── Glyphs ──

const BORDER: char = '#';
const BORDER_FG: Color = Color::Rgb { r: 110, g: 110, b: 130 };
const BODY_FG: Color = Color::Rgb { r: 80, g: 220, b: 100 };
const HEAD_FG: Color = Color::Rgb { r: 180, g: 255, b: 140 };
const FOOD_FG: Color = Color::Rgb { r: 255, g: 90, b: 70 };
const TEXT_FG: Color = Color::White;
const ALERT_FG: Color = Color::Rgb { r: 255, g: 220, b: 50 };

pub fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => ' ',
        Cell::Food => '@',
        Cell::Straight(Orientation::Horizontal) => '-',
        Cell::Straight(Orientation::Vertical) => '|',
        Cell::Corner(CornerKind::ForwardDiagonal) => '/',
        Cell::Corner(CornerKind::BackDiagonal) => '\\',
        Cell::Head(Direction::Up) => 'V',
        Cell::Head(Direction::Down) => '^',
        Cell::Head(Direction::Left) => '>',
        Cell::Head(Direction::Right) => '<',
    }
}

fn color(cell: Cell) -> Color {
    match cell {
        Cell::Food => FOOD_FG,
        Cell::Head(_) => HEAD_FG,
        _ => BODY_FG,
    }
}

/// Playfield cell (x, y) lands at terminal (x + 1, y + 1), inside the border.
const FIELD_ORIGIN: usize = 1;

fn status_line(length: u64, level: u32) -> String {
    format!("Length: {:5}    Level: {:3}", length, level)
}

/// Border, playfield and status line.
fn compose_field(buf: &mut FrameBuffer, grid: &Grid, length: u64, level: u32) {
    let w = grid.width();
    let h = grid.height();
    let border = ScreenCell::new(BORDER, BORDER_FG);

    for x in 0..w + 2 {
        buf.set(x, 0, border);
        buf.set(x, h + 1, border);
    }
    for y in 1..=h {
        buf.set(0, y, border);
        buf.set(w + 1, y, border);
    }

    for (pos, cell) in grid.iter() {
        if cell.is_empty() {
            continue;
        }
        put_cell(buf, pos, ScreenCell::new(glyph(cell), color(cell)));
    }

    buf.put_str(0, h + 2, &status_line(length, level), TEXT_FG);
}

fn put_cell(buf: &mut FrameBuffer, pos: Pos, cell: ScreenCell) {
    if pos.x >= 0 && pos.y >= 0 {
        buf.set(pos.x as usize + FIELD_ORIGIN, pos.y as usize + FIELD_ORIGIN, cell);
    }
}

/// Head drawn as the straight segment it will leave behind; a tail sitting
/// on a corner drawn straight along the way it is about to leave.
fn compose_animation(buf: &mut FrameBuffer, grid: &Grid, hint: AnimationHint) {
    let head = Cell::straight(hint.head.heading);
    put_cell(buf, hint.head.pos, ScreenCell::new(glyph(head), BODY_FG));

    if !matches!(grid.get(hint.tail.pos), Some(Cell::Straight(_))) {
        let tail = Cell::straight(hint.tail.heading);
        put_cell(buf, hint.tail.pos, ScreenCell::new(glyph(tail), BODY_FG));
    }
}

/// Centered lines over the playfield.
fn compose_banner(buf: &mut FrameBuffer, grid: &Grid, lines: &[(String, Color)]) {
    let box_w = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) + 4;
    let box_h = lines.len() + 2;
    let field_w = grid.width() + 2;
    let field_h = grid.height() + 2;
    let x0 = field_w.saturating_sub(box_w) / 2;
    let y0 = field_h.saturating_sub(box_h) / 2;

    for y in y0..y0 + box_h {
        for x in x0..x0 + box_w {
            buf.set(x, y, ScreenCell::BLANK);
        }
    }
    for (i, (line, fg)) in lines.iter().enumerate() {
        let x = x0 + (box_w - line.chars().count()) / 2;
        buf.put_str(x, y0 + 1 + i, line, *fg);
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    /// Grid and counters of the last full frame.
    last_grid: Option<Grid>,
    last_length: u64,
    last_level: u32,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_grid: None,
            last_length: 0,
            last_level: 1,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(ScreenCell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.back.cells.fill(ScreenCell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Compose a frame with `f` and push the changed cells to the terminal.
    fn present(&mut self, f: impl FnOnce(&mut FrameBuffer)) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(ScreenCell::INVALID);
            queue!(self.writer, SetBackgroundColor(ScreenCell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        f(&mut self.front);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = ScreenCell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    /// Block until a key is pressed. Keys already queued are discarded first.
    fn wait_for_key(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(());
                }
            }
        }
    }
}

impl Screen for Renderer {
    fn draw_full(&mut self, view: FullView<'_>) -> io::Result<()> {
        self.last_grid = Some(view.grid.clone());
        self.last_length = view.length;
        self.last_level = view.level;

        self.present(|buf| {
            compose_field(buf, view.grid, view.length, view.level);
            if view.paused {
                compose_banner(
                    buf,
                    view.grid,
                    &[
                        ("PAUSED".to_string(), ALERT_FG),
                        ("p / F1 to resume".to_string(), TEXT_FG),
                    ],
                );
            }
        })
    }

    fn draw_animation(&mut self, hint: AnimationHint) -> io::Result<()> {
        let grid = match self.last_grid.take() {
            Some(g) => g,
            None => return Ok(()),
        };
        let (length, level) = (self.last_length, self.last_level);
        let result = self.present(|buf| {
            compose_field(buf, &grid, length, level);
            compose_animation(buf, &grid, hint);
        });
        self.last_grid = Some(grid);
        result
    }
}

impl SessionEnd for Renderer {
    fn session_ended(&mut self, reason: EndReason, view: FullView<'_>) -> io::Result<()> {
        self.present(|buf| {
            compose_field(buf, view.grid, view.length, view.level);
            compose_banner(
                buf,
                view.grid,
                &[
                    (reason.message().to_string(), ALERT_FG),
                    (status_line(view.length, view.level), TEXT_FG),
                    ("Press any key to exit".to_string(), TEXT_FG),
                ],
            );
        })?;
        self.wait_for_key()
    }
}
