/// Collaborators the session loop talks to.
///
/// The terminal implementations live in `ui`; tests drive the loop with
/// scripted fakes.

use std::io;
use std::time::{Duration, Instant};

use crate::domain::direction::Direction;
use crate::domain::grid::Grid;
use crate::domain::snake::DirectedPoint;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Pause,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EndReason {
    HitWall,
    BitSelf,
    /// Player asked to leave.
    Quit,
}

impl EndReason {
    pub fn message(self) -> &'static str {
        match self {
            EndReason::HitWall => "You hit a wall. Game over!",
            EndReason::BitSelf => "You bit yourself. Game over!",
            EndReason::Quit => "Game abandoned.",
        }
    }
}

/// Everything needed to paint a full frame.
#[derive(Clone, Copy, Debug)]
pub struct FullView<'a> {
    pub grid: &'a Grid,
    pub length: u64,
    pub level: u32,
    pub paused: bool,
}

/// In-between frame: only head and tail cells change appearance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AnimationHint {
    pub head: DirectedPoint,
    pub tail: DirectedPoint,
}

pub trait InputSource {
    /// Block until input arrives or `timeout` passes.
    fn wait(&mut self, timeout: Duration) -> io::Result<()>;
    fn poll_direction(&mut self) -> Option<Direction>;
    fn poll_command(&mut self) -> Option<Command>;
}

pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

pub trait Screen {
    fn draw_full(&mut self, view: FullView<'_>) -> io::Result<()>;
    fn draw_animation(&mut self, hint: AnimationHint) -> io::Result<()>;
}

pub trait SessionEnd {
    /// Show the end of the game and hold until the player acknowledges it.
    fn session_ended(&mut self, reason: EndReason, view: FullView<'_>) -> io::Result<()>;
}
