/// Keyboard and combined input.
///
/// Key presses are translated into queued directions and commands.
/// Release events are ignored; only press and repeat count.
///
///   Arrows / WASD      →  Direction
///   p / F1             →  Pause
///   q / Esc / Ctrl+C   →  Quit

use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::direction::Direction;
use crate::sim::ports::{Command, InputSource};

use super::gamepad::Gamepad;

/// Longest single keyboard wait while a gamepad is present, so pad input
/// is not held back by a long phase period.
const GAMEPAD_SLICE: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    Turn(Direction),
    Do(Command),
}

pub fn map_key(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyAction::Do(Command::Quit)),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::F(1) => KeyAction::Do(Command::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Do(Command::Quit),
        _ => return None,
    };
    Some(action)
}

pub struct Keyboard {
    dirs: VecDeque<Direction>,
    cmds: VecDeque<Command>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard { dirs: VecDeque::with_capacity(8), cmds: VecDeque::with_capacity(4) }
    }

    fn push(&mut self, key: &KeyEvent) {
        match map_key(key) {
            Some(KeyAction::Turn(dir)) => self.dirs.push_back(dir),
            Some(KeyAction::Do(cmd)) => self.cmds.push_back(cmd),
            None => {}
        }
    }

    /// Wait up to `timeout` for a terminal event, then drain everything
    /// already available without blocking. Returns at once while earlier
    /// keys are still queued.
    fn wait(&mut self, timeout: Duration) -> io::Result<()> {
        if self.has_pending() {
            return Ok(());
        }
        if !event::poll(timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.push(&key);
            }
        }
        Ok(())
    }

    fn has_pending(&self) -> bool {
        !self.dirs.is_empty() || !self.cmds.is_empty()
    }
}

/// Keyboard plus optional gamepad, as one input source.
pub struct Controls {
    keyboard: Keyboard,
    gamepad: Gamepad,
}

impl Controls {
    pub fn new(gamepad: Gamepad) -> Self {
        Controls { keyboard: Keyboard::new(), gamepad }
    }
}

impl InputSource for Controls {
    fn wait(&mut self, timeout: Duration) -> io::Result<()> {
        if !self.gamepad.available() {
            return self.keyboard.wait(timeout);
        }

        let deadline = Instant::now() + timeout;
        loop {
            self.gamepad.update();
            if self.gamepad.has_pending() || self.keyboard.has_pending() {
                return Ok(());
            }
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Ok(());
            }
            self.keyboard.wait(left.min(GAMEPAD_SLICE))?;
        }
    }

    fn poll_direction(&mut self) -> Option<Direction> {
        self.keyboard.dirs.pop_front().or_else(|| self.gamepad.take_direction())
    }

    fn poll_command(&mut self) -> Option<Command> {
        self.keyboard.cmds.pop_front().or_else(|| self.gamepad.take_command())
    }
}
