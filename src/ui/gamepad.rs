/// Gamepad input using gilrs.
///
/// Directions fire on the press edge of the D-pad or when the left stick
/// crosses the deadzone. Pause and quit buttons come from config.toml.
/// Default mapping:
///   D-pad / Left Stick    →  Direction
///   Start                 →  Pause
///   Select                →  Quit

use std::collections::VecDeque;

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::direction::Direction;
use crate::sim::ports::Command;

const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,
    B,
    X,
    Y,
    L1,
    R1,
    L2,
    R2,
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER" => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "L2" | "LT" | "LEFTTRIGGER2" => Some(Btn::L2),
            "R2" | "RT" | "RIGHTTRIGGER2" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::LeftTrigger2 => Some(Btn::L2),
            Button::RightTrigger2 => Some(Btn::R2),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Command-to-button mapping (loaded from config).
#[derive(Debug, PartialEq, Eq)]
struct ActionMap {
    pause: Vec<Btn>,
    quit: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap { pause: vec![Btn::Start], quit: vec![Btn::Select] }
    }
}

impl ActionMap {
    /// Unknown names are skipped; an empty result keeps the default.
    fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter().filter_map(|s| Btn::from_name(s)).collect()
        }
        let mut map = ActionMap::default();
        let pause = parse_list(&cfg.pause);
        if !pause.is_empty() {
            map.pause = pause;
        }
        let quit = parse_list(&cfg.quit);
        if !quit.is_empty() {
            map.quit = quit;
        }
        map
    }

    fn command_for(&self, btn: Btn) -> Option<Command> {
        if self.quit.contains(&btn) {
            Some(Command::Quit)
        } else if self.pause.contains(&btn) {
            Some(Command::Pause)
        } else {
            None
        }
    }
}

/// Turns analog stick motion into one direction per deadzone crossing.
#[derive(Clone, Copy, Debug, Default)]
struct StickEdges {
    x: f32,
    y: f32,
    held: Option<Direction>,
}

impl StickEdges {
    /// Y is positive upwards, as gilrs reports it.
    fn update(&mut self, x: f32, y: f32) -> Option<Direction> {
        self.x = x;
        self.y = y;
        let now = if self.x.abs() >= self.y.abs() {
            if self.x < -STICK_DEADZONE {
                Some(Direction::Left)
            } else if self.x > STICK_DEADZONE {
                Some(Direction::Right)
            } else {
                None
            }
        } else if self.y > STICK_DEADZONE {
            Some(Direction::Up)
        } else if self.y < -STICK_DEADZONE {
            Some(Direction::Down)
        } else {
            None
        };

        let fresh = now.filter(|d| self.held != Some(*d));
        self.held = now;
        fresh
    }
}

pub struct Gamepad {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,
    stick: StickEdges,
    action_map: ActionMap,
    dirs: VecDeque<Direction>,
    cmds: VecDeque<Command>,
    pub connected: bool,
}

impl Gamepad {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                log::warn!("gamepad support unavailable: {e}");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        Gamepad {
            #[cfg(feature = "gamepad")]
            gilrs,
            stick: StickEdges::default(),
            action_map: ActionMap::from_config(cfg),
            dirs: VecDeque::new(),
            cmds: VecDeque::new(),
            connected,
        }
    }

    /// Whether polling can ever produce input.
    pub fn available(&self) -> bool {
        #[cfg(feature = "gamepad")]
        {
            self.gilrs.is_some()
        }
        #[cfg(not(feature = "gamepad"))]
        {
            false
        }
    }

    /// Drain pending gamepad events into the direction and command queues.
    pub fn update(&mut self) {
        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };
        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.press(btn);
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    let (x, y) = match axis {
                        Axis::LeftStickX => (value, self.stick.y),
                        Axis::LeftStickY => (self.stick.x, value),
                        _ => continue,
                    };
                    if let Some(dir) = self.stick.update(x, y) {
                        self.dirs.push_back(dir);
                    }
                }
                EventType::Connected => self.connected = true,
                EventType::Disconnected => {
                    self.connected = false;
                    self.stick = StickEdges::default();
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn press(&mut self, btn: Button) {
        let dir = match btn {
            Button::DPadUp => Some(Direction::Up),
            Button::DPadDown => Some(Direction::Down),
            Button::DPadLeft => Some(Direction::Left),
            Button::DPadRight => Some(Direction::Right),
            _ => None,
        };
        if let Some(dir) = dir {
            self.dirs.push_back(dir);
            return;
        }
        if let Some(cmd) = Btn::from_gilrs(btn).and_then(|b| self.action_map.command_for(b)) {
            self.cmds.push_back(cmd);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.dirs.is_empty() || !self.cmds.is_empty()
    }

    pub fn take_direction(&mut self) -> Option<Direction> {
        self.dirs.pop_front()
    }

    pub fn take_command(&mut self) -> Option<Command> {
        self.cmds.pop_front()
    }
}
