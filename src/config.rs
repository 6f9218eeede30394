/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the current
/// directory, or `$HOME/.config/gridsnake`. Missing files and missing keys
/// fall back to defaults; out-of-range values are clamped and reported in
/// `GameConfig::warnings` so they can be logged once the logger is up.

use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

const MIN_GRID_SIDE: usize = 3;
const MAX_GRID_SIDE: usize = 1000;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub rules: RulesConfig,
    pub speed: SpeedConfig,
    pub gamepad: GamepadConfig,
    pub general: GeneralConfig,
    /// Values that had to be corrected while loading.
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug)]
pub struct RulesConfig {
    /// One food allowed per this many cells (plus one).
    pub food_rarity: usize,
    /// A level is gained each time length hits a multiple of this.
    pub level_up_length: u64,
    /// Growth queued before the first step.
    pub initial_growth: u64,
    /// Fixed seed for food placement; random when absent.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    /// Phases per second at level 0 (phase period = 1s / ((level+1) * divisor)).
    pub tick_divisor: u32,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub pause: Vec<String>,
    pub quit: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct GeneralConfig {
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub sound: bool,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    rules: TomlRules,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlGrid {
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
}

#[derive(Deserialize, Debug)]
struct TomlRules {
    #[serde(default = "default_food_rarity")]
    food_rarity: usize,
    #[serde(default = "default_level_up_length")]
    level_up_length: u64,
    #[serde(default = "default_initial_growth")]
    initial_growth: u64,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_divisor")]
    tick_divisor: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_pause")]
    pause: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_sound")]
    sound: bool,
}

// ── Defaults ──

fn default_width() -> usize { 78 }
fn default_height() -> usize { 22 }
fn default_food_rarity() -> usize { 512 }
fn default_level_up_length() -> u64 { 50 }
fn default_initial_growth() -> u64 { 4 }
fn default_tick_divisor() -> u32 { 5 }

fn default_pause() -> Vec<String> { vec!["Start".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }
fn default_log_file() -> String { "gridsnake.log".into() }
fn default_log_level() -> String { "info".into() }
fn default_sound() -> bool { true }

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid { width: default_width(), height: default_height() }
    }
}

impl Default for TomlRules {
    fn default() -> Self {
        TomlRules {
            food_rarity: default_food_rarity(),
            level_up_length: default_level_up_length(),
            initial_growth: default_initial_growth(),
            seed: None,
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_divisor: default_tick_divisor() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad { pause: default_pause(), quit: default_quit() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            log_file: default_log_file(),
            log_level: default_log_level(),
            sound: default_sound(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`, first match in `candidate_dirs()`.
    pub fn load() -> Self {
        GameConfig::from_toml(load_toml(&candidate_dirs()))
    }

    /// Parse a config document directly.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from_toml)
    }

    fn from_toml(t: TomlConfig) -> Self {
        let mut warnings = Vec::new();

        let width = clamp_side("grid.width", t.grid.width, &mut warnings);
        let height = clamp_side("grid.height", t.grid.height, &mut warnings);
        let food_rarity = at_least_one("rules.food_rarity", t.rules.food_rarity as u64, &mut warnings) as usize;
        let level_up_length = at_least_one("rules.level_up_length", t.rules.level_up_length, &mut warnings);
        let initial_growth = at_least_one("rules.initial_growth", t.rules.initial_growth, &mut warnings);
        let tick_divisor = at_least_one("speed.tick_divisor", t.speed.tick_divisor as u64, &mut warnings) as u32;

        let log_level = match LevelFilter::from_str(t.general.log_level.trim()) {
            Ok(level) => level,
            Err(_) => {
                warnings.push(format!(
                    "general.log_level {:?} is not a log level, using info",
                    t.general.log_level
                ));
                LevelFilter::Info
            }
        };

        GameConfig {
            grid: GridConfig { width, height },
            rules: RulesConfig {
                food_rarity,
                level_up_length,
                initial_growth,
                seed: t.rules.seed,
            },
            speed: SpeedConfig { tick_divisor },
            gamepad: GamepadConfig {
                pause: t.gamepad.pause,
                quit: t.gamepad.quit,
            },
            general: GeneralConfig {
                log_file: PathBuf::from(t.general.log_file),
                log_level,
                sound: t.general.sound,
            },
            warnings,
        }
    }
}

fn clamp_side(key: &str, value: usize, warnings: &mut Vec<String>) -> usize {
    let clamped = value.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE);
    if clamped != value {
        warnings.push(format!("{key} = {value} is out of range, using {clamped}"));
    }
    clamped
}

fn at_least_one(key: &str, value: u64, warnings: &mut Vec<String>) -> u64 {
    if value == 0 {
        warnings.push(format!("{key} must be at least 1, using 1"));
        1
    } else {
        value
    }
}

/// Candidate directories to search: exe dir, CWD, then the user config dir.
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. ~/.config/gridsnake
    if let Ok(home) = std::env::var("HOME") {
        let user = PathBuf::from(&home).join(".config/gridsnake");
        if user.is_dir() && !dirs.iter().any(|d| d == &user) {
            dirs.push(user);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
