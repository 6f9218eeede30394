/// Entry point: config, logging, terminal setup and the session loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::File;

use log::{error, info, warn};
use simplelog::{Config, WriteLogger};

use config::GameConfig;
use error::GameError;
use sim::ports::{EndReason, SystemClock};
use sim::runner::{run_session, Collaborators};
use sim::session::Session;
use ui::gamepad::Gamepad;
use ui::input::Controls;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

fn main() {
    let config = GameConfig::load();
    init_logging(&config);

    for w in &config.warnings {
        eprintln!("Warning: {w}");
        warn!("config: {w}");
    }
    info!(
        "starting: grid {}x{}, food rarity {}, level every {}, initial growth {}, tick divisor {}, seed {:?}",
        config.grid.width,
        config.grid.height,
        config.rules.food_rarity,
        config.rules.level_up_length,
        config.rules.initial_growth,
        config.speed.tick_divisor,
        config.rules.seed,
    );

    let mut session = Session::new(&config.grid, &config.rules);
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = if config.general.sound { SoundEngine::new() } else { None };

    let result = game_loop(&mut session, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(reason) => println!("{}", reason.message()),
        Err(e) => {
            error!("{e}");
            eprintln!("Game error: {e}");
        }
    }
    println!("Final length: {}  Level: {}", session.snake.length, session.level());
}

/// Log to a file; the terminal belongs to the renderer. Runs without a
/// logger if the file cannot be created.
fn init_logging(config: &GameConfig) {
    let path = &config.general.log_file;
    match File::create(path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(config.general.log_level, Config::default(), file) {
                eprintln!("Warning: logger already set: {e}");
            }
        }
        Err(e) => eprintln!("Warning: could not create {}: {e}", path.display()),
    }
}

fn game_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<EndReason, GameError> {
    let gamepad = Gamepad::new(&config.gamepad);
    info!("gamepad connected: {}", gamepad.connected);
    let mut input = Controls::new(gamepad);

    run_session(
        session,
        Collaborators { input: &mut input, clock: &SystemClock, screen: renderer },
        config.speed.tick_divisor,
        |events| {
            if let Some(sfx) = sound {
                sfx.handle(events);
            }
        },
    )
}
