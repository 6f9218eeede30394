/// Session loop.
///
/// Single-threaded: wait for input (bounded by the time left until the next
/// phase), apply commands, feed at most one direction to the turn validator,
/// then let the clock decide whether an animation or a logic phase runs.
/// A quit request is honoured at the top of the next iteration, so a phase
/// that has started always completes.

use std::time::Duration;

use log::{debug, info};

use crate::error::GameError;

use super::clock::{GameClock, TickKind};
use super::event::GameEvent;
use super::ports::{Clock, Command, EndReason, InputSource, Screen, SessionEnd};
use super::session::{Phase, Session};
use super::step::step;

/// Input wait while paused; nothing is scheduled so any value works.
const PAUSE_WAIT: Duration = Duration::from_millis(250);

/// The screen also hosts the end-of-session prompt.
pub struct Collaborators<'a, I, C, S> {
    pub input: &'a mut I,
    pub clock: &'a C,
    pub screen: &'a mut S,
}

/// Run until the snake crashes or the player quits.
///
/// `on_events` sees every event as it happens (sound, logging).
pub fn run_session<I, C, S, F>(
    session: &mut Session,
    io: Collaborators<'_, I, C, S>,
    tick_divisor: u32,
    mut on_events: F,
) -> Result<EndReason, GameError>
where
    I: InputSource,
    C: Clock,
    S: Screen + SessionEnd,
    F: FnMut(&[GameEvent]),
{
    let Collaborators { input, clock, screen } = io;
    let mut timer = GameClock::new(clock.now(), tick_divisor);
    let mut shutdown = false;

    screen.draw_full(session.view())?;

    loop {
        if shutdown {
            info!("quit after {} ticks, length {}", session.tick, session.snake.length);
            return Ok(EndReason::Quit);
        }

        let timeout = if session.paused {
            PAUSE_WAIT
        } else {
            timer.remaining(clock.now(), session.level())
        };
        input.wait(timeout)?;

        while let Some(cmd) = input.poll_command() {
            match cmd {
                Command::Quit => shutdown = true,
                Command::Pause => {
                    session.paused = !session.paused;
                    if !session.paused {
                        timer.reset(clock.now());
                    }
                    debug!("paused: {}", session.paused);
                    screen.draw_full(session.view())?;
                }
            }
        }
        if shutdown {
            continue;
        }

        if session.paused {
            // Keys pressed while paused are dropped.
            while input.poll_direction().is_some() {}
            continue;
        }

        let mut turned = false;
        if let Some(dir) = input.poll_direction() {
            if let Some(event) = session.turn(dir) {
                debug!("{:?}", event);
                turned = true;
                on_events(std::slice::from_ref(&event));
            }
        }

        match timer.poll(clock.now(), session.level(), turned) {
            Some(TickKind::Animation) => screen.draw_animation(session.hint())?,
            Some(TickKind::Logic) => {
                let events = step(session)?;
                on_events(&events);
                screen.draw_full(session.view())?;
                if let Phase::Over(reason) = session.phase {
                    screen.session_ended(reason, session.view())?;
                    return Ok(reason);
                }
            }
            None => {}
        }
    }
}
