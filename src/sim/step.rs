/// The logic step: advances the session by one tick.
///
/// Processing order:
///   1. Movement (head, collisions, growth, tail)
///   2. Food bookkeeping and spawning
///   3. Level update
///
/// A fatal outcome ends the session and skips 2 and 3.

use log::{debug, info};

use crate::domain::cell::Cell;
use crate::domain::movement::{self, Outcome};
use crate::error::GameError;

use super::event::GameEvent;
use super::ports::EndReason;
use super::session::{Phase, Session};

pub fn step(session: &mut Session) -> Result<Vec<GameEvent>, GameError> {
    if session.phase != Phase::Playing {
        return Ok(vec![]);
    }

    let mut events = Vec::new();
    session.tick += 1;

    if resolve_movement(session, &mut events)? {
        return Ok(events);
    }
    resolve_food(session, &mut events);
    resolve_level(session, &mut events);

    debug_assert_eq!(session.grid.count(Cell::is_body) as u64, session.snake.length);
    debug_assert_eq!(session.grid.count(Cell::is_food), session.food_count);

    Ok(events)
}

/// Returns true when the session just ended.
fn resolve_movement(session: &mut Session, events: &mut Vec<GameEvent>) -> Result<bool, GameError> {
    let reason = match movement::advance(&mut session.snake, &mut session.grid)? {
        Outcome::Continue { ate_food, grew } => {
            if ate_food {
                session.food_count = session.food_count.saturating_sub(1);
                events.push(GameEvent::FoodEaten { pos: session.snake.head.pos });
            }
            if grew {
                events.push(GameEvent::Grew { length: session.snake.length });
            }
            return Ok(false);
        }
        Outcome::WallCollision => EndReason::HitWall,
        Outcome::SelfCollision => EndReason::BitSelf,
    };

    info!(
        "session over after {} ticks: {:?}, length {}, level {}",
        session.tick,
        reason,
        session.snake.length,
        session.level()
    );
    session.phase = Phase::Over(reason);
    events.push(GameEvent::Crashed { reason });
    Ok(true)
}

fn resolve_food(session: &mut Session, events: &mut Vec<GameEvent>) {
    let spawned = session
        .food
        .try_spawn(&mut session.grid, &mut session.food_count, &mut session.rng);
    if let Some(pos) = spawned {
        debug!("food at ({}, {}), {} on grid", pos.x, pos.y, session.food_count);
        events.push(GameEvent::FoodSpawned { pos });
    }
}

fn resolve_level(session: &mut Session, events: &mut Vec<GameEvent>) {
    let before = session.level();
    let after = session.levels.update(session.snake.length);
    if after > before {
        info!("level {} at length {}", after, session.snake.length);
        events.push(GameEvent::LevelUp { level: after });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, GridConfig, RulesConfig};
    use crate::domain::direction::Direction;
    use crate::domain::grid::Pos;

    fn rules(level_up_length: u64, initial_growth: u64) -> RulesConfig {
        RulesConfig {
            food_rarity: 512,
            level_up_length,
            initial_growth,
            seed: Some(42),
        }
    }

    fn session_with(width: usize, height: usize, rules: RulesConfig) -> Session {
        Session::new(&GridConfig { width, height }, &rules)
    }

    fn body_cells(s: &Session) -> u64 {
        s.grid.count(Cell::is_body) as u64
    }

    #[test]
    fn first_step_grows_and_spawns_food() {
        let cfg = GameConfig::default();
        let mut s = Session::new(&cfg.grid, &cfg.rules);

        let events = step(&mut s).unwrap();

        assert_eq!(s.tick, 1);
        assert_eq!(s.snake.length, 2);
        assert_eq!(s.snake.growth, 3);
        assert_eq!(s.food_count, 1);
        assert!(events.contains(&GameEvent::Grew { length: 2 }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::FoodSpawned { .. })));
        assert_eq!(body_cells(&s), s.snake.length);
    }

    #[test]
    fn food_count_tracks_grid_and_cap() {
        let cfg = GameConfig::default();
        let mut s = Session::new(&cfg.grid, &cfg.rules);
        // one lap of a wide rectangle: long, and never fatal
        let plan = [
            (Direction::Right, 30),
            (Direction::Down, 8),
            (Direction::Left, 30),
            (Direction::Up, 8),
        ];
        for (dir, n) in plan {
            s.turn(dir);
            for _ in 0..n {
                step(&mut s).unwrap();
                assert_eq!(s.phase, Phase::Playing);
                assert_eq!(s.grid.count(Cell::is_food), s.food_count);
                assert!(s.food_count <= s.food.cap());
                assert_eq!(body_cells(&s), s.snake.length);
            }
        }
        assert_eq!(s.snake.head.pos, Pos::new(39, 11));
    }

    #[test]
    fn wall_ends_session_with_crash_event() {
        // 5 wide: spawn at x=2 heading right, wall after two steps
        let mut s = session_with(5, 3, rules(50, 4));
        assert_eq!(s.snake.head.pos, Pos::new(2, 1));

        step(&mut s).unwrap();
        step(&mut s).unwrap();
        let events = step(&mut s).unwrap();

        assert_eq!(s.phase, Phase::Over(EndReason::HitWall));
        assert_eq!(events, vec![GameEvent::Crashed { reason: EndReason::HitWall }]);
        assert_eq!(s.snake.head.pos, Pos::new(4, 1));

        // further steps are inert
        assert!(step(&mut s).unwrap().is_empty());
        assert_eq!(s.tick, 3);
    }

    #[test]
    fn self_bite_ends_session() {
        let mut s = session_with(20, 20, rules(50, 8));
        for _ in 0..3 {
            step(&mut s).unwrap();
        }
        s.turn(Direction::Up);
        step(&mut s).unwrap();
        s.turn(Direction::Left);
        step(&mut s).unwrap();
        s.turn(Direction::Down);
        let events = step(&mut s).unwrap();

        assert_eq!(s.phase, Phase::Over(EndReason::BitSelf));
        assert_eq!(events.last(), Some(&GameEvent::Crashed { reason: EndReason::BitSelf }));
    }

    #[test]
    fn eating_food_decrements_count() {
        let mut s = session_with(20, 5, rules(50, 1));
        let ahead = s.snake.head.pos.step(Direction::Right);
        s.grid.set(ahead, Cell::Food);
        s.food_count = 1;

        let events = step(&mut s).unwrap();

        assert!(events.contains(&GameEvent::FoodEaten { pos: ahead }));
        assert_eq!(s.snake.growth, 1);
        assert_eq!(s.grid.count(Cell::is_food), s.food_count);
    }

    #[test]
    fn level_up_event_once_per_multiple() {
        // level every 3 cells; initial growth carries length 1 -> 7
        let mut s = session_with(30, 5, rules(3, 6));
        let mut levels = vec![];
        for _ in 0..8 {
            for e in step(&mut s).unwrap() {
                if let GameEvent::LevelUp { level } = e {
                    levels.push((s.snake.length, level));
                }
            }
        }
        assert_eq!(&levels[..2], &[(3, 2), (6, 3)]);
        assert_eq!(s.level() as u64, 1 + s.snake.length / 3);
    }
}
