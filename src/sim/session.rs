/// Session: the complete state of one running game.
///
/// Owns the grid, the snake and all bookkeeping. Mutated only by turn
/// requests and by the logic step; everything else reads it through
/// `view()` and `hint()`.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GridConfig, RulesConfig};
use crate::domain::direction::Direction;
use crate::domain::food::FoodSpawner;
use crate::domain::grid::Grid;
use crate::domain::level::LevelTracker;
use crate::domain::snake::Snake;
use crate::domain::turn::{request_turn, TurnResult};

use super::event::GameEvent;
use super::ports::{AnimationHint, EndReason, FullView};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Over(EndReason),
}

pub struct Session {
    pub grid: Grid,
    pub snake: Snake,
    pub food_count: usize,
    pub food: FoodSpawner,
    pub levels: LevelTracker,
    pub rng: StdRng,
    /// Logic steps taken.
    pub tick: u64,
    pub paused: bool,
    pub phase: Phase,
}

impl Session {
    pub fn new(grid_cfg: &GridConfig, rules: &RulesConfig) -> Self {
        let rng = match rules.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut grid = Grid::new(grid_cfg.width, grid_cfg.height);
        let snake = Snake::spawn(&mut grid, rules.initial_growth);
        let food = FoodSpawner::new(&grid, rules.food_rarity);

        Session {
            grid,
            snake,
            food_count: 0,
            food,
            levels: LevelTracker::new(rules.level_up_length),
            rng,
            tick: 0,
            paused: false,
            phase: Phase::Playing,
        }
    }

    pub fn level(&self) -> u32 {
        self.levels.level()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    /// Forward a direction request to the turn validator.
    /// Returns the event to report when it was accepted.
    pub fn turn(&mut self, dir: Direction) -> Option<GameEvent> {
        if self.is_over() {
            return None;
        }
        let result = request_turn(&mut self.snake, &mut self.grid, dir);
        if !result.accepted() {
            return None;
        }
        let corner = match result {
            TurnResult::Turned(kind) => Some(kind),
            _ => None,
        };
        Some(GameEvent::TurnAccepted { dir, corner })
    }

    pub fn view(&self) -> FullView<'_> {
        FullView {
            grid: &self.grid,
            length: self.snake.length,
            level: self.level(),
            paused: self.paused,
        }
    }

    pub fn hint(&self) -> AnimationHint {
        AnimationHint { head: self.snake.head, tail: self.snake.tail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::cell::{Cell, CornerKind};
    use crate::domain::grid::Pos;

    fn session() -> Session {
        let cfg = GameConfig::default();
        Session::new(&cfg.grid, &cfg.rules)
    }

    #[test]
    fn new_session_matches_start_state() {
        let s = session();
        assert_eq!(s.grid.width(), 78);
        assert_eq!(s.grid.height(), 22);
        assert_eq!(s.snake.head.pos, Pos::new(39, 11));
        assert_eq!(s.snake.growth, 4);
        assert_eq!(s.level(), 1);
        assert_eq!(s.food_count, 0);
        assert_eq!(s.food.cap(), 4);
        assert_eq!(s.phase, Phase::Playing);
    }

    #[test]
    fn turn_reports_only_accepted_requests() {
        let mut s = session();
        assert_eq!(
            s.turn(Direction::Right),
            Some(GameEvent::TurnAccepted { dir: Direction::Right, corner: None })
        );
        assert_eq!(s.turn(Direction::Left), None);
        assert_eq!(
            s.turn(Direction::Up),
            Some(GameEvent::TurnAccepted {
                dir: Direction::Up,
                corner: Some(CornerKind::ForwardDiagonal)
            })
        );
        assert_eq!(s.grid.get(s.snake.head.pos), Some(Cell::Corner(CornerKind::ForwardDiagonal)));
    }

    #[test]
    fn no_turns_after_game_over() {
        let mut s = session();
        s.phase = Phase::Over(EndReason::HitWall);
        assert_eq!(s.turn(Direction::Up), None);
        assert_eq!(s.snake.pending, Direction::Right);
    }

    #[test]
    fn view_and_hint_mirror_state() {
        let mut s = session();
        s.paused = true;
        let v = s.view();
        assert_eq!(v.length, 1);
        assert_eq!(v.level, 1);
        assert!(v.paused);
        assert_eq!(s.hint().head, s.snake.head);
        assert_eq!(s.hint().tail, s.snake.tail);
    }
}
