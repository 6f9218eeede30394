/// Phase scheduling.
///
/// Phases alternate Animation, Logic, Animation, ... starting with Animation.
/// The next phase fires when a turn was just accepted, or when strictly more
/// than `1s / ((level + 1) * divisor)` has passed since the previous phase.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickKind {
    Animation,
    Logic,
}

impl TickKind {
    fn other(self) -> TickKind {
        match self {
            TickKind::Animation => TickKind::Logic,
            TickKind::Logic => TickKind::Animation,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameClock {
    last: Instant,
    next: TickKind,
    divisor: u32,
}

impl GameClock {
    pub fn new(now: Instant, divisor: u32) -> Self {
        GameClock { last: now, next: TickKind::Animation, divisor: divisor.max(1) }
    }

    /// Time allowed between phases at `level`.
    pub fn period(&self, level: u32) -> Duration {
        let per_second = level.saturating_add(1).saturating_mul(self.divisor);
        Duration::from_secs(1) / per_second
    }

    /// Returns the phase to run now, if any.
    pub fn poll(&mut self, now: Instant, level: u32, turn_accepted: bool) -> Option<TickKind> {
        let elapsed = now.saturating_duration_since(self.last);
        if !turn_accepted && elapsed <= self.period(level) {
            return None;
        }
        let kind = self.next;
        self.next = kind.other();
        self.last = now;
        Some(kind)
    }

    /// How long input may be awaited before the next timed phase.
    pub fn remaining(&self, now: Instant, level: u32) -> Duration {
        self.period(level)
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Restart the period, e.g. after a pause.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn period_shrinks_with_level() {
        let c = GameClock::new(Instant::now(), 5);
        assert_eq!(c.period(0), ms(200));
        assert_eq!(c.period(1), ms(100));
        assert_eq!(c.period(4), ms(40));
    }

    #[test]
    fn nothing_fires_at_exactly_the_period() {
        let t0 = Instant::now();
        let mut c = GameClock::new(t0, 5);
        assert_eq!(c.poll(t0 + ms(50), 1, false), None);
        assert_eq!(c.poll(t0 + ms(100), 1, false), None);
        assert_eq!(c.poll(t0 + ms(101), 1, false), Some(TickKind::Animation));
    }

    #[test]
    fn phases_alternate_starting_with_animation() {
        let t0 = Instant::now();
        let mut c = GameClock::new(t0, 5);
        let kinds: Vec<_> = (1..=4)
            .map(|i| c.poll(t0 + ms(101 * i), 1, false))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(TickKind::Animation),
                Some(TickKind::Logic),
                Some(TickKind::Animation),
                Some(TickKind::Logic)
            ]
        );
    }

    #[test]
    fn accepted_turn_fires_immediately() {
        let t0 = Instant::now();
        let mut c = GameClock::new(t0, 5);
        assert_eq!(c.poll(t0 + ms(1), 1, true), Some(TickKind::Animation));
        assert_eq!(c.poll(t0 + ms(2), 1, true), Some(TickKind::Logic));
        // the period restarts from the forced phase
        assert_eq!(c.poll(t0 + ms(100), 1, false), None);
    }

    #[test]
    fn remaining_counts_down_and_reset_restarts() {
        let t0 = Instant::now();
        let mut c = GameClock::new(t0, 5);
        assert_eq!(c.remaining(t0 + ms(30), 1), ms(70));
        assert_eq!(c.remaining(t0 + ms(500), 1), Duration::ZERO);

        c.reset(t0 + ms(500));
        assert_eq!(c.remaining(t0 + ms(500), 1), ms(100));
        assert_eq!(c.poll(t0 + ms(550), 1, false), None);
    }

    #[test]
    fn huge_level_does_not_overflow() {
        let c = GameClock::new(Instant::now(), u32::MAX);
        assert_eq!(c.period(u32::MAX), Duration::from_secs(1) / u32::MAX);
    }
}
