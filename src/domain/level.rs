/// Difficulty level derived from snake length.
///
/// One level per positive multiple of `step` reached. The latch keeps a
/// length that sits on a multiple for several ticks from counting twice.

#[derive(Clone, Copy, Debug)]
pub struct LevelTracker {
    level: u32,
    step: u64,
    latched: bool,
}

impl LevelTracker {
    pub fn new(step: u64) -> Self {
        LevelTracker { level: 1, step: step.max(1), latched: false }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Feed the current length; returns the (possibly raised) level.
    pub fn update(&mut self, length: u64) -> u32 {
        if length > 0 && length % self.step == 0 {
            if !self.latched {
                self.level += 1;
                self.latched = true;
            }
        } else {
            self.latched = false;
        }
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        assert_eq!(LevelTracker::new(50).level(), 1);
    }

    #[test]
    fn levels_up_on_the_tick_length_hits_a_multiple() {
        let mut t = LevelTracker::new(50);
        assert_eq!(t.update(49), 1);
        assert_eq!(t.update(50), 2);
    }

    #[test]
    fn latch_blocks_repeat_at_same_length() {
        let mut t = LevelTracker::new(50);
        t.update(49);
        assert_eq!(t.update(50), 2);
        assert_eq!(t.update(50), 2);
        assert_eq!(t.update(51), 2);
    }

    #[test]
    fn monotonic_over_a_long_growth() {
        let mut t = LevelTracker::new(50);
        let mut last = t.level();
        for length in 1..=260u64 {
            let level = t.update(length);
            assert!(level >= last);
            assert!(level - last <= 1);
            last = level;
            assert_eq!(level as u64, 1 + length / 50);
        }
        assert_eq!(last, 6);
    }

    #[test]
    fn jumping_past_a_multiple_does_not_count_it() {
        let mut t = LevelTracker::new(10);
        t.update(9);
        assert_eq!(t.update(11), 1);
        assert_eq!(t.update(20), 2);
    }
}
