/// Food placement.
///
/// At most `area / rarity + 1` food cells are outstanding at once. Placement
/// probes random cells first (cheap while the grid is mostly empty), and
/// after `area` misses samples straight from the remaining empty cells, so a
/// crowded grid still terminates.

use rand::seq::IteratorRandom;
use rand::Rng;

use super::cell::Cell;
use super::grid::{Grid, Pos};

/// Spawns only while the count is strictly below the cap. A `count <= cap`
/// check would let the count reach `cap + 1` and break the density bound.
#[derive(Clone, Copy, Debug)]
pub struct FoodSpawner {
    cap: usize,
}

impl FoodSpawner {
    pub fn new(grid: &Grid, rarity: usize) -> Self {
        FoodSpawner { cap: grid.area() / rarity.max(1) + 1 }
    }

    /// Most food cells allowed on the grid at once.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Place one food if below the cap. Updates `food_count` and returns
    /// where the food went.
    pub fn try_spawn<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        food_count: &mut usize,
        rng: &mut R,
    ) -> Option<Pos> {
        if *food_count >= self.cap || grid.area() == 0 {
            return None;
        }

        let pos = probe(grid, rng).or_else(|| grid.empty_cells().choose(rng))?;
        grid.set(pos, Cell::Food);
        *food_count += 1;
        Some(pos)
    }
}

fn probe<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Pos> {
    for _ in 0..grid.area() {
        let pos = Pos::new(
            rng.gen_range(0..grid.width()) as i32,
            rng.gen_range(0..grid.height()) as i32,
        );
        if grid.get(pos) == Some(Cell::Empty) {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cap_follows_rarity() {
        assert_eq!(FoodSpawner::new(&Grid::new(78, 22), 512).cap(), 4);
        assert_eq!(FoodSpawner::new(&Grid::new(10, 10), 512).cap(), 1);
        assert_eq!(FoodSpawner::new(&Grid::new(10, 10), 10).cap(), 11);
    }

    #[test]
    fn count_never_exceeds_cap() {
        let mut g = Grid::new(78, 22);
        let spawner = FoodSpawner::new(&g, 512);
        let mut rng = StdRng::seed_from_u64(7);
        let mut count = 0;

        for _ in 0..100 {
            spawner.try_spawn(&mut g, &mut count, &mut rng);
            assert!(count <= spawner.cap());
            assert_eq!(g.count(Cell::is_food), count);
        }
        assert_eq!(count, spawner.cap());
    }

    #[test]
    fn no_spawn_once_at_cap() {
        let mut g = Grid::new(78, 22);
        let spawner = FoodSpawner::new(&g, 512);
        let mut rng = StdRng::seed_from_u64(3);
        let mut count = spawner.cap();

        assert_eq!(spawner.try_spawn(&mut g, &mut count, &mut rng), None);
        assert_eq!(count, spawner.cap());
        assert_eq!(g.count(Cell::is_food), 0);
    }

    #[test]
    fn only_lands_on_empty_cells() {
        let mut g = Grid::from_picture(&["----", "-- -", "----"]);
        let spawner = FoodSpawner::new(&g, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let mut count = 0;

        assert_eq!(spawner.try_spawn(&mut g, &mut count, &mut rng), Some(Pos::new(2, 1)));
        assert_eq!(g.get(Pos::new(2, 1)), Some(Cell::Food));
        assert_eq!(count, 1);
    }

    #[test]
    fn full_grid_is_a_no_op() {
        let mut g = Grid::from_picture(&["--", "-<"]);
        let before = g.clone();
        let spawner = FoodSpawner::new(&g, 1);
        let mut rng = StdRng::seed_from_u64(3);
        let mut count = 0;

        assert_eq!(spawner.try_spawn(&mut g, &mut count, &mut rng), None);
        assert_eq!(count, 0);
        assert_eq!(g, before);
    }

    #[test]
    fn eaten_food_makes_room_again() {
        let mut g = Grid::new(10, 10);
        let spawner = FoodSpawner::new(&g, 512);
        let mut rng = StdRng::seed_from_u64(11);
        let mut count = 0;

        let first = spawner.try_spawn(&mut g, &mut count, &mut rng).unwrap();
        assert_eq!(spawner.try_spawn(&mut g, &mut count, &mut rng), None);

        g.set(first, Cell::Head(crate::domain::direction::Direction::Right));
        count -= 1;
        assert!(spawner.try_spawn(&mut g, &mut count, &mut rng).is_some());
        assert_eq!(count, 1);
    }
}
