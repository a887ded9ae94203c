use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::state::Position;

/// Picks random empty cells for food
pub struct FoodPlacer {
    rng: StdRng,
}

impl FoodPlacer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic placer for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn food at a random empty position
    ///
    /// Samples uniformly until a cell outside `body` turns up. Returns `None`
    /// when the body covers every cell, since sampling would never finish.
    pub fn place(&mut self, body: &[Position], board_size: usize) -> Option<Position> {
        if body.len() >= board_size * board_size {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..board_size) as i32;
            let y = self.rng.gen_range(0..board_size) as i32;
            let pos = Position::new(x, y);

            if !body.contains(&pos) {
                return Some(pos);
            }
        }
    }
}

impl Default for FoodPlacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_is_in_bounds_and_off_body() {
        let mut placer = FoodPlacer::with_seed(7);
        let body: Vec<Position> = (0..10).map(|x| Position::new(x, 0)).collect();

        for _ in 0..500 {
            let food = placer.place(&body, 10).unwrap();
            assert!((0..10).contains(&food.x));
            assert!((1..10).contains(&food.y));
        }
    }

    #[test]
    fn test_finds_the_last_free_cell() {
        let mut placer = FoodPlacer::with_seed(3);
        let mut body = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                if (x, y) != (2, 3) {
                    body.push(Position::new(x, y));
                }
            }
        }

        assert_eq!(placer.place(&body, 4), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_full_board_has_no_food() {
        let mut placer = FoodPlacer::with_seed(1);
        let body: Vec<Position> = (0..2)
            .flat_map(|y| (0..2).map(move |x| Position::new(x, y)))
            .collect();

        assert_eq!(placer.place(&body, 2), None);
    }

    #[test]
    fn test_same_seed_same_food() {
        let body = [Position::new(0, 0)];
        let mut a = FoodPlacer::with_seed(42);
        let mut b = FoodPlacer::with_seed(42);

        for _ in 0..20 {
            assert_eq!(a.place(&body, 20), b.place(&body, 20));
        }
    }
}
