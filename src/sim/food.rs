//! Food placement
//!
//! Rejection sampling over the board, bounded by [`MAX_FOOD_ATTEMPTS`]. Once the
//! budget is spent the free cells are enumerated and one is picked uniformly, so
//! the result stays uniform and the work stays bounded even on a crowded board.

use rand::Rng;

use super::state::Cell;
use crate::consts::*;

/// Random samples tried before falling back to enumerating free cells
pub const MAX_FOOD_ATTEMPTS: u32 = 64;

/// Pick a uniformly random unoccupied cell, or `None` if the board is full
pub fn place_food<'a, I, R>(occupied: I, rng: &mut R) -> Option<Cell>
where
    I: IntoIterator<Item = &'a Cell>,
    I::IntoIter: Clone,
    R: Rng,
{
    let occupied = occupied.into_iter();
    let is_free = |cell: &Cell| !occupied.clone().any(|c| c == cell);

    for _ in 0..MAX_FOOD_ATTEMPTS {
        let cell = Cell::new(
            rng.random_range(0..BOARD_SIZE),
            rng.random_range(0..BOARD_SIZE),
        );
        if is_free(&cell) {
            return Some(cell);
        }
    }

    let mut free = Vec::with_capacity(BOARD_CELLS);
    free.extend(
        (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|cell| is_free(cell)),
    );

    if free.is_empty() {
        log::debug!("No free cell left for food");
        return None;
    }
    log::debug!(
        "Food sampling budget spent, choosing among {} free cells",
        free.len()
    );
    Some(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn all_cells() -> Vec<Cell> {
        (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Cell::new(x, y)))
            .collect()
    }

    #[test]
    fn test_food_avoids_snake() {
        let mut rng = Pcg32::seed_from_u64(42);
        let snake = vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)];
        for _ in 0..500 {
            let food = place_food(&snake, &mut rng).unwrap();
            assert!(food.in_bounds());
            assert!(!snake.contains(&food));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let mut rng = Pcg32::seed_from_u64(3);
        let hole = Cell::new(13, 6);
        let occupied: Vec<Cell> = all_cells().into_iter().filter(|c| *c != hole).collect();
        assert_eq!(place_food(&occupied, &mut rng), Some(hole));
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut rng = Pcg32::seed_from_u64(3);
        let occupied = all_cells();
        assert_eq!(place_food(&occupied, &mut rng), None);
    }

    #[test]
    fn test_same_seed_same_food() {
        let snake = vec![Cell::new(1, 1)];
        let a = place_food(&snake, &mut Pcg32::seed_from_u64(99));
        let b = place_food(&snake, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
