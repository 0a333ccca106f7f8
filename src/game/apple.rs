use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use super::state::Position;

/// Pick a uniformly random tile that no snake segment covers.
///
/// Returns `None` when the occupied set covers the whole grid; the caller
/// decides what a full board means (it never gets an invalid coordinate).
pub fn random_free_tile<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
        .filter(|pos| !occupied.contains(pos))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_free_tile_avoids_occupied_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: HashSet<Position> = (0..4).map(|x| Position::new(x, 0)).collect();

        for _ in 0..100 {
            let pos = random_free_tile(&mut rng, 4, 4, &occupied).unwrap();
            assert!(!occupied.contains(&pos));
            assert!(pos.x >= 0 && pos.x < 4);
            assert!(pos.y >= 0 && pos.y < 4);
        }
    }

    #[test]
    fn test_single_free_tile_is_always_chosen() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut occupied = HashSet::new();
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 2) {
                    occupied.insert(Position::new(x, y));
                }
            }
        }

        assert_eq!(
            random_free_tile(&mut rng, 3, 3, &occupied),
            Some(Position::new(1, 2))
        );
    }

    #[test]
    fn test_full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: HashSet<Position> = (0..3)
            .flat_map(|y| (0..3).map(move |x| Position::new(x, y)))
            .collect();

        assert_eq!(random_free_tile(&mut rng, 3, 3, &occupied), None);
    }
}
