//! Shuffle selection without repetition
//!
//! Picks the next playlist index at random from the indices not yet played in
//! the current cycle. Once every index has been played the cycle restarts, so
//! the last track of one cycle may also open the next.

use crate::error::{PlaybackError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Random next-track selector
#[derive(Debug, Clone)]
pub struct ShuffleSelector {
    rng: StdRng,
}

impl ShuffleSelector {
    /// Create a selector seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a selector with a fixed seed (reproducible order)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector from an optional seed
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Pick the next index
    ///
    /// Clears `played` first when it already covers the whole playlist. Does not
    /// mark the returned index as played; the caller owns that bookkeeping.
    pub fn select_next(&mut self, track_count: usize, played: &mut HashSet<usize>) -> Result<usize> {
        if track_count == 0 {
            return Err(PlaybackError::EmptyPlaylist);
        }

        // Indices from a previous, longer playlist don't count toward coverage
        played.retain(|&index| index < track_count);

        if played.len() >= track_count {
            tracing::debug!(track_count, "All tracks played, resetting shuffle");
            played.clear();
        }

        let available: Vec<usize> = (0..track_count)
            .filter(|index| !played.contains(index))
            .collect();

        let choice = available[self.rng.gen_range(0..available.len())];
        Ok(choice)
    }
}

impl Default for ShuffleSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_cycle(selector: &mut ShuffleSelector, count: usize, played: &mut HashSet<usize>) -> Vec<usize> {
        (0..count)
            .map(|_| {
                let index = selector.select_next(count, played).unwrap();
                played.insert(index);
                index
            })
            .collect()
    }

    #[test]
    fn empty_playlist_is_an_error() {
        let mut selector = ShuffleSelector::with_seed(1);
        let mut played = HashSet::new();
        assert!(matches!(
            selector.select_next(0, &mut played),
            Err(PlaybackError::EmptyPlaylist)
        ));
    }

    #[test]
    fn single_track_always_returns_zero() {
        let mut selector = ShuffleSelector::with_seed(7);
        let mut played = HashSet::new();

        for _ in 0..10 {
            let index = selector.select_next(1, &mut played).unwrap();
            assert_eq!(index, 0);
            played.insert(index);
        }
        assert_eq!(played.len(), 1);
    }

    #[test]
    fn full_cycle_visits_every_index_once() {
        let mut selector = ShuffleSelector::with_seed(42);
        let mut played = HashSet::new();

        let cycle = run_cycle(&mut selector, 8, &mut played);
        let unique: HashSet<usize> = cycle.iter().copied().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn cycle_resets_after_exhaustion() {
        let mut selector = ShuffleSelector::with_seed(3);
        let mut played = HashSet::new();

        run_cycle(&mut selector, 4, &mut played);
        assert_eq!(played.len(), 4);

        let first_of_next = selector.select_next(4, &mut played).unwrap();
        assert!(played.is_empty(), "played set is cleared before picking");
        assert!(first_of_next < 4);
    }

    #[test]
    fn never_returns_already_played_index() {
        let mut selector = ShuffleSelector::with_seed(9);
        let mut played: HashSet<usize> = [0, 1, 3].into_iter().collect();

        for _ in 0..20 {
            let index = selector.select_next(5, &mut played.clone()).unwrap();
            assert!(index == 2 || index == 4);
        }
        played.insert(2);
        assert_eq!(selector.select_next(5, &mut played).unwrap(), 4);
    }

    #[test]
    fn same_seed_same_order() {
        let mut a = ShuffleSelector::with_seed(11);
        let mut b = ShuffleSelector::with_seed(11);

        let order_a = run_cycle(&mut a, 10, &mut HashSet::new());
        let order_b = run_cycle(&mut b, 10, &mut HashSet::new());
        assert_eq!(order_a, order_b);
    }
}
