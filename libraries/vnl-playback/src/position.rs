//! Playlist-wide position accounting

use std::collections::HashSet;

/// Aggregate playlist position in milliseconds
///
/// Sums the known durations of every played index except `current`, then adds
/// the live position inside the current track. Unknown durations (0 or out of
/// range) contribute nothing, so the result is a lower bound when durations
/// are missing.
pub fn aggregate_position(
    played: &HashSet<usize>,
    current: Option<usize>,
    durations: &[u64],
    in_track_ms: u64,
) -> u64 {
    let finished: u64 = played
        .iter()
        .filter(|&&index| Some(index) != current)
        .filter_map(|&index| durations.get(index))
        .sum();

    finished + in_track_ms
}
