//! Tournament draws over the sorted population window.

use rand::Rng;

/// Draws `count` distinct member indices uniformly from `0..window`.
///
/// Indices are sampled with rejection until `count` distinct values are
/// collected. The population is sorted ascending before selection, so the
/// window always covers the current best `window` tours.
///
/// # Panics
/// Panics if `count > window` — the draw could never finish.
pub fn draw<R: Rng>(window: usize, count: usize, rng: &mut R) -> Vec<usize> {
    assert!(
        count <= window,
        "tournament sample count must not exceed the window"
    );

    let mut picks = Vec::with_capacity(count);
    while picks.len() < count {
        let member = rng.random_range(0..window);
        if !picks.contains(&member) {
            picks.push(member);
        }
    }
    picks
}
