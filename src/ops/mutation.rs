//! Mutation operators over permutation-encoded tours.
//!
//! Every operator mutates the index buffer in place; the caller is
//! responsible for recomputing the tour cost afterward.

use rand::Rng;

use crate::city::City;

/// Pulls the globally nearest neighbor of a random city next to it.
///
/// Picks a random tour position `p`, finds the city at the smallest
/// positive distance from `order[p]` anywhere on the map (ties to the
/// lowest index, the same rule construction uses), and swaps that city's
/// tour position with position `p + 1` (wrapping).
///
/// No-op when every other city is coincident, or when the nearest city is
/// missing from the buffer (only possible once the permutation invariant
/// is already broken).
pub fn greedy_mutate<R: Rng>(order: &mut [usize], cities: &[City], rng: &mut R) {
    let n = order.len();
    if n < 2 {
        return;
    }

    let point = rng.random_range(0..n);
    let distances = cities[order[point]].proximity_to_all(cities);
    let mut nearest: Option<(usize, i64)> = None;
    for (j, &d) in distances.iter().enumerate() {
        if d == 0 {
            continue;
        }
        if nearest.map_or(true, |(_, best)| d < best) {
            nearest = Some((j, d));
        }
    }
    let Some((city, _)) = nearest else { return };
    let Some(target) = order.iter().position(|&c| c == city) else {
        return;
    };
    let successor = (point + 1) % n;
    order.swap(successor, target);
}

/// Sweeps the buffer once; each position independently swaps with a
/// uniformly random position (possibly itself) with probability
/// `swap_prob`.
pub fn shuffle_mutate<R: Rng>(order: &mut [usize], swap_prob: f64, rng: &mut R) {
    let n = order.len();
    for i in 0..n {
        if rng.random_range(0.0..1.0) < swap_prob {
            let j = rng.random_range(0..n);
            order.swap(i, j);
        }
    }
}

/// Reverses a random segment in place.
///
/// `start` is drawn from `0..n-1` and `end` from `start..n`; applying the
/// same `(start, end)` reversal twice restores the original order.
pub fn inversion_mutate<R: Rng>(order: &mut [usize], rng: &mut R) {
    let n = order.len();
    if n < 2 {
        return;
    }
    let start = rng.random_range(0..n - 1);
    let end = rng.random_range(start..n);
    order[start..=end].reverse();
}

/// Swaps two random positions.
///
/// Both endpoints are drawn from `0..n-1`, so the final position never
/// takes part in a swap. Deliberately kept that way; the tests pin it.
pub fn transposition_mutate<R: Rng>(order: &mut [usize], rng: &mut R) {
    let n = order.len();
    if n < 2 {
        return;
    }
    let first = rng.random_range(0..n - 1);
    let second = rng.random_range(0..n - 1);
    order.swap(first, second);
}

/// Cuts a single element at a random position and reinserts it at another,
/// shifting the elements in between by one.
pub fn translocation_mutate<R: Rng>(order: &mut Vec<usize>, rng: &mut R) {
    let n = order.len();
    if n < 2 {
        return;
    }
    let chosen = rng.random_range(0..n - 1);
    let insertion = rng.random_range(0..n - 1);
    let city = order.remove(chosen);
    order.insert(insertion, city);
}

/// Applies one of the four pure 3-opt reconnections at three random cuts.
///
/// Three distinct cut positions are drawn (a random permutation of the
/// indices, first three, sorted) giving `a < c < e`; the reconnection
/// pattern is chosen uniformly from the four that reorder or reverse both
/// middle segments. The identity and the three 2-opt reconnections are
/// excluded by construction.
pub fn three_opt_mutate<R: Rng>(order: &mut [usize], rng: &mut R) {
    let n = order.len();
    if n < 3 {
        return;
    }
    let mut cuts = rand::seq::index::sample(rng, n, 3).into_vec();
    cuts.sort_unstable();
    let pattern = rng.random_range(0..4);
    three_opt_reconnect(order, cuts[0], cuts[1], cuts[2], pattern);
}

/// Reassembles the tour from segments `[0..=a]`, `[a+1..=c]`, `[c+1..=e]`,
/// `[e+1..]` according to `pattern`:
///
/// - 0: reversed segment 2, reversed segment 3
/// - 1: segment 3, segment 2
/// - 2: segment 3, reversed segment 2
/// - 3: reversed segment 3, segment 2
///
/// The leading and trailing segments stay fixed and forward; the trailing
/// segment may be empty (`e == n-1`).
pub(crate) fn three_opt_reconnect(order: &mut [usize], a: usize, c: usize, e: usize, pattern: usize) {
    let n = order.len();
    debug_assert!(a < c && c < e && e < n);
    let (b, d, f) = (a + 1, c + 1, e + 1);

    let mut reassembled = Vec::with_capacity(n);
    reassembled.extend_from_slice(&order[..=a]);
    let seg2 = &order[b..=c];
    let seg3 = &order[d..=e];
    match pattern {
        0 => {
            reassembled.extend(seg2.iter().rev());
            reassembled.extend(seg3.iter().rev());
        }
        1 => {
            reassembled.extend_from_slice(seg3);
            reassembled.extend_from_slice(seg2);
        }
        2 => {
            reassembled.extend_from_slice(seg3);
            reassembled.extend(seg2.iter().rev());
        }
        _ => {
            reassembled.extend(seg3.iter().rev());
            reassembled.extend_from_slice(seg2);
        }
    }
    reassembled.extend_from_slice(&order[f..]);
    order.copy_from_slice(&reassembled);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use rand::seq::SliceRandom;

    fn is_permutation(order: &[usize]) -> bool {
        let n = order.len();
        let mut seen = vec![false; n];
        order.iter().all(|&c| {
            if c >= n || seen[c] {
                false
            } else {
                seen[c] = true;
                true
            }
        })
    }

    fn random_cities(n: usize, seed: u64) -> Vec<City> {
        let mut rng = create_rng(seed);
        (0..n)
            .map(|_| City::new(rng.random_range(0..600), rng.random_range(0..600)))
            .collect()
    }

    fn shuffled(n: usize, rng: &mut impl Rng) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        order
    }

    // ---- Greedy ----

    #[test]
    fn test_greedy_preserves_permutation() {
        let cities = random_cities(20, 5);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut order = shuffled(20, &mut rng);
            greedy_mutate(&mut order, &cities, &mut rng);
            assert!(is_permutation(&order));
        }
    }

    #[test]
    fn test_greedy_places_nearest_pair_adjacent() {
        // City 1 is by far the closest to city 0; after mutating with the
        // picked position forced onto city 0, they end up adjacent.
        let cities = vec![
            City::new(0, 0),
            City::new(1, 0),
            City::new(500, 0),
            City::new(0, 500),
        ];
        let mut rng = create_rng(0);
        let mut order = vec![0, 2, 1, 3];
        let mut moved = false;
        for _ in 0..50 {
            greedy_mutate(&mut order, &cities, &mut rng);
            assert!(is_permutation(&order));
            let p0 = order.iter().position(|&c| c == 0).unwrap();
            let p1 = order.iter().position(|&c| c == 1).unwrap();
            if (p0 + 1) % 4 == p1 || (p1 + 1) % 4 == p0 {
                moved = true;
                break;
            }
        }
        assert!(moved, "nearest pair never became adjacent");
    }

    #[test]
    fn test_greedy_all_coincident_is_noop() {
        let cities = vec![City::new(1, 1); 4];
        let mut rng = create_rng(9);
        let mut order = vec![2, 0, 3, 1];
        greedy_mutate(&mut order, &cities, &mut rng);
        assert_eq!(order, vec![2, 0, 3, 1]);
    }

    // ---- Shuffle ----

    #[test]
    fn test_shuffle_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut order = shuffled(15, &mut rng);
            shuffle_mutate(&mut order, 0.8, &mut rng);
            assert!(is_permutation(&order));
        }
    }

    #[test]
    fn test_shuffle_zero_prob_is_noop() {
        let mut rng = create_rng(42);
        let mut order = shuffled(15, &mut rng);
        let before = order.clone();
        shuffle_mutate(&mut order, 0.0, &mut rng);
        assert_eq!(order, before);
    }

    // ---- Inversion ----

    #[test]
    fn test_inversion_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut order = shuffled(12, &mut rng);
            inversion_mutate(&mut order, &mut rng);
            assert!(is_permutation(&order));
        }
    }

    #[test]
    fn test_inversion_is_self_inverse() {
        // Two identically seeded streams draw the same (start, end), so
        // applying the reversal twice restores the original order.
        for seed in 0..20 {
            let mut setup = create_rng(seed + 100);
            let original = shuffled(11, &mut setup);

            let mut first = create_rng(seed);
            let mut second = create_rng(seed);
            let mut order = original.clone();
            inversion_mutate(&mut order, &mut first);
            inversion_mutate(&mut order, &mut second);
            assert_eq!(order, original);
        }
    }

    // ---- Transposition ----

    #[test]
    fn test_transposition_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut order = shuffled(10, &mut rng);
            transposition_mutate(&mut order, &mut rng);
            assert!(is_permutation(&order));
        }
    }

    #[test]
    fn test_transposition_never_touches_last_position() {
        // Endpoints are drawn from 0..n-1: the final position stays put.
        let mut rng = create_rng(42);
        for _ in 0..500 {
            let mut order: Vec<usize> = (0..8).collect();
            transposition_mutate(&mut order, &mut rng);
            assert_eq!(order[7], 7);
        }
    }

    // ---- Translocation ----

    #[test]
    fn test_translocation_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut order = shuffled(10, &mut rng);
            translocation_mutate(&mut order, &mut rng);
            assert!(is_permutation(&order));
        }
    }

    #[test]
    fn test_translocation_shifts_intervening_elements() {
        // Removing index 1 and reinserting at index 3 shifts 2 and 3 left.
        let mut order = vec![0, 1, 2, 3, 4];
        let city = order.remove(1);
        order.insert(3, city);
        assert_eq!(order, vec![0, 2, 3, 1, 4]);
    }

    // ---- Three-opt ----

    #[test]
    fn test_three_opt_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut order = shuffled(9, &mut rng);
            three_opt_mutate(&mut order, &mut rng);
            assert!(is_permutation(&order));
        }
    }

    #[test]
    fn test_three_opt_reconnect_all_cuts_and_patterns() {
        // Exhaustive over every valid (a, c, e) triple, including e = n-1
        // (empty trailing segment) and e = n-2 (single trailing element).
        let n = 8;
        for a in 0..n - 2 {
            for c in a + 1..n - 1 {
                for e in c + 1..n {
                    for pattern in 0..4 {
                        let mut order: Vec<usize> = (0..n).collect();
                        three_opt_reconnect(&mut order, a, c, e, pattern);
                        assert!(
                            is_permutation(&order),
                            "invalid result for a={a} c={c} e={e} pattern={pattern}: {order:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_three_opt_reconnect_known_case() {
        // a=1, c=3, e=5 over 0..8, pattern 1: segment 3 then segment 2.
        let mut order: Vec<usize> = (0..8).collect();
        three_opt_reconnect(&mut order, 1, 3, 5, 1);
        assert_eq!(order, vec![0, 1, 4, 5, 2, 3, 6, 7]);
    }

    #[test]
    fn test_three_opt_too_short_is_noop() {
        let mut rng = create_rng(42);
        let mut order = vec![1, 0];
        three_opt_mutate(&mut order, &mut rng);
        assert_eq!(order, vec![1, 0]);
    }
}
