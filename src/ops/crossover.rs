//! Crossover operators combining two parent tours into one child.
//!
//! Parents are index permutations of equal length; each operator returns a
//! freshly allocated child buffer.

use rand::Rng;

use crate::city::City;

/// Sequential constructive crossover, biased toward short edges.
///
/// The child starts with parent 1's first city. At each step both parents
/// nominate a candidate: the first not-yet-visited city found scanning
/// forward from the current city's position in that parent, falling back
/// to the lowest-indexed unvisited city when the scan runs dry. The
/// candidate closer to the current city is appended (ties go to parent 2,
/// matching the strict comparison). Deterministic given the parents.
pub fn sequential_crossover(parent1: &[usize], parent2: &[usize], cities: &[City]) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let mut child = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    child.push(parent1[0]);
    visited[parent1[0]] = true;

    for i in 0..n - 1 {
        let current = child[i];
        let from_p1 = next_candidate(parent1, current, &visited);
        let from_p2 = next_candidate(parent2, current, &visited);
        let pick = if cities[from_p1].proximity(&cities[current])
            < cities[from_p2].proximity(&cities[current])
        {
            from_p1
        } else {
            from_p2
        };
        child.push(pick);
        visited[pick] = true;
    }

    child
}

/// A parent's nomination: the first unvisited city scanning forward from
/// `current`'s position, else the lowest-indexed unvisited city overall.
fn next_candidate(parent: &[usize], current: usize, visited: &[bool]) -> usize {
    if let Some(pos) = parent.iter().position(|&c| c == current) {
        for &city in &parent[pos..] {
            if !visited[city] {
                return city;
            }
        }
    }
    visited
        .iter()
        .position(|&v| !v)
        .expect("an unvisited city must remain")
}

/// Single-point crossover with a repair pass.
///
/// The child takes parent 1's cities before a random cut and parent 2's
/// after it, verbatim. Positions holding a city already seen earlier are
/// then repaired left to right: each gets the unused city nearest to the
/// immediately preceding child city (ties to the lowest index). Valid by
/// construction.
pub fn clean_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    cities: &[City],
    rng: &mut R,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let cut = rng.random_range(0..n);
    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&parent1[..cut]);
    child.extend_from_slice(&parent2[cut..]);

    let mut seen = vec![false; n];
    let mut repairs = Vec::new();
    for (i, &city) in child.iter().enumerate() {
        if seen[city] {
            repairs.push(i);
        } else {
            seen[city] = true;
        }
    }
    // Unused cities in ascending order, so distance ties pick the lowest.
    let mut unused: Vec<usize> = (0..n).filter(|&c| !seen[c]).collect();

    for i in repairs {
        let previous = cities[child[i - 1]];
        let mut best = 0;
        let mut best_distance = i64::MAX;
        for (k, &city) in unused.iter().enumerate() {
            let distance = cities[city].proximity(&previous);
            if distance < best_distance {
                best_distance = distance;
                best = k;
            }
        }
        child[i] = unused.remove(best);
    }

    child
}

/// Two-point order crossover.
///
/// Two cut points are normalized so `first <= second`; the child's leading
/// positions receive parent 1's cities from `[first, second)` verbatim,
/// and the rest are filled scanning parent 2 cyclically from `second`,
/// skipping cities already placed. Valid by construction.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (first, second) = if a <= b { (a, b) } else { (b, a) };

    let mut child = Vec::with_capacity(n);
    let mut placed = vec![false; n];
    for &city in &parent1[first..second] {
        child.push(city);
        placed[city] = true;
    }

    for offset in 0..n {
        let city = parent2[(second + offset) % n];
        if !placed[city] {
            placed[city] = true;
            child.push(city);
        }
    }
    // Only reachable when a parent was not a permutation.
    for city in 0..n {
        if !placed[city] {
            child.push(city);
        }
    }

    child
}
