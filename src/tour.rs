//! Tour representation, construction, and cost evaluation.

use rand::Rng;

use crate::city::City;

/// A candidate solution: an ordering of city indices plus its cached
/// closed-loop cost.
///
/// `order` should be a permutation of `0..n` — every city exactly once.
/// Operators are not required to preserve that invariant; [`Tour::is_valid`]
/// checks it. The cached cost goes stale whenever `order` or the city
/// positions change; call [`Tour::recompute_cost`] afterward.
///
/// Cloning a tour deep-copies the index buffer, so two tours never share
/// mutation effects.
#[derive(Debug, Clone)]
pub struct Tour {
    order: Vec<usize>,
    cost: f64,
}

impl Tour {
    /// Builds a tour from an explicit visiting order and computes its cost.
    pub fn from_order(order: Vec<usize>, cities: &[City]) -> Self {
        let mut tour = Self { order, cost: 0.0 };
        tour.recompute_cost(cities);
        tour
    }

    /// Builds an initial tour by a greedy nearest-unvisited-neighbor walk
    /// from a uniformly random start city.
    ///
    /// At each step the unvisited city at the smallest positive distance is
    /// taken, ties broken by lowest index. Zero distances are excluded so a
    /// city coincident with the current one cannot form a degenerate
    /// self-loop; if every remaining candidate sits at distance zero, the
    /// lowest-indexed unvisited city is taken so the walk always yields a
    /// permutation.
    pub fn nearest_neighbor<R: Rng>(cities: &[City], rng: &mut R) -> Self {
        let n = cities.len();
        assert!(n > 0, "cannot build a tour over an empty city list");

        let mut order = Vec::with_capacity(n);
        let mut visited = vec![false; n];
        let mut current = rng.random_range(0..n);
        visited[current] = true;
        order.push(current);

        for _ in 1..n {
            let distances = cities[current].proximity_to_all(cities);
            let mut next: Option<(usize, i64)> = None;
            for (j, &d) in distances.iter().enumerate() {
                if visited[j] || d == 0 {
                    continue;
                }
                if next.map_or(true, |(_, best)| d < best) {
                    next = Some((j, d));
                }
            }
            let next = match next {
                Some((j, _)) => j,
                None => first_unvisited(&visited),
            };
            visited[next] = true;
            order.push(next);
            current = next;
        }

        Self::from_order(order, cities)
    }

    /// The visiting order of city indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The cached closed-loop cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Recomputes the cached cost against the given city positions: the
    /// sum of all adjacent edges plus the edge closing the loop.
    pub fn recompute_cost(&mut self, cities: &[City]) {
        let mut total = 0.0;
        for pair in self.order.windows(2) {
            total += cities[pair[0]].proximity(&cities[pair[1]]) as f64;
        }
        if let (Some(&first), Some(&last)) = (self.order.first(), self.order.last()) {
            total += cities[first].proximity(&cities[last]) as f64;
        }
        self.cost = total;
    }

    /// Whether `order` is a permutation — no city index repeated or out of
    /// range.
    pub fn is_valid(&self) -> bool {
        let n = self.order.len();
        let mut seen = vec![false; n];
        for &city in &self.order {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }
}

fn first_unvisited(visited: &[bool]) -> usize {
    visited
        .iter()
        .position(|&v| !v)
        .expect("an unvisited city must remain")
}
