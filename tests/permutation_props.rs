//! Property tests: every operator preserves the permutation invariant
//! for arbitrary tour lengths, seeds, and city layouts.

use dyntsp::ops::{crossover, mutation};
use dyntsp::random::create_rng;
use dyntsp::City;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

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

fn setup(n: usize, seed: u64) -> (Vec<City>, Vec<usize>, impl Rng) {
    let mut rng = create_rng(seed);
    let cities: Vec<City> = (0..n)
        .map(|_| City::new(rng.random_range(-300..300), rng.random_range(-300..300)))
        .collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    (cities, order, rng)
}

proptest! {
    #[test]
    fn greedy_mutate_preserves_permutation(seed in any::<u64>(), n in 2usize..60) {
        let (cities, mut order, mut rng) = setup(n, seed);
        mutation::greedy_mutate(&mut order, &cities, &mut rng);
        prop_assert!(is_permutation(&order));
    }

    #[test]
    fn shuffle_mutate_preserves_permutation(
        seed in any::<u64>(),
        n in 1usize..60,
        swap_prob in 0.0f64..=1.0,
    ) {
        let (_, mut order, mut rng) = setup(n, seed);
        mutation::shuffle_mutate(&mut order, swap_prob, &mut rng);
        prop_assert!(is_permutation(&order));
    }

    #[test]
    fn inversion_mutate_preserves_permutation(seed in any::<u64>(), n in 2usize..60) {
        let (_, mut order, mut rng) = setup(n, seed);
        mutation::inversion_mutate(&mut order, &mut rng);
        prop_assert!(is_permutation(&order));
    }

    #[test]
    fn transposition_mutate_preserves_permutation(seed in any::<u64>(), n in 2usize..60) {
        let (_, mut order, mut rng) = setup(n, seed);
        mutation::transposition_mutate(&mut order, &mut rng);
        prop_assert!(is_permutation(&order));
    }

    #[test]
    fn translocation_mutate_preserves_permutation(seed in any::<u64>(), n in 2usize..60) {
        let (_, mut order, mut rng) = setup(n, seed);
        mutation::translocation_mutate(&mut order, &mut rng);
        prop_assert!(is_permutation(&order));
    }

    #[test]
    fn three_opt_mutate_preserves_permutation(seed in any::<u64>(), n in 3usize..60) {
        let (_, mut order, mut rng) = setup(n, seed);
        mutation::three_opt_mutate(&mut order, &mut rng);
        prop_assert!(is_permutation(&order));
    }

    #[test]
    fn sequential_crossover_produces_permutation(seed in any::<u64>(), n in 1usize..60) {
        let (cities, p1, mut rng) = setup(n, seed);
        let mut p2: Vec<usize> = (0..n).collect();
        p2.shuffle(&mut rng);
        let child = crossover::sequential_crossover(&p1, &p2, &cities);
        prop_assert!(is_permutation(&child));
    }

    #[test]
    fn clean_crossover_produces_permutation(seed in any::<u64>(), n in 1usize..60) {
        let (cities, p1, mut rng) = setup(n, seed);
        let mut p2: Vec<usize> = (0..n).collect();
        p2.shuffle(&mut rng);
        let child = crossover::clean_crossover(&p1, &p2, &cities, &mut rng);
        prop_assert!(is_permutation(&child));
    }

    #[test]
    fn order_crossover_produces_permutation(seed in any::<u64>(), n in 1usize..60) {
        let (_, p1, mut rng) = setup(n, seed);
        let mut p2: Vec<usize> = (0..n).collect();
        p2.shuffle(&mut rng);
        let child = crossover::order_crossover(&p1, &p2, &mut rng);
        prop_assert!(is_permutation(&child));
    }
}
