//! The drifting city environment.

use rand::Rng;

use crate::city::City;

/// Holds the immutable baseline city positions and the current, drifted
/// working set.
///
/// Each perturbation rebuilds the working set from the baseline, so a city
/// is never more than one shift away from where it started; drift does not
/// compound across perturbations.
#[derive(Debug, Clone)]
pub struct Environment {
    original: Vec<City>,
    current: Vec<City>,
    shift_amount: i32,
}

impl Environment {
    pub fn new(cities: Vec<City>, shift_amount: i32) -> Self {
        Self {
            current: cities.clone(),
            original: cities,
            shift_amount,
        }
    }

    /// The working city positions all cost evaluations use.
    pub fn current(&self) -> &[City] {
        &self.current
    }

    /// The baseline positions the drift is measured from.
    pub fn original(&self) -> &[City] {
        &self.original
    }

    /// Replaces the working set wholesale: each baseline city independently
    /// stays put or shifts by `shift_amount` along one of the four cardinal
    /// directions, all five outcomes equally likely.
    pub fn perturb<R: Rng>(&mut self, rng: &mut R) {
        self.current = self
            .original
            .iter()
            .map(|city| {
                let mut x = city.x;
                let mut y = city.y;
                match rng.random_range(0..5) {
                    1 => y += self.shift_amount,
                    2 => x += self.shift_amount,
                    3 => y -= self.shift_amount,
                    4 => x -= self.shift_amount,
                    _ => {}
                }
                City::new(x, y)
            })
            .collect();
    }
}
