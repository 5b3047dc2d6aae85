use rand::Rng;

use crate::action::{Action, ALL_ACTIONS, NUM_ACTIONS};
use crate::strategy::Distribution;

/// Draw an action from `dist` by cumulative-probability search.
///
/// Falls through to the last action when rounding leaves the cumulative
/// mass just short of the draw.
pub fn sample<R: Rng>(dist: &Distribution, rng: &mut R) -> Action {
    sample_with(dist, rng.gen::<f64>())
}

/// Deterministic core of [`sample`] for a draw `r` in `[0, 1)`.
pub fn sample_with(dist: &Distribution, r: f64) -> Action {
    let mut cumulative = 0.0;
    for &action in &ALL_ACTIONS[..NUM_ACTIONS - 1] {
        cumulative += dist.prob(action);
        if r < cumulative {
            return action;
        }
    }
    ALL_ACTIONS[NUM_ACTIONS - 1]
}
