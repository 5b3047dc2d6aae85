//! Payoff model for the cyclic three-action game.
//!
//! Win = +1, tie = 0, loss = -1 from the perspective of the player whose
//! action is evaluated.

use crate::action::{Action, ALL_ACTIONS, NUM_ACTIONS};
use crate::strategy::Distribution;

/// Payoff of playing `mine` against `theirs`.
pub fn payoff(mine: Action, theirs: Action) -> f64 {
    if mine == theirs {
        0.0
    } else if mine.beats() == theirs {
        1.0
    } else {
        -1.0
    }
}

/// Utility each action would have earned against a fixed opponent action.
///
/// Built fresh on every call so no entry can carry over from a prior round.
pub fn utility_of(opponent: Action) -> [f64; NUM_ACTIONS] {
    let mut utility = [0.0; NUM_ACTIONS];
    utility[opponent.index()] = 0.0;
    utility[opponent.beaten_by().index()] = 1.0;
    utility[opponent.beats().index()] = -1.0;
    utility
}

/// Expected payoff of each pure action against a mixed opponent.
pub fn pure_payoffs(opponent: &Distribution) -> [f64; NUM_ACTIONS] {
    let mut out = [0.0; NUM_ACTIONS];
    for mine in ALL_ACTIONS {
        out[mine.index()] = ALL_ACTIONS
            .iter()
            .map(|&theirs| opponent.prob(theirs) * payoff(mine, theirs))
            .sum();
    }
    out
}

/// Expected payoff of a mixed strategy against a mixed opponent.
pub fn expected_payoff(strategy: &Distribution, opponent: &Distribution) -> f64 {
    let pure = pure_payoffs(opponent);
    ALL_ACTIONS
        .iter()
        .map(|&a| strategy.prob(a) * pure[a.index()])
        .sum()
}

/// The pure action with the highest expected payoff, and that payoff.
/// Ties go to the lowest index.
pub fn best_response(opponent: &Distribution) -> (Action, f64) {
    let pure = pure_payoffs(opponent);
    let mut best = Action::Rock;
    for a in ALL_ACTIONS {
        if pure[a.index()] > pure[best.index()] {
            best = a;
        }
    }
    (best, pure[best.index()])
}
