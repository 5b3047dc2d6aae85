//! Regret-matching trainer against a fixed opponent distribution.
//!
//! Each round:
//!   1. project accumulated regret into the current strategy and add it to
//!      the strategy sum
//!   2. sample our action from the current strategy
//!   3. sample the opponent's action from its fixed distribution
//!   4. build the utility vector for the opponent's action
//!   5. add `u[a] - u[ours]` to the regret of every action `a`
//!
//! The order is fixed: the strategy sampled in step 2 is always the one
//! computed from regret before this round's update. The average strategy
//! converges toward a best response to the opponent.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::action::{Action, NUM_ACTIONS};
use crate::error::{RegretError, RegretResult};
use crate::payoff::{best_response, expected_payoff, utility_of};
use crate::sampler::sample;
use crate::strategy::{accumulate_strategy, average, project, Distribution};

/// Rounds between progress log lines.
pub const PROGRESS_INTERVAL: usize = 100_000;

/// Add one round's counterfactual regret: `r[a] += u[a] - u[my_action]`.
pub fn accumulate_regret(
    regret_sum: &mut [f64; NUM_ACTIONS],
    utility: &[f64; NUM_ACTIONS],
    my_action: Action,
) {
    let played = utility[my_action.index()];
    for (r, &u) in regret_sum.iter_mut().zip(utility) {
        *r += u - played;
    }
}

/// Reject negative iteration counts; zero is a valid no-op.
pub fn validate_iterations(iterations: i64) -> RegretResult<usize> {
    usize::try_from(iterations).map_err(|_| RegretError::InvalidIterationCount(iterations))
}

// ---------------------------------------------------------------------------
// Trainer
// ---------------------------------------------------------------------------

pub struct RegretTrainer<R: Rng = StdRng> {
    regret_sum: [f64; NUM_ACTIONS],
    strategy_sum: [f64; NUM_ACTIONS],
    opponent: Distribution,
    rng: R,
    iterations: u64,
}

/// Summary of a training run, ready for display or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub iterations: u64,
    pub opponent: Distribution,
    pub average_strategy: Distribution,
    /// Expected payoff of the average strategy against the opponent.
    pub expected_payoff: f64,
    pub best_response: Action,
    pub best_response_payoff: f64,
    /// Best-response payoff minus `expected_payoff`; 0 when fully converged.
    pub regret_gap: f64,
}

impl RegretTrainer<StdRng> {
    /// Trainer with an entropy-seeded generator.
    pub fn new(opponent: [f64; NUM_ACTIONS]) -> RegretResult<Self> {
        Self::with_rng(opponent, StdRng::from_entropy())
    }

    /// Trainer whose sampling is fully reproducible from `seed`.
    pub fn with_seed(opponent: [f64; NUM_ACTIONS], seed: u64) -> RegretResult<Self> {
        Self::with_rng(opponent, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RegretTrainer<R> {
    pub fn with_rng(opponent: [f64; NUM_ACTIONS], rng: R) -> RegretResult<Self> {
        let opponent = Distribution::new(opponent)?;
        Ok(RegretTrainer {
            regret_sum: [0.0; NUM_ACTIONS],
            strategy_sum: [0.0; NUM_ACTIONS],
            opponent,
            rng,
            iterations: 0,
        })
    }

    /// Run exactly `iterations` rounds.
    pub fn train(&mut self, iterations: usize) {
        debug!(
            "training {} rounds against {:?}",
            iterations,
            self.opponent.as_array()
        );
        for i in 0..iterations {
            self.round();
            if (i + 1) % PROGRESS_INTERVAL == 0 {
                trace!(
                    "round {}: average {:?}",
                    self.iterations,
                    self.average_strategy().as_array()
                );
            }
        }
        debug!(
            "finished after {} total rounds: average {:?}",
            self.iterations,
            self.average_strategy().as_array()
        );
    }

    /// Like [`train`](Self::train), but with a signed count that is
    /// validated before any round runs.
    pub fn train_checked(&mut self, iterations: i64) -> RegretResult<()> {
        let iterations = validate_iterations(iterations)?;
        self.train(iterations);
        Ok(())
    }

    /// Run up to `iterations` rounds, checking `cancel` before each one.
    /// Returns the number of rounds completed.
    pub fn train_cancellable(&mut self, iterations: usize, cancel: &AtomicBool) -> usize {
        let mut completed = 0;
        while completed < iterations {
            if cancel.load(Ordering::Relaxed) {
                debug!("cancelled after {} of {} rounds", completed, iterations);
                break;
            }
            self.round();
            completed += 1;
        }
        completed
    }

    fn round(&mut self) {
        let strategy = project(&self.regret_sum);
        accumulate_strategy(&mut self.strategy_sum, &strategy);

        let my_action = sample(&strategy, &mut self.rng);
        let opponent_action = sample(&self.opponent, &mut self.rng);

        let utility = utility_of(opponent_action);
        accumulate_regret(&mut self.regret_sum, &utility, my_action);

        self.iterations += 1;
    }

    /// Regret-matched strategy for the next round. Does not touch the
    /// strategy sum.
    pub fn current_strategy(&self) -> Distribution {
        project(&self.regret_sum)
    }

    /// Time-averaged strategy over all rounds so far (uniform before any).
    pub fn average_strategy(&self) -> Distribution {
        average(&self.strategy_sum)
    }

    pub fn report(&self) -> TrainingReport {
        let average_strategy = self.average_strategy();
        let expected = expected_payoff(&average_strategy, &self.opponent);
        let (best, best_value) = best_response(&self.opponent);
        TrainingReport {
            iterations: self.iterations,
            opponent: self.opponent,
            average_strategy,
            expected_payoff: expected,
            best_response: best,
            best_response_payoff: best_value,
            regret_gap: best_value - expected,
        }
    }

    pub fn regret_sum(&self) -> &[f64; NUM_ACTIONS] {
        &self.regret_sum
    }

    pub fn strategy_sum(&self) -> &[f64; NUM_ACTIONS] {
        &self.strategy_sum
    }

    pub fn opponent(&self) -> &Distribution {
        &self.opponent
    }

    /// Rounds completed so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}
