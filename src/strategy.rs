//! Regret-matching strategy projection and time-averaging.
//!
//! Mirrors the usual CFR layout: regrets are turned into the current
//! strategy by positive-regret normalization, and every round's strategy
//! is added into a running sum whose normalization is the average strategy.
//! Both normalizations fall back to uniform when the total is zero.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::action::{Action, NUM_ACTIONS};
use crate::error::{RegretError, RegretResult};

/// Allowed deviation of a supplied distribution's sum from 1.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-9;

const UNIFORM: f64 = 1.0 / NUM_ACTIONS as f64;

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// A probability distribution over the three actions.
///
/// Components are non-negative and sum to 1 (within floating-point
/// tolerance). Externally supplied values go through [`Distribution::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; NUM_ACTIONS]", into = "[f64; NUM_ACTIONS]")]
pub struct Distribution([f64; NUM_ACTIONS]);

impl Distribution {
    /// Validate a caller-supplied distribution.
    pub fn new(probs: [f64; NUM_ACTIONS]) -> RegretResult<Self> {
        if let Some(p) = probs.iter().find(|p| !p.is_finite()) {
            return Err(RegretError::InvalidDistribution(format!(
                "component {} is not a finite number",
                p
            )));
        }
        if let Some(p) = probs.iter().find(|&&p| p < 0.0) {
            return Err(RegretError::InvalidDistribution(format!(
                "component {} is negative",
                p
            )));
        }
        let total: f64 = probs.iter().sum();
        if (total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(RegretError::InvalidDistribution(format!(
                "components sum to {}, expected 1",
                total
            )));
        }
        Ok(Distribution(probs))
    }

    pub fn uniform() -> Self {
        Distribution([UNIFORM; NUM_ACTIONS])
    }

    /// Normalize non-negative weights, or return uniform if they sum to zero.
    pub fn normalize_or_uniform(weights: [f64; NUM_ACTIONS]) -> Self {
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            let inv = 1.0 / total;
            Distribution(weights.map(|w| w * inv))
        } else {
            Self::uniform()
        }
    }

    #[inline]
    pub fn prob(&self, action: Action) -> f64 {
        self.0[action.index()]
    }

    pub fn as_array(&self) -> &[f64; NUM_ACTIONS] {
        &self.0
    }

    /// The action with the highest probability (lowest index on ties).
    pub fn argmax(&self) -> Action {
        let mut best = 0;
        for i in 1..NUM_ACTIONS {
            if self.0[i] > self.0[best] {
                best = i;
            }
        }
        crate::action::ALL_ACTIONS[best]
    }
}

impl Index<Action> for Distribution {
    type Output = f64;

    fn index(&self, action: Action) -> &f64 {
        &self.0[action.index()]
    }
}

impl TryFrom<[f64; NUM_ACTIONS]> for Distribution {
    type Error = RegretError;

    fn try_from(probs: [f64; NUM_ACTIONS]) -> RegretResult<Self> {
        Distribution::new(probs)
    }
}

impl From<Distribution> for [f64; NUM_ACTIONS] {
    fn from(d: Distribution) -> Self {
        d.0
    }
}

/// Parse "0.4,0.3,0.3" into a validated distribution.
pub fn parse_distribution(s: &str) -> RegretResult<Distribution> {
    let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
    if parts.len() != NUM_ACTIONS {
        return Err(RegretError::InvalidDistribution(format!(
            "expected {} comma-separated values, got {}",
            NUM_ACTIONS,
            parts.len()
        )));
    }
    let mut probs = [0.0; NUM_ACTIONS];
    for (slot, part) in probs.iter_mut().zip(&parts) {
        *slot = part.parse::<f64>().map_err(|_| {
            RegretError::InvalidDistribution(format!("'{}' is not a number", part))
        })?;
    }
    Distribution::new(probs)
}

// ---------------------------------------------------------------------------
// Regret matching
// ---------------------------------------------------------------------------

/// Current strategy from accumulated regret: proportional to positive
/// regret, uniform if no action has positive regret.
pub fn project(regret_sum: &[f64; NUM_ACTIONS]) -> Distribution {
    Distribution::normalize_or_uniform(regret_sum.map(|r| r.max(0.0)))
}

/// Add one round's strategy into the running strategy sum.
pub fn accumulate_strategy(strategy_sum: &mut [f64; NUM_ACTIONS], strategy: &Distribution) {
    for (sum, &p) in strategy_sum.iter_mut().zip(strategy.as_array()) {
        *sum += p;
    }
}

/// Time-averaged strategy from the running sum.
pub fn average(strategy_sum: &[f64; NUM_ACTIONS]) -> Distribution {
    Distribution::normalize_or_uniform(*strategy_sum)
}
