//! Regret matching for Rock-Paper-Scissors against a fixed opponent.
//!
//! [`trainer::RegretTrainer`] owns the regret and strategy sums plus its
//! random generator; the other modules hold the pure pieces it composes.

pub mod action;
pub mod cli;
pub mod display;
pub mod error;
pub mod payoff;
pub mod sampler;
pub mod strategy;
pub mod trainer;

pub use action::Action;
pub use error::{RegretError, RegretResult};
pub use strategy::Distribution;
pub use trainer::{RegretTrainer, TrainingReport};
