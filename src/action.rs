use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegretError, RegretResult};

/// Number of actions in the cyclic game.
pub const NUM_ACTIONS: usize = 3;

/// One of the three actions of a cyclic-dominance game.
///
/// The discriminant doubles as the action's index into regret and strategy
/// vectors. Each action beats its predecessor and loses to its successor
/// (mod 3): Paper beats Rock, Scissors beats Paper, Rock beats Scissors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

pub const ALL_ACTIONS: [Action; NUM_ACTIONS] = [Action::Rock, Action::Paper, Action::Scissors];

impl Action {
    pub fn from_index(index: usize) -> RegretResult<Action> {
        match index {
            0 => Ok(Action::Rock),
            1 => Ok(Action::Paper),
            2 => Ok(Action::Scissors),
            _ => Err(RegretError::InvalidAction(index.to_string())),
        }
    }

    /// Parse "rock", "R", "paper", "p", etc.
    pub fn from_str(s: &str) -> RegretResult<Action> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "rock" => Ok(Action::Rock),
            "p" | "paper" => Ok(Action::Paper),
            "s" | "scissors" => Ok(Action::Scissors),
            _ => Err(RegretError::InvalidAction(s.to_string())),
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The action that beats this one (cyclic successor).
    #[inline]
    pub fn beaten_by(self) -> Action {
        ALL_ACTIONS[(self.index() + 1) % NUM_ACTIONS]
    }

    /// The action this one beats (cyclic predecessor).
    #[inline]
    pub fn beats(self) -> Action {
        ALL_ACTIONS[(self.index() + NUM_ACTIONS - 1) % NUM_ACTIONS]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Rock => "Rock",
            Action::Paper => "Paper",
            Action::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
