pub mod error;
pub mod policy;
pub mod simulation;
pub mod statistics;

use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub use error::SimulationError;
pub use policy::{BasicStrategyPolicy, Policy, RandomPolicy, ThresholdPolicy};
pub use simulation::{
    deck::InfiniteDeck, dealer_should_hit, hand::Hand, GamePhase, GameResult, NoopHandler,
    Outcome, Rank, Round, RoundEventHandler,
};
pub use statistics::{simulate, simulate_with_handler, Summary, Tally};

/// House rules for one simulation run. Fixed for every round of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// `false` means S17, `true` means H17.
    pub dealer_hit_on_soft17: bool,
    /// Multiple of `bet` won on a player-only natural.
    pub payout_blackjack: f64,
    pub bet: f64,
}

impl Rule {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.bet.is_finite() || self.bet <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "bet must be a positive number, got {}",
                self.bet
            )));
        }
        if !self.payout_blackjack.is_finite() || self.payout_blackjack < 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "payout_blackjack must not be negative, got {}",
                self.payout_blackjack
            )));
        }
        Ok(())
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            dealer_hit_on_soft17: false,
            payout_blackjack: 1.5,
            bet: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum Decision {
    PlaceHolder,
    Hit,
    Stand,
}

impl Default for Decision {
    fn default() -> Self {
        Decision::PlaceHolder
    }
}
