use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Decision, Hand, Rank};

/// A playing strategy. It is only asked while the player's hand is 21 or
/// less and not a natural, and it must not depend on anything but its inputs
/// and its own state.
pub trait Policy {
    /// Display name used in reports. Has no effect on the simulation.
    fn name(&self) -> &str;
    fn decide(&mut self, player_hand: &Hand, dealer_up_card: Rank) -> Decision;
}

/// Baseline: hits or stands with equal probability.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        RandomPolicy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "RandomPolicy"
    }

    fn decide(&mut self, _: &Hand, _: Rank) -> Decision {
        if self.rng.gen_bool(0.5) {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

/// Hits while the total is below the threshold.
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    threshold: u16,
    name: String,
}

impl ThresholdPolicy {
    pub fn new(threshold: u16) -> Self {
        ThresholdPolicy {
            threshold,
            name: format!("ThresholdPolicy(threshold={})", threshold),
        }
    }

    pub fn get_threshold(&self) -> u16 {
        self.threshold
    }
}

impl Policy for ThresholdPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, player_hand: &Hand, _: Rank) -> Decision {
        if player_hand.total() < self.threshold {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

/// Basic strategy without split or double.
///
/// Columns are dealer up cards A, 2, ..., 10. Hard rows are 11-, 12, 13, 14,
/// 15, 16, 17+. Soft rows are 17-, 18, 19+.
#[derive(Debug, Clone)]
pub struct BasicStrategyPolicy {
    hard_charts: [[Decision; 10]; 7],
    soft_charts: [[Decision; 10]; 3],
}

impl BasicStrategyPolicy {
    pub fn new() -> BasicStrategyPolicy {
        const H: Decision = Decision::Hit;
        const S: Decision = Decision::Stand;

        BasicStrategyPolicy {
            hard_charts: [
                [H, H, H, H, H, H, H, H, H, H], // 11-
                [H, H, H, S, S, S, H, H, H, H], // 12
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H], // 16
                [S, S, S, S, S, S, S, S, S, S], // 17+
            ],
            soft_charts: [
                [H, H, H, H, H, H, H, H, H, H], // 17-
                [H, S, S, S, S, S, S, S, H, H], // 18
                [S, S, S, S, S, S, S, S, S, S], // 19+
            ],
        }
    }
}

impl Default for BasicStrategyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for BasicStrategyPolicy {
    fn name(&self) -> &str {
        "BasicStrategyPolicy(no-split-no-double)"
    }

    fn decide(&mut self, player_hand: &Hand, dealer_up_card: Rank) -> Decision {
        let (total, usable_ace) = player_hand.value_and_usable_ace();
        if total >= 21 {
            return Decision::Stand;
        }

        let col = (dealer_up_card.blackjack_value() - 1) as usize;
        if usable_ace {
            let row = total.clamp(17, 19) as usize - 17;
            self.soft_charts[row][col]
        } else {
            let row = total.clamp(11, 17) as usize - 11;
            self.hard_charts[row][col]
        }
    }
}
