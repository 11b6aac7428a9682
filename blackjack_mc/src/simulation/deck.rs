use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Rank;

static RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

/// An infinite shoe. Every card is drawn uniformly from the 13 ranks with
/// replacement, so nothing is ever depleted or reshuffled.
///
/// The same seed always yields the same sequence of ranks. One deck is owned
/// by one simulation run, and consecutive rounds continue its stream.
#[derive(Debug, Clone)]
pub struct InfiniteDeck {
    rng: StdRng,
    firsts: VecDeque<Rank>,
}

impl InfiniteDeck {
    pub fn new(seed: u64) -> InfiniteDeck {
        InfiniteDeck {
            rng: StdRng::seed_from_u64(seed),
            firsts: VecDeque::new(),
        }
    }

    /// Creates a deck whose first cards are exactly the given ranks, in order.
    /// Random draws start once they are used up.
    pub fn with_firsts(seed: u64, firsts: &[Rank]) -> InfiniteDeck {
        InfiniteDeck {
            rng: StdRng::seed_from_u64(seed),
            firsts: firsts.iter().copied().collect(),
        }
    }

    pub fn deal_card(&mut self) -> Rank {
        match self.firsts.pop_front() {
            Some(card) => card,
            None => RANKS[self.rng.gen_range(0..RANKS.len())],
        }
    }

    /// Number of stacked cards not dealt yet.
    pub fn remaining_firsts(&self) -> usize {
        self.firsts.len()
    }
}
