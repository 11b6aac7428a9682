use super::Rank;

/// Cards held by the player or the dealer in one round. Cards are only ever
/// appended, and every derived value is recomputed from them on each query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Rank>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(3),
        }
    }

    pub fn receive_card(&mut self, card: Rank) {
        self.cards.push(card);
    }

    pub fn get_cards(&self) -> &[Rank] {
        &self.cards
    }

    /// Returns the best total and whether an Ace is counted as 11.
    ///
    /// Every Ace starts at 1. At most one of them is then promoted to 11, and
    /// only if that does not push the total over 21.
    pub fn value_and_usable_ace(&self) -> (u16, bool) {
        let mut sum: u16 = 0;
        let mut has_ace = false;
        for card in &self.cards {
            sum += card.blackjack_value() as u16;
            has_ace |= *card == Rank::Ace;
        }

        if has_ace && sum + 10 <= 21 {
            (sum + 10, true)
        } else {
            (sum, false)
        }
    }

    pub fn total(&self) -> u16 {
        self.value_and_usable_ace().0
    }

    /// A soft hand.
    pub fn usable_ace(&self) -> bool {
        self.value_and_usable_ace().1
    }

    /// Natural: exactly two cards totaling 21.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21
    }

    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }
}

impl From<Vec<Rank>> for Hand {
    fn from(cards: Vec<Rank>) -> Self {
        Hand { cards }
    }
}

impl FromIterator<Rank> for Hand {
    fn from_iter<I: IntoIterator<Item = Rank>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}
