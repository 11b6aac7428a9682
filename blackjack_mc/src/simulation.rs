pub mod deck;
pub mod hand;

use crate::{policy::Policy, Decision, Rule, SimulationError};
use blackjack_mc_macros::allowed_phase;
use serde::Serialize;
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::EnumIter;

use self::{deck::InfiniteDeck, hand::Hand};

static FACE_VALUE_TO_BLACKJACK_VALUE: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

/// A symbolic card rank. There is no suit and the supply is unlimited.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize_enum_str, Deserialize_enum_str,
)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// Ace counts as 1 here. Promoting it to 11 is up to `Hand`.
    pub fn blackjack_value(&self) -> u8 {
        FACE_VALUE_TO_BLACKJACK_VALUE[*self as usize]
    }

    /// The value a policy sees for the dealer upcard, with Ace as 11.
    pub fn upcard_value(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            _ => self.blackjack_value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    WaitForDeal,
    Dealt,
    PlayerTurn,
    DealerTurn,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum Outcome {
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "loss")]
    Loss,
    #[serde(rename = "push")]
    Push,
}

/// Result of one settled round. `profit` is a signed multiple of the bet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub profit: f64,
    pub player_total: u16,
    pub dealer_total: u16,
    pub player_blackjack: bool,
    pub dealer_blackjack: bool,
    pub player_bust: bool,
    /// Only ever true when the dealer actually drew past the initial deal.
    pub dealer_bust: bool,
}

/// Dealer draws to 17. A soft 17 is hit only under H17.
pub fn dealer_should_hit(dealer_hand: &Hand, rule: &Rule) -> bool {
    let (total, usable_ace) = dealer_hand.value_and_usable_ace();
    if total < 17 {
        true
    } else if total > 17 {
        false
    } else {
        usable_ace && rule.dealer_hit_on_soft17
    }
}

/// Plays a single round against the dealer. Each step can only be called in
/// its own phase, so a round can be driven by hand or all at once with
/// `play`.
pub struct Round<'a> {
    rule: &'a Rule,
    deck: &'a mut InfiniteDeck,
    current_game_phase: GamePhase,
    player_hand: Hand,
    dealer_hand: Hand,
    result: Option<GameResult>,
}

impl<'a> Round<'a> {
    pub fn new(rule: &'a Rule, deck: &'a mut InfiniteDeck) -> Self {
        Self {
            rule,
            deck,
            current_game_phase: GamePhase::WaitForDeal,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            result: None,
        }
    }

    /// Plays the whole round: deal, naturals, player turn, dealer turn and
    /// settlement. The handler observes every step.
    pub fn play<P, U>(&mut self, policy: &mut P, handler: &mut U) -> Result<GameResult, SimulationError>
    where
        P: Policy + ?Sized,
        U: RoundEventHandler + ?Sized,
    {
        let dealer_up_card = self.deal_initial_cards()?;
        handler.on_deal_cards(&self.player_hand, dealer_up_card);

        if let Some(result) = self.check_naturals()? {
            handler.on_round_settled(&result, &self.player_hand, &self.dealer_hand);
            return Ok(result);
        }

        loop {
            let decision = policy.decide(&self.player_hand, dealer_up_card);
            handler.on_make_decision(decision, &self.player_hand);
            match decision {
                Decision::Stand => {
                    self.play_stand()?;
                    break;
                }
                Decision::Hit => {
                    if let Some(result) = self.play_hit()? {
                        handler.on_player_bust(&self.player_hand);
                        handler.on_round_settled(&result, &self.player_hand, &self.dealer_hand);
                        return Ok(result);
                    }
                }
                Decision::PlaceHolder => {
                    return Err(SimulationError::InvalidAction {
                        policy: policy.name().to_string(),
                        decision,
                    });
                }
            }
        }

        let result = self.dealer_plays_and_settle()?;
        handler.on_round_settled(&result, &self.player_hand, &self.dealer_hand);
        Ok(result)
    }

    /// Can be called at WaitForDeal phase.
    /// Deals two cards to the player, then two to the dealer. Returns the
    /// dealer up card, which is the dealer's first card.
    #[allowed_phase(WaitForDeal)]
    pub fn deal_initial_cards(&mut self) -> Result<Rank, SimulationError> {
        for _ in 0..2 {
            let card = self.deck.deal_card();
            self.player_hand.receive_card(card);
        }
        for _ in 0..2 {
            let card = self.deck.deal_card();
            self.dealer_hand.receive_card(card);
        }

        self.current_game_phase = GamePhase::Dealt;
        let dealer_up_card = self.dealer_hand.get_cards()[0];
        Ok(dealer_up_card)
    }

    /// Can be called at Dealt phase.
    /// Settles the round immediately if either side has a natural. Otherwise
    /// moves on to the player's turn and returns None.
    #[allowed_phase(Dealt)]
    pub fn check_naturals(&mut self) -> Result<Option<GameResult>, SimulationError> {
        let player_natural = self.player_hand.is_blackjack();
        let dealer_natural = self.dealer_hand.is_blackjack();
        let (outcome, profit) = match (player_natural, dealer_natural) {
            (false, false) => {
                self.current_game_phase = GamePhase::PlayerTurn;
                return Ok(None);
            }
            (true, true) => (Outcome::Push, 0.0),
            (true, false) => (Outcome::Win, self.rule.payout_blackjack * self.rule.bet),
            (false, true) => (Outcome::Loss, -self.rule.bet),
        };
        Ok(Some(self.settle(outcome, profit)))
    }

    /// Can be called at PlayerTurn phase.
    /// Returns the settled result if the player busts, in which case the
    /// dealer does not act.
    #[allowed_phase(PlayerTurn)]
    pub fn play_hit(&mut self) -> Result<Option<GameResult>, SimulationError> {
        let card = self.deck.deal_card();
        self.player_hand.receive_card(card);
        if self.player_hand.is_bust() {
            return Ok(Some(self.settle(Outcome::Loss, -self.rule.bet)));
        }
        Ok(None)
    }

    /// Can be called at PlayerTurn phase.
    #[allowed_phase(PlayerTurn)]
    pub fn play_stand(&mut self) -> Result<(), SimulationError> {
        self.current_game_phase = GamePhase::DealerTurn;
        Ok(())
    }

    /// Can be called at DealerTurn phase.
    /// Makes the dealer draw according to the rule, then compares hands.
    #[allowed_phase(DealerTurn)]
    pub fn dealer_plays_and_settle(&mut self) -> Result<GameResult, SimulationError> {
        while dealer_should_hit(&self.dealer_hand, self.rule) {
            let card = self.deck.deal_card();
            self.dealer_hand.receive_card(card);
        }

        let bet = self.rule.bet;
        let player_total = self.player_hand.total();
        let dealer_total = self.dealer_hand.total();
        let (outcome, profit) = if self.player_hand.is_bust() {
            (Outcome::Loss, -bet)
        } else if self.dealer_hand.is_bust() || player_total > dealer_total {
            (Outcome::Win, bet)
        } else if player_total < dealer_total {
            (Outcome::Loss, -bet)
        } else {
            (Outcome::Push, 0.0)
        };
        Ok(self.settle(outcome, profit))
    }

    pub fn get_current_game_phase(&self) -> GamePhase {
        self.current_game_phase
    }

    pub fn get_player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn get_dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// None until the round is settled.
    pub fn get_result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    fn settle(&mut self, outcome: Outcome, profit: f64) -> GameResult {
        // The dealer never busts on two cards, so the flags read straight off
        // the hands even when the dealer turn was skipped.
        let result = GameResult {
            outcome,
            profit,
            player_total: self.player_hand.total(),
            dealer_total: self.dealer_hand.total(),
            player_blackjack: self.player_hand.is_blackjack(),
            dealer_blackjack: self.dealer_hand.is_blackjack(),
            player_bust: self.player_hand.is_bust(),
            dealer_bust: self.dealer_hand.is_bust(),
        };
        log::trace!(
            "round settled: {} {:+} ({} vs {})",
            outcome,
            profit,
            result.player_total,
            result.dealer_total
        );
        self.current_game_phase = GamePhase::Settled;
        self.result = Some(result);
        result
    }
}

/// Observes the steps of a round. Every method defaults to doing nothing.
pub trait RoundEventHandler {
    fn on_deal_cards(&mut self, _player_hand: &Hand, _dealer_up_card: Rank) {}
    fn on_make_decision(&mut self, _decision: Decision, _player_hand: &Hand) {}
    fn on_player_bust(&mut self, _player_hand: &Hand) {}
    fn on_round_settled(&mut self, _result: &GameResult, _player_hand: &Hand, _dealer_hand: &Hand) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl RoundEventHandler for NoopHandler {}
