use serde::{Deserialize, Serialize};

use crate::{
    simulation::{NoopHandler, RoundEventHandler},
    GameResult, InfiniteDeck, Outcome, Policy, Round, Rule, SimulationError,
};

/// Aggregate over `games` rounds of one policy. Field names are what
/// reports and charts read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    pub profit_total: f64,
    pub profit_avg: f64,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub push_rate: f64,
}

/// Running counts of settled rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    wins: u64,
    losses: u64,
    pushes: u64,
    profit_total: f64,
}

impl Tally {
    pub fn record(&mut self, result: &GameResult) {
        match result.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Push => self.pushes += 1,
        }
        self.profit_total += result.profit;
    }

    pub fn get_games(&self) -> u64 {
        self.wins + self.losses + self.pushes
    }

    pub fn get_profit_total(&self) -> f64 {
        self.profit_total
    }

    /// Fails if nothing has been recorded, since every rate would divide by
    /// zero.
    pub fn into_summary(self) -> Result<Summary, SimulationError> {
        let games = self.get_games();
        if games == 0 {
            return Err(SimulationError::InvalidConfiguration(String::from(
                "cannot summarize zero games",
            )));
        }

        let n = games as f64;
        Ok(Summary {
            games,
            wins: self.wins,
            losses: self.losses,
            pushes: self.pushes,
            profit_total: self.profit_total,
            profit_avg: self.profit_total / n,
            win_rate: self.wins as f64 / n,
            loss_rate: self.losses as f64 / n,
            push_rate: self.pushes as f64 / n,
        })
    }
}

/// Runs `games` rounds of `policy` on a single deck seeded with `seed`.
/// Rounds are played one after another and keep drawing from the same deck.
pub fn simulate<P: Policy + ?Sized>(
    policy: &mut P,
    games: u64,
    seed: u64,
    rule: &Rule,
) -> Result<Summary, SimulationError> {
    simulate_with_handler(policy, games, seed, rule, &mut NoopHandler)
}

/// Same as `simulate`, and lets `handler` observe every round.
pub fn simulate_with_handler<P, U>(
    policy: &mut P,
    games: u64,
    seed: u64,
    rule: &Rule,
    handler: &mut U,
) -> Result<Summary, SimulationError>
where
    P: Policy + ?Sized,
    U: RoundEventHandler + ?Sized,
{
    if games == 0 {
        return Err(SimulationError::InvalidConfiguration(String::from(
            "games must be at least 1",
        )));
    }
    rule.validate()?;

    log::debug!(
        "{:<32}{} games, seed {}",
        format!("simulating {}", policy.name()),
        games,
        seed
    );
    let mut deck = InfiniteDeck::new(seed);
    let mut tally = Tally::default();
    for _ in 0..games {
        let result = Round::new(rule, &mut deck).play(policy, handler)?;
        tally.record(&result);
    }

    let summary = tally.into_summary()?;
    log::debug!(
        "{:<32}avg profit {:.5}",
        format!("finished {}", policy.name()),
        summary.profit_avg
    );
    Ok(summary)
}
