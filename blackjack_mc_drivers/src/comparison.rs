use blackjack_mc::{
    simulate, simulate_with_handler, Decision, GameResult, Hand, Rank, RoundEventHandler, Rule,
    SimulationError, Summary,
};
use rayon::prelude::*;

use crate::{ConfigPolicy, ConfigSimulator, DriverError};

/// One policy's run in a comparison. A failed run keeps its error so that the
/// other policies can still be reported.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRun {
    pub name: String,
    pub seed: u64,
    pub outcome: Result<Summary, SimulationError>,
}

/// Simulates every configured policy, each on its own deck seeded with
/// `base_seed + index`. Runs are spread across a thread pool; results come
/// back in config order.
pub fn compare_policies(
    rule: &Rule,
    simulator_config: &ConfigSimulator,
    trace_rounds: bool,
) -> Result<Vec<PolicyRun>, DriverError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(simulator_config.number_of_threads)
        .build()?;

    log::info!(
        "{:<32}{} policies on {} threads",
        "comparing",
        simulator_config.policies.len(),
        pool.current_num_threads()
    );
    let runs = pool.install(|| {
        simulator_config
            .policies
            .par_iter()
            .enumerate()
            .map(|(index, config_policy)| {
                let seed = simulator_config.base_seed.wrapping_add(index as u64);
                run_policy(
                    rule,
                    config_policy,
                    simulator_config.games_per_policy,
                    seed,
                    trace_rounds,
                )
            })
            .collect::<Vec<PolicyRun>>()
    });
    Ok(runs)
}

fn run_policy(
    rule: &Rule,
    config_policy: &ConfigPolicy,
    games: u64,
    seed: u64,
    trace_rounds: bool,
) -> PolicyRun {
    let mut policy = config_policy.build();
    let name = policy.name().to_string();
    let outcome = if trace_rounds {
        let mut handler = TraceHandler::new(&name);
        simulate_with_handler(policy.as_mut(), games, seed, rule, &mut handler)
    } else {
        simulate(policy.as_mut(), games, seed, rule)
    };

    match &outcome {
        Ok(summary) => log::info!(
            "{:<32}avg profit {:.5}",
            format!("finished {}", name),
            summary.profit_avg
        ),
        Err(err) => log::error!("{:<32}{}", format!("skipping {}", name), err),
    }
    PolicyRun {
        name,
        seed,
        outcome,
    }
}

/// Logs every step of every round at trace level.
#[derive(Debug, Clone)]
pub struct TraceHandler {
    policy_name: String,
    round_id: u64,
    decisions: Vec<Decision>,
}

impl TraceHandler {
    pub fn new(policy_name: &str) -> Self {
        TraceHandler {
            policy_name: policy_name.to_string(),
            round_id: 0,
            decisions: Vec::new(),
        }
    }

    pub fn get_round_id(&self) -> u64 {
        self.round_id
    }
}

impl RoundEventHandler for TraceHandler {
    fn on_deal_cards(&mut self, player_hand: &Hand, dealer_up_card: Rank) {
        self.round_id += 1;
        self.decisions.clear();
        log::trace!(
            "{} round #{}: player {} against up card {}",
            self.policy_name,
            self.round_id,
            format_cards(player_hand),
            dealer_up_card
        );
    }

    fn on_make_decision(&mut self, decision: Decision, _: &Hand) {
        self.decisions.push(decision);
    }

    fn on_player_bust(&mut self, player_hand: &Hand) {
        log::trace!(
            "{} round #{}: player busts with {}",
            self.policy_name,
            self.round_id,
            format_cards(player_hand)
        );
    }

    fn on_round_settled(&mut self, result: &GameResult, player_hand: &Hand, dealer_hand: &Hand) {
        let decisions: Vec<String> = self.decisions.iter().map(|d| d.to_string()).collect();
        log::trace!(
            "{} round #{}: [{}] player {} ({}) dealer {} ({}) => {} {:+}",
            self.policy_name,
            self.round_id,
            decisions.join(" "),
            format_cards(player_hand),
            result.player_total,
            format_cards(dealer_hand),
            result.dealer_total,
            result.outcome,
            result.profit
        );
    }
}

fn format_cards(hand: &Hand) -> String {
    let cards: Vec<String> = hand.get_cards().iter().map(|c| c.to_string()).collect();
    cards.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_small_config() -> ConfigSimulator {
        ConfigSimulator {
            number_of_threads: 2,
            games_per_policy: 2000,
            base_seed: 100,
            ..Default::default()
        }
    }

    #[test]
    fn runs_come_back_in_config_order() {
        let rule = Rule::default();
        let runs = compare_policies(&rule, &get_small_config(), false).unwrap();
        let names: Vec<&str> = runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "RandomPolicy",
                "ThresholdPolicy(threshold=17)",
                "ThresholdPolicy(threshold=16)",
                "BasicStrategyPolicy(no-split-no-double)",
            ]
        );
        let seeds: Vec<u64> = runs.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![100, 101, 102, 103]);
        for run in &runs {
            let summary = run.outcome.as_ref().unwrap();
            assert_eq!(summary.wins + summary.losses + summary.pushes, 2000);
        }
    }

    #[test]
    fn parallel_runs_match_sequential_simulation() {
        let rule = Rule::default();
        let config = get_small_config();
        let runs = compare_policies(&rule, &config, false).unwrap();
        for (index, config_policy) in config.policies.iter().enumerate() {
            let mut policy = config_policy.build();
            let expected = simulate(policy.as_mut(), 2000, 100 + index as u64, &rule).unwrap();
            assert_eq!(runs[index].outcome, Ok(expected));
        }
    }

    #[test]
    fn tracing_does_not_change_results() {
        let rule = Rule::default();
        let config = get_small_config();
        let plain = compare_policies(&rule, &config, false).unwrap();
        let traced = compare_policies(&rule, &config, true).unwrap();
        assert_eq!(plain, traced);
    }

    #[test]
    fn trace_handler_counts_rounds() {
        let rule = Rule::default();
        let mut handler = TraceHandler::new("BasicStrategy");
        let mut policy = blackjack_mc::BasicStrategyPolicy::new();
        simulate_with_handler(&mut policy, 25, 1, &rule, &mut handler).unwrap();
        assert_eq!(handler.get_round_id(), 25);
    }
}
