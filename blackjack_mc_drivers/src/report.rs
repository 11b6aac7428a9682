use blackjack_mc::{Rule, Summary};
use serde::{Deserialize, Serialize};
use std::{fmt::Write, fs, path::Path};

use crate::{comparison::PolicyRun, DriverError};

/// A `(policy name, summary)` pair, the unit chart renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyReport {
    pub name: String,
    pub seed: u64,
    pub summary: Summary,
}

/// Keeps only the runs that finished.
pub fn reports_from_runs(runs: &[PolicyRun]) -> Vec<PolicyReport> {
    runs.iter()
        .filter_map(|run| {
            run.outcome.as_ref().ok().map(|summary| PolicyReport {
                name: run.name.clone(),
                seed: run.seed,
                summary: *summary,
            })
        })
        .collect()
}

pub fn format_header(rule: &Rule, games: u64) -> String {
    format!(
        "Blackjack Monte Carlo Simulation\nRules: S17={}, BJ payout={}, bet={}\nSimulating {} games per policy ...\n",
        !rule.dealer_hit_on_soft17, rule.payout_blackjack, rule.bet, games
    )
}

pub fn format_summary(policy_name: &str, summary: &Summary) -> String {
    let mut text = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(text, "\n=== {} ===", policy_name);
    let _ = writeln!(text, "Games: {}", summary.games);
    let _ = writeln!(
        text,
        "Wins/Losses/Pushes: {}/{}/{}",
        summary.wins, summary.losses, summary.pushes
    );
    let _ = writeln!(
        text,
        "Win/Loss/Push rates: {:.3} / {:.3} / {:.3}",
        summary.win_rate, summary.loss_rate, summary.push_rate
    );
    let _ = writeln!(text, "Total profit: {:.2}", summary.profit_total);
    let _ = writeln!(text, "Average profit per game: {:.5}", summary.profit_avg);
    text
}

pub fn write_report<P: AsRef<Path>>(path: P, reports: &[PolicyReport]) -> Result<(), DriverError> {
    let path = path.as_ref();
    let content = serde_yaml::to_string(reports)?;
    fs::write(path, content).map_err(|source| DriverError::WriteFile {
        path: path.display().to_string(),
        source,
    })
}
