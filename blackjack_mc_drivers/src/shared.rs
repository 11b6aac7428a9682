pub mod comparison;
pub mod report;

use blackjack_mc::{
    BasicStrategyPolicy, Policy, RandomPolicy, Rule, SimulationError, ThresholdPolicy,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot find home directory")]
    NoHomeDirectory,

    #[error("{0} should be a file rather than a directory")]
    ConfigIsDirectory(String),

    #[error("cannot build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rule: Rule,
    #[serde(default)]
    pub simulator: ConfigSimulator,
}

impl Config {
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.rule.validate()?;
        if self.simulator.games_per_policy == 0 {
            return Err(SimulationError::InvalidConfiguration(String::from(
                "games_per_policy must be at least 1",
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSimulator {
    /// 0 means one thread per core.
    pub number_of_threads: usize,
    pub games_per_policy: u64,
    /// Policy `i` is simulated with seed `base_seed + i`.
    pub base_seed: u64,
    pub policies: Vec<ConfigPolicy>,
}

impl Default for ConfigSimulator {
    fn default() -> Self {
        ConfigSimulator {
            number_of_threads: 0,
            games_per_policy: 50_000,
            base_seed: 100,
            policies: vec![
                ConfigPolicy::Random { seed: 1 },
                ConfigPolicy::Threshold { threshold: 17 },
                ConfigPolicy::Threshold { threshold: 16 },
                ConfigPolicy::BasicStrategy,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ConfigPolicy {
    Random { seed: u64 },
    Threshold { threshold: u16 },
    BasicStrategy,
}

impl ConfigPolicy {
    pub fn build(&self) -> Box<dyn Policy> {
        match *self {
            ConfigPolicy::Random { seed } => Box::new(RandomPolicy::new(seed)),
            ConfigPolicy::Threshold { threshold } => Box::new(ThresholdPolicy::new(threshold)),
            ConfigPolicy::BasicStrategy => Box::new(BasicStrategyPolicy::new()),
        }
    }
}

/// Parses and validates a YAML config.
pub fn parse_config_from_str(content: &str) -> Result<Config, DriverError> {
    let config: Config = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file<P: AsRef<Path>>(filename: P) -> Result<Config, DriverError> {
    let filename = filename.as_ref();
    if filename.is_dir() {
        return Err(DriverError::ConfigIsDirectory(filename.display().to_string()));
    }
    let file_content = fs::read_to_string(filename).map_err(|source| DriverError::ReadFile {
        path: filename.display().to_string(),
        source,
    })?;
    parse_config_from_str(&file_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPICAL_CONFIG: &str = r#"
rule:
  dealer_hit_on_soft17: true
  payout_blackjack: 1.2
  bet: 10.0
simulator:
  number_of_threads: 2
  games_per_policy: 1000
  base_seed: 7
  policies:
    - kind: Random
      seed: 3
    - kind: Threshold
      threshold: 15
    - kind: BasicStrategy
"#;

    #[test]
    fn can_parse_config() {
        let config = parse_config_from_str(TYPICAL_CONFIG).unwrap();
        assert_eq!(
            config.rule,
            Rule {
                dealer_hit_on_soft17: true,
                payout_blackjack: 1.2,
                bet: 10.0,
            }
        );
        assert_eq!(config.simulator.number_of_threads, 2);
        assert_eq!(config.simulator.games_per_policy, 1000);
        assert_eq!(config.simulator.base_seed, 7);
        assert_eq!(
            config.simulator.policies,
            vec![
                ConfigPolicy::Random { seed: 3 },
                ConfigPolicy::Threshold { threshold: 15 },
                ConfigPolicy::BasicStrategy,
            ]
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = parse_config_from_str("simulator:\n  games_per_policy: 10\n").unwrap();
        assert_eq!(config.rule, Rule::default());
        assert_eq!(config.simulator.games_per_policy, 10);
        assert_eq!(config.simulator.base_seed, 100);
        assert_eq!(config.simulator.policies.len(), 4);
    }

    #[test]
    fn should_return_error_on_unknown_policy() {
        let content = "simulator:\n  policies:\n    - kind: CardCounting\n";
        assert!(matches!(
            parse_config_from_str(content),
            Err(DriverError::Yaml(_))
        ));
    }

    #[test]
    fn should_return_error_on_invalid_rule() {
        let content = "rule:\n  bet: -5.0\n";
        assert!(matches!(
            parse_config_from_str(content),
            Err(DriverError::Simulation(SimulationError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn should_return_error_on_zero_games() {
        let content = "simulator:\n  games_per_policy: 0\n";
        assert!(parse_config_from_str(content).is_err());
    }

    #[test]
    fn default_config_matches_reference_comparison() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        let names: Vec<String> = config
            .simulator
            .policies
            .iter()
            .map(|p| p.build().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "RandomPolicy",
                "ThresholdPolicy(threshold=17)",
                "ThresholdPolicy(threshold=16)",
                "BasicStrategyPolicy(no-split-no-double)",
            ]
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = parse_config_from_file("/definitely/not/here/blackjack_mc.yml");
        assert!(matches!(result, Err(DriverError::ReadFile { .. })));
    }
}
