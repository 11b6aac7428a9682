use blackjack_mc_drivers::{
    comparison::compare_policies,
    parse_config_from_file,
    report::{format_header, format_summary, reports_from_runs, write_report},
    Config, DriverError,
};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = ".blackjack_mc.yml";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file. Defaults to ~/.blackjack_mc.yml, or to
    /// built-in settings if that file does not exist
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of games simulated per policy, overriding the config
    #[arg(short, long)]
    games: Option<u64>,

    /// Base seed, overriding the config. Policy i uses base seed + i
    #[arg(short, long)]
    seed: Option<u64>,

    /// Writes the summaries of all finished policies to this YAML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Logs every round. Only visible with --log-level trace
    #[arg(long)]
    trace_rounds: bool,
}

fn main() {
    let args = CommandLineArgs::parse();
    init_logger(args.log_level.into());

    if let Err(err) = run(args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: CommandLineArgs) -> Result<(), DriverError> {
    let mut config = load_config(args.config)?;
    if let Some(games) = args.games {
        config.simulator.games_per_policy = games;
    }
    if let Some(seed) = args.seed {
        config.simulator.base_seed = seed;
    }
    config.validate()?;
    log::debug!("{:#?}", config);

    print!(
        "{}",
        format_header(&config.rule, config.simulator.games_per_policy)
    );
    let runs = compare_policies(&config.rule, &config.simulator, args.trace_rounds)?;
    for run in &runs {
        if let Ok(summary) = &run.outcome {
            print!("{}", format_summary(&run.name, summary));
        }
    }

    if let Some(path) = args.output {
        let reports = reports_from_runs(&runs);
        write_report(&path, &reports)?;
        log::info!("{:<32}{}", "saving report", path.display());
    }
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config, DriverError> {
    if let Some(path) = path {
        return parse_config_from_file(path);
    }

    let home_dir = home::home_dir().ok_or(DriverError::NoHomeDirectory)?;
    let config_file_path = home_dir.join(DEFAULT_CONFIG_FILE);
    if !config_file_path.exists() {
        log::info!(
            "{:<32}{} not found",
            "using default config",
            config_file_path.display()
        );
        return Ok(Config::default());
    }
    parse_config_from_file(config_file_path)
}

fn init_logger(level: LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    if let Err(err) = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("cannot initialize logger: {}", err);
    }
}
