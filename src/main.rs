mod cli;
mod config;
mod engine;
mod error;
mod loader;
mod rank;
mod report;
mod types;

use crate::error::{Result, ScreenError};
use crate::types::config::{MissingPolicy, ScoreMode, ScoringConfig};
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const NO_MATCHES: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
        cli::ReportFormat::Csv => report::OutputFormat::Csv,
    }
}

fn request_config(
    config_path: Option<&std::path::Path>,
    preset: Option<&cli::PresetArg>,
    score_mode: Option<&cli::ScoreModeArg>,
    missing_policy: Option<&cli::MissingPolicyArg>,
) -> Result<ScoringConfig> {
    let mut config = config::resolve_request(config_path, preset.map(cli::PresetArg::name))?;
    if let Some(mode) = score_mode {
        config.score_mode = match mode {
            cli::ScoreModeArg::Discrete => ScoreMode::DiscreteTier,
            cli::ScoreModeArg::Linear => ScoreMode::LinearNormalize,
        };
    }
    if let Some(policy) = missing_policy {
        config.missing_policy = match policy {
            cli::MissingPolicyArg::Zero => MissingPolicy::TreatAsZero,
            cli::MissingPolicyArg::Exclude => MissingPolicy::ExcludeMetric,
        };
    }
    Ok(config)
}

fn universe(cmd: &cli::ScreenCommand) -> rank::Universe {
    match cmd.universe {
        cli::UniverseArg::All => rank::Universe::All,
        cli::UniverseArg::LargeCap => rank::Universe::LargeCap,
        cli::UniverseArg::MidCap => rank::Universe::MidCap,
        cli::UniverseArg::SmallCap => rank::Universe::SmallCap,
        cli::UniverseArg::Value => rank::Universe::Value,
        cli::UniverseArg::Growth => rank::Universe::Growth,
        cli::UniverseArg::Sector => {
            rank::Universe::Sector(cmd.sector.clone().unwrap_or_default())
        }
        cli::UniverseArg::Custom => rank::Universe::Custom(cmd.tickers.clone()),
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Screen(cmd) => {
            let config = request_config(
                cmd.config.as_deref(),
                cmd.preset.as_ref(),
                cmd.score_mode.as_ref(),
                cmd.missing_policy.as_ref(),
            )?;
            let snapshots = loader::load_snapshots(&cmd.input)?;
            let resolved = config.resolve();
            let results = engine::score_batch(&snapshots, &resolved);

            let params = rank::RankParams {
                universe: universe(&cmd),
                search: cmd.search.clone(),
                required_flags: cmd.flags.clone(),
                flag_mode: match cmd.flag_mode {
                    cli::FlagModeArg::Any => rank::FlagMode::Any,
                    cli::FlagModeArg::All => rank::FlagMode::All,
                },
                exclude_negative: cmd.exclude_negative,
                top_n: cmd.top,
                show_all: cmd.show_all,
            };
            let ranked = rank::rank(results, &params);

            let rendered = report::render(&ranked, output_format(&cmd.format))?;
            println!("{rendered}");

            if ranked.is_empty() {
                eprintln!("warning: no stocks matched the selected filters");
                Ok(exit_code::NO_MATCHES)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Score(cmd) => {
            let config = request_config(
                cmd.config.as_deref(),
                cmd.preset.as_ref(),
                cmd.score_mode.as_ref(),
                cmd.missing_policy.as_ref(),
            )?;
            let snapshots = loader::load_snapshots(&cmd.input)?;
            let snapshot = snapshots
                .iter()
                .find(|snapshot| snapshot.symbol.eq_ignore_ascii_case(&cmd.symbol))
                .ok_or_else(|| ScreenError::SymbolNotFound(cmd.symbol.clone()))?;

            let result = engine::score_snapshot(snapshot, &config.resolve());
            let rendered = report::render_single(&result, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Factors(cmd) => {
            let config = request_config(cmd.config.as_deref(), cmd.preset.as_ref(), None, None)?;
            let snapshots = loader::load_snapshots(&cmd.input)?;
            let results = engine::score_batch(&snapshots, &config.resolve());

            println!("{}", report::md::factor_sublists(&results, cmd.top));
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
