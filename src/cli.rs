use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quantiscreen",
    version,
    about = "Quantitative stock screening and ranking CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a snapshot batch and print the ranked screen
    Screen(ScreenCommand),
    /// Score a single symbol and print the full result
    Score(ScoreCommand),
    /// Print the top entities per factor lens
    Factors(FactorsCommand),
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Csv,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum PresetArg {
    Overall,
    Value,
    Growth,
    Momentum,
    Quality,
}

impl PresetArg {
    pub fn name(&self) -> &'static str {
        match self {
            PresetArg::Overall => "overall",
            PresetArg::Value => "value",
            PresetArg::Growth => "growth",
            PresetArg::Momentum => "momentum",
            PresetArg::Quality => "quality",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum UniverseArg {
    All,
    LargeCap,
    MidCap,
    SmallCap,
    Value,
    Growth,
    Sector,
    Custom,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum FlagModeArg {
    Any,
    All,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ScoreModeArg {
    Discrete,
    Linear,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum MissingPolicyArg {
    Zero,
    Exclude,
}

#[derive(Args)]
pub struct ScreenCommand {
    /// JSON file holding the snapshot batch
    pub input: PathBuf,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,

    /// TOML scoring config file
    #[arg(long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    #[arg(long, value_enum, default_value = "all")]
    pub universe: UniverseArg,

    /// Sector name, required for --universe sector
    #[arg(long, required_if_eq("universe", "sector"))]
    pub sector: Option<String>,

    /// Comma-separated ticker list, required for --universe custom
    #[arg(long, value_delimiter = ',', required_if_eq("universe", "custom"))]
    pub tickers: Vec<String>,

    /// Comma-separated flags a result must carry
    #[arg(long, value_delimiter = ',')]
    pub flags: Vec<String>,

    #[arg(long, value_enum, default_value = "any")]
    pub flag_mode: FlagModeArg,

    /// Drop results carrying Value Trap, High-Risk Growth or Debt Burden
    #[arg(long)]
    pub exclude_negative: bool,

    /// Substring match against symbol or company name
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value_t = 100)]
    pub top: usize,

    /// Ignore --top and print everything that matched
    #[arg(long)]
    pub show_all: bool,

    #[arg(long, value_enum)]
    pub score_mode: Option<ScoreModeArg>,

    #[arg(long, value_enum)]
    pub missing_policy: Option<MissingPolicyArg>,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// JSON file holding the snapshot batch
    pub input: PathBuf,

    /// Symbol to score
    pub symbol: String,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,

    #[arg(long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    #[arg(long, value_enum)]
    pub score_mode: Option<ScoreModeArg>,

    #[arg(long, value_enum)]
    pub missing_policy: Option<MissingPolicyArg>,
}

#[derive(Args)]
pub struct FactorsCommand {
    /// JSON file holding the snapshot batch
    pub input: PathBuf,

    #[arg(long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Entities listed per factor
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}
