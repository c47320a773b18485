mod render;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use appointment_board::AppointmentBoard;
use call_quality_board::CallQualityBoard;
use clap::{Parser, Subcommand, ValueEnum};
use leaderboard_core::{
    build_standings, decode_rows, Board, GroupOrder, MetricPolicy, RankOverrides,
};
use showup_board::ShowupBoard;
use task_board::TaskBoard;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank sales leaderboards and hand out crowns", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available boards
    List,
    /// Rank a JSON batch with one board
    Rank(RankArgs),
}

#[derive(clap::Args, Debug)]
struct RankArgs {
    /// Board to run (see `list`)
    #[arg(short, long)]
    board: String,

    /// JSON input file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// JSON file with ranking overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows to keep per group
    #[arg(long)]
    top: Option<usize>,

    /// Minimum on the board's qualifying field
    #[arg(long)]
    min: Option<f64>,

    /// Fail on non-numeric metrics instead of counting them as zero
    #[arg(long)]
    strict: bool,

    /// Comma separated group keys to show first
    #[arg(long, value_delimiter = ',')]
    group_order: Vec<String>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn registry() -> Vec<Box<dyn Board>> {
    vec![
        Box::new(AppointmentBoard),
        Box::new(ShowupBoard),
        Box::new(CallQualityBoard),
        Box::new(TaskBoard),
    ]
}

fn find_board(name: &str) -> Result<Box<dyn Board>> {
    registry()
        .into_iter()
        .find(|b| b.name() == name)
        .ok_or_else(|| {
            let known: Vec<&str> = registry().iter().map(|b| b.name()).collect();
            anyhow!("unknown board `{}` (known: {})", name, known.join(", "))
        })
}

impl RankArgs {
    fn overrides(&self) -> RankOverrides {
        RankOverrides {
            top_n: self.top,
            policy: self.strict.then_some(MetricPolicy::Strict),
            group_order: (!self.group_order.is_empty())
                .then(|| GroupOrder::Fixed(self.group_order.clone())),
            qualifier: None,
            min_qualifying: self.min,
        }
    }
}

fn load_overrides(path: &Path) -> Result<RankOverrides> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let overrides: RankOverrides = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config {:?}", path))?;
    Ok(overrides)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read input from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read input from {}", input))
}

fn handle_list() -> Result<()> {
    for board in registry() {
        let fields = board.fields();
        println!(
            "{:<14} {} ({} by {})",
            board.name(),
            board.title(),
            fields.metric,
            fields.group
        );
    }
    Ok(())
}

fn handle_rank(args: RankArgs) -> Result<()> {
    let board = find_board(&args.board)?;

    let mut overrides = RankOverrides::default();
    if let Some(path) = &args.config {
        overrides = load_overrides(path)?;
    }
    let overrides = overrides.layer(args.overrides());
    debug!(?overrides, board = board.name(), "resolved overrides");

    let raw = read_input(&args.input)?;
    let rows = decode_rows(&raw, &board.fields())
        .with_context(|| format!("Failed to decode input for board `{}`", board.name()))?;
    let report = build_standings(board.as_ref(), &rows, &overrides)
        .with_context(|| format!("Failed to rank board `{}`", board.name()))?;

    match args.format {
        Format::Table => print!("{}", render::render_table(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::List => handle_list(),
        Command::Rank(args) => handle_rank(args),
    }
}
