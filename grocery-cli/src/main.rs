mod report;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use grocery_core::{
    AddTarget, EmbeddedSeed, Notification, Season, Session, SessionConfig, dollars_to_cents,
    fmt_currency,
};
use report::{BudgetTotals, PrintJob};

type CliSession = Session<Vec<Notification>>;

#[derive(Debug, Parser)]
#[command(name = "grocery-cli", version)]
#[command(about = "Seasonal grocery planner - add items to store lists and print them")]
struct Args {
    /// Season whose items are shown (Spring, Summer, Fall, Winter)
    #[arg(long)]
    season: Option<Season>,

    /// Print a single store by exact name instead of every store
    #[arg(long)]
    store: Option<String>,

    /// Add an item before printing, written as STORE=ITEM (repeatable)
    #[arg(long = "add", value_name = "STORE=ITEM")]
    adds: Vec<String>,

    /// Send every --add to this vendor of a market instead of its first vendor
    #[arg(long)]
    vendor: Option<String>,

    /// List the selectable seasons and exit
    #[arg(long)]
    list_seasons: bool,

    /// List store names with their budgets and exit
    #[arg(long)]
    list_stores: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "markdown", "json"])]
    report: String,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON file with session settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Estimated spend in dollars, shown next to the planned budget
    #[arg(long, value_name = "DOLLARS")]
    estimated_budget: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.output.is_some() {
        colored::control::set_override(false);
    }

    let config = resolve_config(&args)?;
    let mut session = Session::load(&EmbeddedSeed, config, Vec::new())?;

    if maybe_list(&args, &session)? {
        return Ok(());
    }

    apply_adds(&args, &mut session)?;
    write_report(&args, &session)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Defaults, then the `--config` file, then individual flags.
fn resolve_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SessionConfig::from_json(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(season) = args.season {
        config.default_season = season;
    }
    if let Some(dollars) = args.estimated_budget {
        config.estimated_budget_cents = dollars_to_cents(dollars)
            .ok_or_else(|| anyhow!("estimated budget must be a non-negative amount, got {dollars}"))?;
    }
    Ok(config)
}

fn maybe_list(args: &Args, session: &CliSession) -> Result<bool> {
    if !args.list_seasons && !args.list_stores {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    if args.list_seasons {
        writeln!(output_target.writer(), "Available seasons:")?;
        for season in session.list_seasons() {
            writeln!(output_target.writer(), "  {season}")?;
        }
    }
    if args.list_stores {
        writeln!(output_target.writer(), "Available stores:")?;
        for store in session.catalog().stores() {
            let kind = if store.is_composite() { "market" } else { "store" };
            writeln!(
                output_target.writer(),
                "  {:35} {:>12}  ({kind})",
                store.name,
                fmt_currency(store.budget_cents())
            )?;
        }
    }
    output_target.flush_inner()?;
    Ok(true)
}

/// Split `STORE=ITEM` at the first `=`. The item may be blank; the store may not.
fn parse_add(spec: &str) -> Result<(&str, &str)> {
    let (store, item) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("--add expects STORE=ITEM, got `{spec}`"))?;
    if store.trim().is_empty() {
        bail!("--add expects a store name before `=`, got `{spec}`");
    }
    Ok((store.trim(), item))
}

fn apply_adds(args: &Args, session: &mut CliSession) -> Result<()> {
    let target = args
        .vendor
        .as_deref()
        .map_or(AddTarget::Default, AddTarget::Vendor);
    for spec in &args.adds {
        let (store, item) = parse_add(spec)?;
        let (_, outcome) = session.add_item_to(store, target, item);
        log::debug!("add `{spec}` -> {outcome:?}");
    }
    Ok(())
}

fn write_report(args: &Args, session: &CliSession) -> Result<()> {
    let (stores, totals) = match &args.store {
        Some(name) => {
            let view = session.view(name).ok_or_else(|| {
                let known: Vec<&str> = session.catalog().store_names().collect();
                anyhow!("no store named `{name}` (known stores: {})", known.join(", "))
            })?;
            (vec![view], None)
        }
        None => (
            session.print_all(),
            Some(BudgetTotals {
                planned_budget_cents: session.planned_budget_cents(),
                estimated_budget_cents: session.estimated_budget_cents(),
            }),
        ),
    };
    let job = PrintJob {
        season: session.season(),
        notifications: session.sink(),
        stores,
        totals,
    };

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => report::generate_json_report(&mut output_target, &job)?,
        "markdown" => report::generate_markdown_report(&mut output_target, &job)?,
        _ => {
            announce_banner(&mut output_target)?;
            report::generate_console_report(&mut output_target, &job)?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

fn announce_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "🛒 Grocery Planner".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;
    writeln!(out)?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(writer) => writer,
            Self::File(writer) => writer,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(writer) => writer.flush(),
            Self::File(writer) => writer.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
