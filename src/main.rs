use statement::{
    cancel::CancelToken,
    error::StatementError,
    filter::{DateRange, Period, Selection},
    output::{JsonFileWriter, JsonWriter},
    service::StatementService,
    source::FileSource,
    transaction::parse_date,
};

use anyhow::{bail, Context};
use clap::Parser;
use std::io::{stderr, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Generate a financial statement (CSV → JSON) for a month or a date range.
///
/// The CSV file must start with the header `date,amount,content`; dates are
/// `YYYY/MM/DD` and amounts are integers in the smallest currency unit
/// (positive for income, negative for expenses).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Month in YYYYMM format (e.g. 202501).
    #[arg(short, long, required_unless_present = "from", conflicts_with_all = ["from", "to"])]
    period: Option<String>,

    /// First day of a custom range in YYYY/MM/DD format (inclusive).
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Last day of a custom range in YYYY/MM/DD format (inclusive).
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Path to the CSV file or a file:// URI.
    #[arg(short, long)]
    csv: String,

    /// Output JSON file path (default: stdout).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Timeout in seconds for processing.
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("could not start runtime")?;
    let result = runtime.block_on(run(args));
    // A read stuck past the timeout must not keep the process alive.
    runtime.shutdown_background();

    if let Err(error) = result {
        tracing::error!("Failed to generate statement: {error:#}");
        return Err(error);
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // stdout carries the statement itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal())
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let selection = parse_selection(&args)?;
    tracing::info!(period = %selection.label(), "Generating statement");
    tracing::debug!(csv = %args.csv, out = ?args.out, timeout = args.timeout, "Arguments");

    let timeout = Duration::from_secs(args.timeout);
    let cancel = CancelToken::with_timeout(timeout);

    let task = {
        let service = StatementService::new(FileSource);
        let cancel = cancel.clone();
        let csv = args.csv.clone();
        let out = args.out.clone();
        tokio::task::spawn_blocking(move || match out {
            Some(path) => {
                let mut writer = JsonFileWriter::new(path);
                service.write_statement(&csv, &selection, &cancel, &mut writer)
            }
            None => {
                let mut writer = JsonWriter::new(stdout().lock());
                service.write_statement(&csv, &selection, &cancel, &mut writer)
            }
        })
    };

    let generated = match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined.context("statement task failed")?,
        Err(_) => {
            cancel.cancel();
            tracing::debug!("Timed out after {}s", args.timeout);
            Err(StatementError::Cancelled)
        }
    };
    let statement =
        generated.with_context(|| format!("could not generate statement from {}", args.csv))?;

    tracing::debug!(
        transactions = statement.transaction_count,
        total_income = statement.total_income,
        total_expenditure = statement.total_expenditure,
        "Statement generated"
    );
    if let Some(path) = &args.out {
        tracing::info!(file = %path.display(), "Statement written");
    }

    Ok(())
}

fn parse_selection(args: &Args) -> anyhow::Result<Selection> {
    match (&args.period, &args.from, &args.to) {
        (Some(period), _, _) => {
            let period: Period = period.parse()?;
            Ok(period.into())
        }
        (None, Some(from), Some(to)) => {
            let start = parse_date(from).with_context(|| format!("invalid --from date {from:?}"))?;
            let end = parse_date(to).with_context(|| format!("invalid --to date {to:?}"))?;
            Ok(DateRange::checked(start, end)?.into())
        }
        _ => bail!("either --period or both --from and --to are required"),
    }
}
