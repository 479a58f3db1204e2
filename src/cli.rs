use crate::services::{load_options, validate, ActivityLogger};
use crate::tools::batch::{crawl_all, CrawlJob};
use crate::tools::fetch::{build_fetcher, pacing_for};
use crate::tools::walk::{CrawlOutcome, Walker};
use crate::types::{Backend, CrawlOptions, ReadyMode};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

/// Best-sellers landing page; carousels grouped by department.
pub const BESTSELLERS_SUMMARY_URL: &str = "https://www.amazon.com/Best-Sellers/zgbs/ref=zg_bs_unv_pc_0_1";
pub const SUMMARY_CSV: &str = "amazon_best_sellers_summary.csv";
pub const CUSTOM_CSV: &str = "amazon_best_sellers_custom_category.csv";

#[derive(Parser)]
#[command(name = "shelfscrape", version, about = "Crawl paginated product listings into CSV")]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl one listing URL and every page after it
    Crawl(CrawlArgs),
    /// Crawl the best-sellers summary page, plus an optional category, concurrently
    Bestsellers(BestsellersArgs),
    /// Show past crawls, newest first
    Log(LogArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// JSON config file (default: ~/.shelfscrape/config.json if present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_pages: Option<usize>,
    /// Extra attempts per failed page
    #[arg(long)]
    retries: Option<u32>,
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,
    /// Browser backend: poll for items, or wait a fixed time
    #[arg(long, value_enum)]
    ready: Option<ReadyArg>,
    /// Fixed wait for `--ready settle`
    #[arg(long)]
    settle_ms: Option<u64>,
    /// Testing only: skip the randomized delay between requests
    #[arg(long, hide = true)]
    no_pacing: bool,
}

#[derive(Args)]
struct CrawlArgs {
    url: String,
    /// Write to this file instead of stdout
    #[arg(long, short)]
    out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct BestsellersArgs {
    /// Category best-sellers URL crawled alongside the summary page
    #[arg(long)]
    custom: Option<String>,
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct LogArgs {
    /// Only failed crawls
    #[arg(long)]
    errors: bool,
    /// Only lines containing this text (usually a URL or host)
    #[arg(long)]
    filter: Option<String>,
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    Http,
    Browser,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Http => Backend::Http,
            BackendArg::Browser => Backend::Browser,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReadyArg {
    AnyItem,
    Settle,
}

impl From<ReadyArg> for ReadyMode {
    fn from(arg: ReadyArg) -> Self {
        match arg {
            ReadyArg::AnyItem => ReadyMode::AnyItem,
            ReadyArg::Settle => ReadyMode::Settle,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Crawl(args) => crate::runtime::block_on(crawl_cmd(args))?,
        Command::Bestsellers(args) => crate::runtime::block_on(bestsellers_cmd(args))?,
        Command::Log(args) => log_cmd(args),
    }
}

/// Config file first, then flags on top.
fn resolve_options(common: &CommonArgs) -> anyhow::Result<CrawlOptions> {
    let mut options = load_options(common.config.as_deref())?;
    if let Some(max_pages) = common.max_pages {
        options.max_pages = max_pages;
    }
    if let Some(retries) = common.retries {
        options.page_retries = retries;
    }
    if let Some(backend) = common.backend {
        options.backend = backend.into();
    }
    if let Some(ready) = common.ready {
        options.ready = ready.into();
    }
    if let Some(settle_ms) = common.settle_ms {
        options.settle_ms = settle_ms;
    }
    validate(&options)?;
    Ok(options)
}

/// Token cancelled on the first Ctrl-C. Must be called inside the runtime.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current page");
            trigger.cancel();
        }
    });
    token
}

async fn crawl_cmd(args: CrawlArgs) -> anyhow::Result<ExitCode> {
    let options = resolve_options(&args.common)?;
    let cancel = cancel_on_ctrl_c();
    let fetcher = build_fetcher(&options).await?;
    let pacing = pacing_for(&options, !args.common.no_pacing);

    let outcome = Walker::new(fetcher.as_ref(), pacing.as_ref(), options)
        .with_cancellation(cancel)
        .walk(&args.url)
        .await;
    record("crawl", &args.url, &outcome);

    let body = match args.format {
        Format::Csv => outcome.dataset().to_csv_string()?,
        Format::Json => serde_json::to_string_pretty(&outcome)?,
    };
    match &args.out {
        Some(path) => {
            std::fs::write(path, body)?;
            eprintln!("wrote {}", path.display());
        }
        None => std::io::stdout().lock().write_all(body.as_bytes())?,
    }

    eprintln!("{}", outcome.summary());
    Ok(exit_code(&[&outcome]))
}

async fn bestsellers_cmd(args: BestsellersArgs) -> anyhow::Result<ExitCode> {
    let options = resolve_options(&args.common)?;
    let cancel = cancel_on_ctrl_c();
    let pacing = pacing_for(&options, !args.common.no_pacing);

    let mut jobs = vec![CrawlJob::new(
        SUMMARY_CSV,
        BESTSELLERS_SUMMARY_URL,
        build_fetcher(&options).await?,
    )];
    if let Some(custom) = &args.custom {
        jobs.push(CrawlJob::new(CUSTOM_CSV, custom.clone(), build_fetcher(&options).await?));
    }

    let concurrency = jobs.len();
    let results = crawl_all(jobs, concurrency, pacing.as_ref(), &options, &cancel).await;

    std::fs::create_dir_all(&args.out_dir)?;
    for result in &results {
        record("bestsellers", &result.url, &result.outcome);
        let path = args.out_dir.join(&result.label);
        result.outcome.dataset().save_csv(&path)?;
        eprintln!("{}: {}", path.display(), result.outcome.summary());
    }

    let outcomes: Vec<&CrawlOutcome> = results.iter().map(|r| &r.outcome).collect();
    Ok(exit_code(&outcomes))
}

fn log_cmd(args: LogArgs) -> anyhow::Result<ExitCode> {
    let logger = ActivityLogger::new()?;
    let lines = logger.read_logs(args.filter.as_deref(), args.errors)?;
    if lines.is_empty() {
        eprintln!("no entries in {}", logger.path().display());
    }
    for line in lines.iter().take(args.limit) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Activity log write; a broken log never fails the crawl.
fn record(label: &str, url: &str, outcome: &CrawlOutcome) {
    let result = ActivityLogger::new().and_then(|log| log.log_crawl(label, url, outcome));
    if let Err(e) = result {
        tracing::warn!(error = %e, "could not write activity log");
    }
}

fn exit_code(outcomes: &[&CrawlOutcome]) -> ExitCode {
    if outcomes.iter().all(|o| o.is_done()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_no_pacing_is_hidden_from_help() {
        let mut cmd = Cli::command();
        let crawl = cmd.find_subcommand_mut("crawl").unwrap();
        let arg = crawl
            .get_arguments()
            .find(|a| a.get_id() == "no_pacing")
            .unwrap();
        assert!(arg.is_hide_set());
        assert!(!crawl.render_help().to_string().contains("--no-pacing"));
    }

    #[test]
    fn test_ready_flags_override_config() {
        let cli = Cli::try_parse_from([
            "shelfscrape",
            "crawl",
            "https://www.amazon.com/s?k=lamp",
            "--ready",
            "settle",
            "--settle-ms",
            "1200",
        ])
        .unwrap();
        let Command::Crawl(args) = cli.cmd else {
            panic!("expected crawl command");
        };
        assert!(!args.common.no_pacing);

        let options = resolve_options(&args.common).unwrap();
        assert_eq!(options.ready, ReadyMode::Settle);
        assert_eq!(options.settle_ms, 1200);
    }
}
