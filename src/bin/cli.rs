//! Letterboxd list scraper CLI
//!
//! Scrapes one or more lists, watchlists, film pages or cast/crew rosters
//! into CSV or JSON files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use listscraper::{
    error::{AppError, Result},
    models::{Config, OutputFormat, RawTarget, ScrapeMode},
    pipeline::{self, JobDefaults, ScrapeOptions},
    services::ListScraper,
    storage::LocalSink,
    utils::http::HttpFetcher,
};

/// Configuration picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "listscraper.toml";

/// listscraper - Letterboxd list scraper
#[derive(Parser, Debug)]
#[command(
    name = "listscraper",
    version,
    about = "Scrapes Letterboxd lists into CSV or JSON files",
    after_help = "Page selection syntax (-p):\n  \
        1        page 1\n  \
        1,3,5    pages 1, 3 and 5\n  \
        1~3      pages 1, 2 and 3\n  \
        '<3,5'   pages 1, 2 and 5\n  \
        '*'      all pages (default)"
)]
struct Cli {
    /// List URLs to scrape
    #[arg(value_name = "LIST_URL", conflicts_with = "file")]
    urls: Vec<String>,

    /// Text file with one list URL (and optional -p / -on flags) per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Pages to scrape for lists without their own selection
    #[arg(short, long, default_value = "*")]
    pages: String,

    /// Output file name (without extension)
    #[arg(short = 'n', long)]
    output_name: Option<String>,

    /// Directory for the output files
    #[arg(short, long)]
    output_path: Option<PathBuf>,

    /// Output format: csv or json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Field set: full or basic
    #[arg(long)]
    mode: Option<ScrapeMode>,

    /// Write all lists into one file with an extra List_URL column
    #[arg(long)]
    concat: bool,

    /// Number of lists scraped concurrently
    #[arg(long)]
    threads: Option<usize>,

    /// Abort on the first invalid input instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to a TOML configuration file (default: ./listscraper.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Initialize logging based on verbosity flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (_, true) => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Apply command line overrides on top of the loaded configuration.
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(dir) = &cli.output_path {
        config.output.dir = dir.display().to_string();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(mode) = cli.mode {
        config.output.mode = mode;
    }
    if let Some(threads) = cli.threads {
        config.crawler.max_concurrent = threads;
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    log::info!("Letterboxd list scraper starting...");

    let mut config = match &cli.config {
        Some(path) => Config::load(path).map_err(|e| {
            AppError::config(format!("cannot load {}: {}", path.display(), e))
        })?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load_or_default(DEFAULT_CONFIG),
        None => Config::default(),
    };
    apply_overrides(&cli, &mut config);
    config.validate()?;

    let inputs: Vec<RawTarget> = match &cli.file {
        Some(path) => pipeline::read_targets(path).await?,
        None => cli.urls.iter().map(RawTarget::new).collect(),
    };
    if inputs.is_empty() {
        return Err(AppError::usage(
            "no list URLs were provided, pass URLs or --file (see --help)",
        ));
    }

    if let Some(path) = &cli.file {
        log::info!("    infile:      {}", path.display());
    }
    log::info!("    output_path: {}", config.output.dir);
    log::info!("    format:      {}", config.output.format.extension());
    log::info!("    concat:      {}", cli.concat);
    log::info!("    threads:     {}", config.crawler.max_concurrent);

    let fetcher = Arc::new(HttpFetcher::from_config(&config.crawler)?);
    let scraper = ListScraper::from_config(&config, fetcher)?;
    let sink = LocalSink::new(&config.output.dir, config.output.format);

    let options = ScrapeOptions {
        defaults: JobDefaults {
            pages: cli.pages.clone(),
            output_name: cli.output_name.clone(),
            format: config.output.format,
            concatenate: cli.concat,
        },
        concurrency: config.crawler.max_concurrent,
        strict: cli.strict,
    };

    let summary = pipeline::run_scrape(&inputs, &options, &scraper, &sink).await?;

    log::info!(
        "Done! {} of {} lists scraped, output in {}",
        summary.jobs_ok(),
        summary.jobs_total,
        sink.root_dir().display()
    );
    log::info!(
        "Total run time was {:.2} seconds",
        summary.elapsed().num_milliseconds() as f64 / 1000.0
    );

    Ok(())
}
