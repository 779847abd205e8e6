//! cinefetch - batch movie/TV metadata lookup CLI.

/// Application configuration (TOML).
mod config;
/// CSV input and output helpers.
mod table;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TextConfig, TmdbConfig, resolve_config_path};
use cinefetch_api::fetch::{MediaKind, QueryItem, fetch_queries, fetch_single};
use cinefetch_api::tmdb::TmdbClient;
use cinefetch_text::{Lemmatizer, StopwordFilter, TextNormalizer};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Look up every row of a `title,year,kind` CSV on TMDB.
    Search(SearchArgs),
    /// Look up a single title on TMDB.
    Lookup(LookupArgs),
    /// Remove stopwords from and lemmatize a CSV column.
    Normalize(NormalizeArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Output format of the `search` subcommand.
#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

/// Media type accepted on the command line.
#[derive(Clone, Copy, Default, ValueEnum)]
enum KindArg {
    /// Feature film.
    #[default]
    Movie,
    /// TV series.
    #[value(alias = "tv")]
    Show,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => Self::Movie,
            KindArg::Show => Self::Show,
        }
    }
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Input CSV with `title,year,kind` columns.
    #[arg(long)]
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

/// Arguments for the `lookup` subcommand.
#[derive(clap::Args)]
struct LookupArgs {
    /// Title to search for.
    #[arg(long)]
    title: String,

    /// Release year (movies only).
    #[arg(long)]
    year: Option<u32>,

    /// Media type.
    #[arg(long, value_enum, default_value_t)]
    kind: KindArg,
}

/// Arguments for the `normalize` subcommand.
#[derive(clap::Args)]
struct NormalizeArgs {
    /// Input CSV.
    #[arg(long)]
    input: PathBuf,

    /// Column to normalize.
    #[arg(long)]
    column: String,

    /// Output file (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Keep stopwords.
    #[arg(long)]
    no_stopwords: bool,

    /// Skip lemmatization.
    #[arg(long)]
    no_lemmatize: bool,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration.
    Show,
}

/// Loads the config file from `dir` or the default location.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set, the configured base URL
/// is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &TmdbConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(base_url) = &config.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid tmdb.base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(language) = &config.language {
        builder = builder.language(language);
    }

    builder.build().context("failed to build TMDB client")
}

/// Builds the text normalizer from config and command-line switches.
fn build_normalizer(config: &TextConfig, args: &NormalizeArgs) -> TextNormalizer {
    let mut stopwords = StopwordFilter::for_language(&config.language);
    stopwords.add_stopwords(config.extra_stopwords.as_slice());

    TextNormalizer::new(stopwords, Lemmatizer::english())
        .with_stopword_removal(config.remove_stopwords && !args.no_stopwords)
        .with_lemmatization(config.lemmatize && !args.no_lemmatize)
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the input cannot be read, any lookup fails, or the
/// output cannot be written. Nothing is written when a lookup fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;

    let queries = table::read_queries(table::open_input(&args.input)?)
        .with_context(|| format!("failed to read queries from {}", args.input.display()))?;
    tracing::info!("Looking up {} queries", queries.len());

    let results = fetch_queries(&client, &queries)
        .await
        .context("batch lookup failed")?;

    let mut out = table::open_output(args.output.as_ref())?;
    match args.format {
        OutputFormat::Csv => results.write_csv(&mut out)?,
        OutputFormat::Json => results.write_json(&mut out)?,
    }

    tracing::info!(
        "Matched {} of {} queries",
        results.matched(),
        results.len()
    );
    Ok(())
}

/// Runs the `lookup` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_lookup(args: &LookupArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;

    let query = QueryItem::new(&args.title, args.year, args.kind.into());
    let record = fetch_single(&client, &query)
        .await
        .context("TMDB lookup failed")?;

    if !record.is_match() {
        tracing::info!("No match for {:?}", record.title);
        return Ok(());
    }

    tracing::info!("Title:      {}", record.title);
    tracing::info!("TMDB ID:    {}", record.provider_id.unwrap_or_default());
    tracing::info!("Date:       {}", record.year.as_deref().unwrap_or("-"));
    tracing::info!(
        "Rating:     {:.1} ({} votes)",
        record.rating_average.unwrap_or_default(),
        record.rating_count.unwrap_or_default()
    );
    tracing::info!("Popularity: {:.3}", record.popularity.unwrap_or_default());
    tracing::info!("Overview:   {}", record.synopsis.as_deref().unwrap_or("-"));

    Ok(())
}

/// Runs the `normalize` subcommand.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the column is missing, or
/// the output cannot be written.
#[instrument(skip_all)]
fn run_normalize(args: &NormalizeArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let normalizer = build_normalizer(&config.text, args);

    let input = table::open_input(&args.input)?;
    let mut out = table::open_output(args.output.as_ref())?;
    let rows = table::normalize_csv_column(input, &mut out, &args.column, &normalizer)
        .with_context(|| format!("failed to normalize {}", args.input.display()))?;
    out.flush().context("failed to flush output")?;

    tracing::info!("Normalized column {:?} in {} rows", args.column, rows);
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists without `force`, or the write fails.
#[instrument(skip_all)]
fn run_config_init(force: bool, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    AppConfig::default()
        .save(&config_path)
        .context("failed to save config")?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let rendered = toml::to_string_pretty(&config).context("failed to serialize config")?;

    tracing::info!("Config file: {}", config_path.display());
    for line in rendered.lines() {
        tracing::info!("  {line}");
    }
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Lookup(args) => run_lookup(&args, dir).await,
        Commands::Normalize(args) => run_normalize(&args, dir),
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init { force } => run_config_init(force, dir),
            ConfigSubcommands::Show => run_config_show(dir),
        },
    }
}
