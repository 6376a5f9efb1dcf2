//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{validate_config, validate_sharpe_config};
use crate::domain::error::SharpeError;
use crate::domain::returns::{simple_returns, ReturnSeries};
use crate::domain::sharpe::{
    compute_sharpe_ratios, excess_return_series, RatioResult, SharpeConfig,
    TRADING_DAYS_PER_YEAR,
};
use crate::domain::stats::{StdConvention, Summary};
use crate::domain::time_series::{PriceSeries, TimeSeriesTable};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "sharpelab", about = "Sharpe ratios of stocks against a benchmark")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the price files come from. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Stock price CSV, relative to `[data] dir`
    #[arg(long)]
    pub stocks: Option<String>,
    /// Benchmark price CSV, relative to `[data] dir`
    #[arg(long)]
    pub benchmark: Option<String>,
    /// Benchmark column (default: first value column)
    #[arg(long)]
    pub benchmark_column: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute annualized Sharpe ratios
    Compute {
        #[command(flatten)]
        sources: SourceArgs,
        /// Use the population (N) standard deviation instead of sample (N-1)
        #[arg(long)]
        population: bool,
        /// Also write the results as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print summary statistics of prices, returns and excess returns
    Describe {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Resolved locations of the two input tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSources {
    pub dir: PathBuf,
    pub stocks: String,
    pub benchmark: String,
    pub benchmark_column: Option<String>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Compute {
            sources,
            population,
            output,
        } => run_compute(&sources, population, output.as_deref()),
        Command::Describe { sources } => run_describe(&sources),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// An empty config stands in when no `--config` is given.
fn load_optional_config(path: Option<&Path>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p)
        }
        None => FileConfigAdapter::from_string("").map_err(|err| ExitCode::from(&err)),
    }
}

pub fn build_sharpe_config(config: &dyn ConfigPort) -> Result<SharpeConfig, SharpeError> {
    validate_sharpe_config(config)?;

    let periods = config.get_int("sharpe", "periods_per_year", TRADING_DAYS_PER_YEAR as i64);
    let mut sharpe = SharpeConfig::from_periods(periods as f64);
    sharpe.annualization_factor =
        config.get_double("sharpe", "annualization_factor", sharpe.annualization_factor);

    if let Some(raw) = config
        .get_string("sharpe", "std_convention")
        .filter(|s| !s.trim().is_empty())
    {
        sharpe.std_convention =
            raw.parse::<StdConvention>()
                .map_err(|reason| SharpeError::ConfigInvalid {
                    section: "sharpe".into(),
                    key: "std_convention".into(),
                    reason,
                })?;
    }
    Ok(sharpe)
}

pub fn resolve_sources(
    args: &SourceArgs,
    config: &dyn ConfigPort,
) -> Result<DataSources, SharpeError> {
    let dir = config
        .get_string("data", "dir")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ".".to_string());

    let stocks = match &args.stocks {
        Some(s) => s.clone(),
        None => config.require_string("data", "stocks")?,
    };
    let benchmark = match &args.benchmark {
        Some(b) => b.clone(),
        None => config.require_string("data", "benchmark")?,
    };
    let benchmark_column = args.benchmark_column.clone().or_else(|| {
        config
            .get_string("data", "benchmark_column")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    });

    Ok(DataSources {
        dir: PathBuf::from(dir),
        stocks,
        benchmark,
        benchmark_column,
    })
}

/// The named column, or the first value column when no name is given.
pub fn select_benchmark(
    table: &TimeSeriesTable,
    column: Option<&str>,
) -> Result<PriceSeries, SharpeError> {
    let name = match column {
        Some(c) => c.to_string(),
        None => table
            .columns()
            .first()
            .cloned()
            .ok_or_else(|| SharpeError::ColumnNotFound {
                table: table.name().to_string(),
                column: "<first value column>".into(),
            })?,
    };
    table.column(&name)
}

pub fn load_inputs(
    data_port: &dyn DataPort,
    sources: &DataSources,
) -> Result<(TimeSeriesTable, PriceSeries), SharpeError> {
    let stocks = data_port.fetch_table(&sources.stocks)?;
    let bench_table = data_port.fetch_table(&sources.benchmark)?;
    let benchmark = select_benchmark(&bench_table, sources.benchmark_column.as_deref())?;

    eprintln!(
        "  Stocks:    {} rows, {} columns ({})",
        stocks.len(),
        stocks.columns().len(),
        stocks.columns().join(", ")
    );
    eprintln!("  Benchmark: {} rows ({})", benchmark.len(), benchmark.name);
    Ok((stocks, benchmark))
}

pub fn format_results_table(results: &BTreeMap<String, RatioResult>) -> String {
    let width = results.keys().map(String::len).max().unwrap_or(0).max(5);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>5}  {:>12}  {:>12}  {:>12}  {:>13}",
        "Asset", "Obs", "Mean excess", "Std excess", "Daily Sharpe", "Annual Sharpe"
    );
    for (asset, result) in results {
        match result {
            Ok(r) => {
                let _ = writeln!(
                    out,
                    "{:<width$}  {:>5}  {:>12.6}  {:>12.6}  {:>12.4}  {:>13.4}",
                    asset, r.observations, r.mean_excess, r.std_excess, r.daily, r.annual
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{:<width$}  {}: {}", asset, e.label(), e);
            }
        }
    }
    out
}

fn run_compute(args: &SourceArgs, population: bool, output: Option<&Path>) -> ExitCode {
    // Stage 1: Load config
    let config = match load_optional_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Stage 2: Resolve parameters and sources
    let mut sharpe = match build_sharpe_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if population {
        sharpe.std_convention = StdConvention::Population;
    }
    let sources = match resolve_sources(args, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Load price tables
    eprintln!("Loading prices from {}", sources.dir.display());
    let data_port = CsvAdapter::new(sources.dir.clone());
    let (stocks, benchmark) = match load_inputs(&data_port, &sources) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Compute ratios
    eprintln!(
        "Computing Sharpe ratios (factor {:.4}, {} std)",
        sharpe.annualization_factor, sharpe.std_convention
    );
    let results = compute_sharpe_ratios(&stocks, &benchmark, &sharpe);
    for err in results.values().filter_map(|r| r.as_ref().err()) {
        warn!(error = %err, "asset skipped");
    }

    // Stage 5: Print and report
    print!("{}", format_results_table(&results));

    if let Some(path) = output {
        if let Err(e) = CsvReportAdapter.write(&results, &sharpe, path) {
            eprintln!("error: failed to write report: {e}");
            return (&e).into();
        }
        eprintln!("\nReport written to: {}", path.display());
    }

    if results.values().any(Result::is_ok) {
        ExitCode::SUCCESS
    } else {
        let err = SharpeError::NoResults;
        eprintln!("error: {err}");
        (&err).into()
    }
}

pub fn format_summary_table(title: &str, columns: &[(String, Summary)]) -> String {
    let width = columns
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max(12);
    let mut out = format!("{title}\n{:<6}", "");
    for (name, _) in columns {
        let _ = write!(out, "  {:>width$}", name);
    }
    out.push('\n');

    let rows: [(&str, fn(&Summary) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q25),
        ("50%", |s| s.median),
        ("75%", |s| s.q75),
        ("max", |s| s.max),
    ];
    for (label, get) in rows {
        let _ = write!(out, "{:<6}", label);
        for (_, summary) in columns {
            let _ = write!(out, "  {:>width$.6}", get(summary));
        }
        out.push('\n');
    }
    out
}

fn summarize_prices(table: &TimeSeriesTable) -> Vec<(String, Summary)> {
    table
        .columns()
        .iter()
        .filter_map(|c| table.column(c).ok())
        .map(|s| (s.name.clone(), Summary::of(&s.values())))
        .collect()
}

fn summarize_returns(series: impl IntoIterator<Item = ReturnSeries>) -> Vec<(String, Summary)> {
    series
        .into_iter()
        .map(|r| (r.name.clone(), Summary::of(&r.values())))
        .collect()
}

/// Returns of every column, skipping columns with unusable prices.
fn column_returns(table: &TimeSeriesTable) -> Vec<ReturnSeries> {
    table
        .columns()
        .iter()
        .filter_map(|c| table.column(c).ok())
        .filter_map(|prices| match simple_returns(&prices) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(error = %e, "returns skipped");
                None
            }
        })
        .collect()
}

pub fn describe(stocks: &TimeSeriesTable, benchmark: &PriceSeries) -> String {
    let stocks = stocks.drop_missing();
    let mut bench_table = TimeSeriesTable::new("benchmark", vec![benchmark.name.clone()]);
    for (date, price) in &benchmark.points {
        // dates come from a map, so they are unique
        let _ = bench_table.insert_row(*date, vec![Some(*price)]);
    }

    let excess: Vec<ReturnSeries> = excess_return_series(&stocks, benchmark)
        .into_values()
        .filter_map(|r| match r {
            Ok(series) => Some(series),
            Err(e) => {
                warn!(error = %e, "excess returns skipped");
                None
            }
        })
        .collect();

    let sections = [
        ("Stock prices", summarize_prices(&stocks)),
        ("Benchmark prices", summarize_prices(&bench_table)),
        ("Stock returns", summarize_returns(column_returns(&stocks))),
        ("Benchmark returns", summarize_returns(column_returns(&bench_table))),
        ("Excess returns", summarize_returns(excess)),
    ];

    sections
        .iter()
        .map(|(title, cols)| format_summary_table(title, cols))
        .collect::<Vec<_>>()
        .join("\n")
}

fn run_describe(args: &SourceArgs) -> ExitCode {
    let config = match load_optional_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let sources = match resolve_sources(args, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading prices from {}", sources.dir.display());
    let data_port = CsvAdapter::new(sources.dir.clone());
    match load_inputs(&data_port, &sources) {
        Ok((stocks, benchmark)) => {
            print!("{}", describe(&stocks, &benchmark));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // validated above, so these cannot fail
    let (Ok(sharpe), Ok(sources)) = (
        build_sharpe_config(&config),
        resolve_sources(&SourceArgs::default(), &config),
    ) else {
        return ExitCode::from(2);
    };

    eprintln!("\nData:");
    eprintln!("  dir:       {}", sources.dir.display());
    eprintln!("  stocks:    {}", sources.stocks);
    eprintln!("  benchmark: {}", sources.benchmark);
    eprintln!(
        "  column:    {}",
        sources
            .benchmark_column
            .as_deref()
            .unwrap_or("(first value column)")
    );
    eprintln!("\nSharpe:");
    eprintln!("  annualization factor: {:.6}", sharpe.annualization_factor);
    eprintln!("  std convention:       {}", sharpe.std_convention);

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
