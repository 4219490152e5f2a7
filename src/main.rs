use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use stockanalyzer::{
    prelude::*,
    utils::{format_price, format_trade_date, init_logger, parse_trade_date},
};

#[derive(Parser)]
#[command(name = "stockanalyzer")]
#[command(about = "Load daily stock price files and query them by symbol and date range")]
pub struct Cli {
    /// YAML config file (takes precedence over CONFIG_FILE)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print loaded records, optionally filtered by symbol and date range
    List {
        /// Price files; the symbol is the file name up to its first '.'
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Only records of this symbol (exact match)
        #[arg(short, long)]
        symbol: Option<String>,
        /// First date of the range (YYYY-MM-DD), inclusive
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<NaiveDate>,
        /// Last date of the range (YYYY-MM-DD), inclusive
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<NaiveDate>,
        /// Emit JSON instead of one line per record
        #[arg(long)]
        json: bool,
    },
    /// Print average high/low/volume for a symbol over a date range
    Average {
        /// Price files; the symbol is the file name up to its first '.'
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Symbol to average over (exact match)
        #[arg(short, long)]
        symbol: String,
        /// First date of the range (YYYY-MM-DD), inclusive
        #[arg(long, value_parser = parse_date_arg)]
        from: NaiveDate,
        /// Last date of the range (YYYY-MM-DD), inclusive
        #[arg(long, value_parser = parse_date_arg)]
        to: NaiveDate,
        /// Which average to print
        #[arg(long, value_enum, default_value_t = Field::All)]
        field: Field,
        /// Emit a JSON object instead of one line per average
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Field {
    High,
    Low,
    Volume,
    All,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_trade_date(s).map_err(|e| e.to_string())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::from_yaml(path),
        None => AnalyzerConfig::load(),
    }
}

fn load_files<R: StockRepository>(repo: &mut R, files: &[PathBuf]) -> anyhow::Result<usize> {
    let mut total = 0;
    for file in files {
        let loaded = repo
            .load(file)
            .with_context(|| format!("Failed to load {}", file.display()))?;
        total += loaded.len();
    }
    Ok(total)
}

fn select_records<R: StockRepository>(
    repo: &R,
    symbol: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> anyhow::Result<Vec<Stock>> {
    match (symbol, from, to) {
        (None, None, None) => Ok(repo.list_all()),
        (Some(symbol), None, None) => Ok(repo.list_by_symbol(symbol)),
        (Some(symbol), Some(from), Some(to)) => Ok(repo.list_by_symbol_in_range(symbol, from, to)),
        (None, _, _) => anyhow::bail!("--from/--to require --symbol"),
        (Some(_), _, _) => anyhow::bail!("--from and --to must be given together"),
    }
}

fn averages<R: StockRepository>(
    repo: &R,
    symbol: &str,
    from: NaiveDate,
    to: NaiveDate,
    field: Field,
) -> Result<Vec<(&'static str, f64)>, AnalyzerError> {
    let mut out = Vec::new();
    if matches!(field, Field::High | Field::All) {
        out.push(("high", repo.average_high(symbol, from, to)?));
    }
    if matches!(field, Field::Low | Field::All) {
        out.push(("low", repo.average_low(symbol, from, to)?));
    }
    if matches!(field, Field::Volume | Field::All) {
        out.push(("volume", repo.average_volume(symbol, from, to)?));
    }
    Ok(out)
}

fn main() -> anyhow::Result<()> {
    init_logger()?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let mut analyzer = StockAnalyzer::with_config(config)?;

    match cli.command {
        Commands::List {
            files,
            symbol,
            from,
            to,
            json,
        } => {
            load_files(&mut analyzer, &files)?;
            let records = select_records(&analyzer, symbol.as_deref(), from, to)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    println!("{}", record);
                }
            }
        }
        Commands::Average {
            files,
            symbol,
            from,
            to,
            field,
            json,
        } => {
            load_files(&mut analyzer, &files)?;
            let values = averages(&analyzer, &symbol, from, to, field).with_context(|| {
                format!(
                    "No averages for {} from {} to {}",
                    symbol,
                    format_trade_date(from),
                    format_trade_date(to)
                )
            })?;

            if json {
                let map: serde_json::Map<String, serde_json::Value> = values
                    .iter()
                    .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                    .collect();
                println!("{}", serde_json::Value::Object(map));
            } else {
                for (name, value) in &values {
                    println!("{}: {}", name, format_price(*value));
                }
            }
        }
    }

    Ok(())
}
