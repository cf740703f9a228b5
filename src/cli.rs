//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvStockAdapter;
use crate::adapters::default_stocks::{DEFAULT_EXCHANGE_NAME, DEFAULT_STOCKS_CSV};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{validate_exchange_config, EXCHANGE_SECTION};
use crate::domain::error::StockexError;
use crate::domain::stock::DEFAULT_VWSP_MAX_AGE_SECONDS;
use crate::domain::stock_index::StockIndex;
use crate::domain::symbols::parse_symbols;
use crate::ports::config_port::ConfigPort;
use crate::ports::stock_data_port::StockDataPort;
use crate::shell::{run_shell, write_stock_table};

#[derive(Parser, Debug)]
#[command(name = "stockex", about = "Super simple stock market calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive menu
    Shell {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the stocks on the exchange
    List {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate an exchange configuration and its stock table
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Exchange settings resolved from `[exchange]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeSettings {
    pub name: String,
    pub vwsp_max_age_seconds: u64,
    pub stocks_file: Option<PathBuf>,
    pub symbols: Option<Vec<String>>,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        ExchangeSettings {
            name: DEFAULT_EXCHANGE_NAME.to_string(),
            vwsp_max_age_seconds: DEFAULT_VWSP_MAX_AGE_SECONDS,
            stocks_file: None,
            symbols: None,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Shell { config } => run_interactive(config.as_deref()),
        Command::List { config } => run_list(config.as_deref()),
        Command::Validate { config } => run_validate(&config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_interactive(config: Option<&Path>) -> Result<(), StockexError> {
    let mut index = load_index(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_shell(&mut index, stdin.lock(), stdout.lock())?;
    Ok(())
}

fn run_list(config: Option<&Path>) -> Result<(), StockexError> {
    let index = load_index(config)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", index.name())?;
    write_stock_table(&index, &mut out)?;
    Ok(())
}

fn run_validate(config: &Path) -> Result<(), StockexError> {
    let index = load_index(Some(config))?;
    println!(
        "Configuration OK: {} stocks on {}",
        index.len(),
        index.name()
    );
    Ok(())
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, StockexError> {
    FileConfigAdapter::from_file(path).map_err(|e| StockexError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Build the index from an optional config file, falling back to the
/// built-in exchange.
pub fn load_index(config: Option<&Path>) -> Result<StockIndex, StockexError> {
    let settings = match config {
        Some(path) => {
            tracing::info!("loading config from {}", path.display());
            let adapter = load_config(path)?;
            build_exchange_settings(&adapter, path.parent())?
        }
        None => ExchangeSettings::default(),
    };

    let index = match &settings.stocks_file {
        Some(file) => {
            tracing::info!("loading stock table from {}", file.display());
            build_stock_index(&settings, &CsvStockAdapter::from_file(file.clone()))?
        }
        None => build_stock_index(
            &settings,
            &CsvStockAdapter::from_content("built-in stock table", DEFAULT_STOCKS_CSV),
        )?,
    };
    tracing::info!(
        exchange = %index.name(),
        stocks = index.len(),
        "stock index ready"
    );
    Ok(index)
}

/// Read `[exchange]`, resolving a relative `stocks_file` against `base_dir`.
pub fn build_exchange_settings(
    adapter: &dyn ConfigPort,
    base_dir: Option<&Path>,
) -> Result<ExchangeSettings, StockexError> {
    validate_exchange_config(adapter)?;

    let defaults = ExchangeSettings::default();
    let name = adapter
        .get_string(EXCHANGE_SECTION, "name")
        .map(|s| s.trim().to_string())
        .unwrap_or(defaults.name);

    let vwsp_max_age_seconds = read_vwsp_max_age(adapter)?;

    let stocks_file = adapter
        .get_string(EXCHANGE_SECTION, "stocks_file")
        .map(|s| {
            let path = PathBuf::from(s.trim());
            match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            }
        });

    let symbols = adapter
        .get_string(EXCHANGE_SECTION, "symbols")
        .map(|s| {
            parse_symbols(&s).map_err(|e| StockexError::ConfigInvalid {
                section: EXCHANGE_SECTION.to_string(),
                key: "symbols".to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    Ok(ExchangeSettings {
        name,
        vwsp_max_age_seconds,
        stocks_file,
        symbols,
    })
}

fn read_vwsp_max_age(adapter: &dyn ConfigPort) -> Result<u64, StockexError> {
    let raw = adapter.get_int(
        EXCHANGE_SECTION,
        "vwsp_max_age",
        DEFAULT_VWSP_MAX_AGE_SECONDS as i64,
    );
    u64::try_from(raw)
        .ok()
        .filter(|seconds| *seconds > 0)
        .ok_or_else(|| StockexError::ConfigInvalid {
            section: EXCHANGE_SECTION.to_string(),
            key: "vwsp_max_age".to_string(),
            reason: format!("{raw} is not a positive number of seconds"),
        })
}

/// Load the stock table, keep the configured subset and apply the VWSP window.
pub fn build_stock_index(
    settings: &ExchangeSettings,
    data: &dyn StockDataPort,
) -> Result<StockIndex, StockexError> {
    let mut stocks = data.load_stocks()?;

    if let Some(symbols) = &settings.symbols {
        if let Some(missing) = symbols
            .iter()
            .find(|sym| !stocks.iter().any(|s| s.symbol() == sym.as_str()))
        {
            return Err(StockexError::ConfigInvalid {
                section: EXCHANGE_SECTION.to_string(),
                key: "symbols".to_string(),
                reason: format!("symbol {missing} is not in the stock table"),
            });
        }
        stocks.retain(|s| symbols.iter().any(|sym| sym == s.symbol()));
    }

    let stocks = stocks
        .into_iter()
        .map(|s| s.with_vwsp_max_age(settings.vwsp_max_age_seconds))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StockIndex::new(settings.name.clone(), stocks)?)
}
