//! CLI integration tests.
//!
//! Tests cover:
//! - Exchange settings from INI config (defaults, overrides, validation)
//! - Stock table resolution (built-in, relative and absolute CSV paths)
//! - Symbol subsets and VWSP window applied to the index
//! - Interactive sessions against the built-in exchange

mod common;

use approx::assert_relative_eq;
use common::*;
use std::fs;
use std::path::{Path, PathBuf};
use stockex::adapters::default_stocks::DEFAULT_EXCHANGE_NAME;
use stockex::adapters::file_config_adapter::FileConfigAdapter;
use stockex::cli::{self, ExchangeSettings};
use stockex::domain::error::StockexError;
use stockex::domain::stock::{Stock, DEFAULT_VWSP_MAX_AGE_SECONDS};
use stockex::shell::run_shell;
use tempfile::TempDir;

const VALID_INI: &str = r#"
[exchange]
name = Test Beverage Exchange
vwsp_max_age = 300
stocks_file = stocks.csv
symbols = tea, gin
"#;

fn settings_from(ini: &str, base_dir: Option<&Path>) -> Result<ExchangeSettings, StockexError> {
    let adapter = FileConfigAdapter::from_string(ini).unwrap();
    cli::build_exchange_settings(&adapter, base_dir)
}

mod config_loading {
    use super::*;

    #[test]
    fn full_config() {
        let settings = settings_from(VALID_INI, Some(Path::new("/etc/stockex"))).unwrap();
        assert_eq!(settings.name, "Test Beverage Exchange");
        assert_eq!(settings.vwsp_max_age_seconds, 300);
        assert_eq!(
            settings.stocks_file,
            Some(PathBuf::from("/etc/stockex/stocks.csv"))
        );
        assert_eq!(
            settings.symbols,
            Some(vec!["TEA".to_string(), "GIN".to_string()])
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = settings_from("[exchange]\n", None).unwrap();
        assert_eq!(settings, ExchangeSettings::default());
        assert_eq!(settings.name, DEFAULT_EXCHANGE_NAME);
        assert_eq!(settings.vwsp_max_age_seconds, DEFAULT_VWSP_MAX_AGE_SECONDS);
    }

    #[test]
    fn absolute_stocks_file_kept() {
        let settings = settings_from(
            "[exchange]\nstocks_file = /data/stocks.csv\n",
            Some(Path::new("/etc/stockex")),
        )
        .unwrap();
        assert_eq!(settings.stocks_file, Some(PathBuf::from("/data/stocks.csv")));
    }

    #[test]
    fn invalid_vwsp_max_age() {
        let err = settings_from("[exchange]\nvwsp_max_age = 0\n", None).unwrap_err();
        assert!(
            matches!(err, StockexError::ConfigInvalid { key, .. } if key == "vwsp_max_age")
        );
    }

    #[test]
    fn duplicate_symbols() {
        let err = settings_from("[exchange]\nsymbols = TEA,POP,TEA\n", None).unwrap_err();
        assert!(matches!(err, StockexError::ConfigInvalid { key, .. } if key == "symbols"));
    }

    #[test]
    fn missing_config_file() {
        let err = cli::load_config(Path::new("/nonexistent/stockex.ini")).unwrap_err();
        assert!(matches!(err, StockexError::ConfigParse { .. }));
        assert_eq!(err.exit_status(), 2);
    }
}

mod index_building {
    use super::*;

    #[test]
    fn built_in_exchange_without_config() {
        let index = cli::load_index(None).unwrap();
        assert_eq!(index.name(), DEFAULT_EXCHANGE_NAME);
        let symbols: Vec<_> = index.stocks().map(|s| s.symbol()).collect();
        assert_eq!(symbols, vec!["ALE", "GIN", "JOE", "POP", "TEA"]);
    }

    #[test]
    fn config_with_relative_stock_table() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("stocks.csv"),
            format!("{STOCKS_HEADER}TEA,common,0,,100\nGIN,preferred,8,2,100\nPOP,common,8,,100\n"),
        )
        .unwrap();
        let config_path = dir.path().join("stockex.ini");
        fs::write(&config_path, VALID_INI).unwrap();

        let index = cli::load_index(Some(&config_path)).unwrap();
        assert_eq!(index.name(), "Test Beverage Exchange");
        assert_eq!(index.len(), 2);
        assert!(index.contains("TEA"));
        assert!(index.contains("GIN"));
        assert!(!index.contains("POP"));
        assert_eq!(index.get_stock("GIN").unwrap().vwsp_max_age_seconds(), 300);
    }

    #[test]
    fn config_without_stock_table_uses_built_in() {
        let file = write_temp_file("[exchange]\nname = Only Names\n");
        let index = cli::load_index(Some(file.path())).unwrap();
        assert_eq!(index.name(), "Only Names");
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn missing_stock_table() {
        let file = write_temp_file("[exchange]\nstocks_file = /nonexistent/stocks.csv\n");
        let err = cli::load_index(Some(file.path())).unwrap_err();
        assert!(matches!(err, StockexError::StockData { .. }));
        assert_eq!(err.exit_status(), 3);
    }

    #[test]
    fn symbol_not_in_table() {
        let settings = ExchangeSettings {
            symbols: Some(vec!["TEA".into(), "XYZ".into()]),
            ..ExchangeSettings::default()
        };
        let port = MockStockDataPort::new().with_stock(Stock::common("TEA", 0, 100).unwrap());
        let err = cli::build_stock_index(&settings, &port).unwrap_err();
        match err {
            StockexError::ConfigInvalid { key, reason, .. } => {
                assert_eq!(key, "symbols");
                assert!(reason.contains("XYZ"));
            }
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_symbols_in_table() {
        let port = MockStockDataPort::new()
            .with_stock(Stock::common("TEA", 0, 100).unwrap())
            .with_stock(Stock::common("TEA", 1, 100).unwrap());
        let err = cli::build_stock_index(&ExchangeSettings::default(), &port).unwrap_err();
        assert!(matches!(err, StockexError::Stock(_)));
        assert_eq!(err.exit_status(), 4);
    }

    #[test]
    fn data_port_error_propagates() {
        let port = MockStockDataPort::new().with_error("disk on fire");
        let err = cli::build_stock_index(&ExchangeSettings::default(), &port).unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
    }
}

mod interactive_session {
    use super::*;

    fn session(input: &str) -> String {
        let mut index = gbce_index();
        let mut out = Vec::new();
        run_shell(&mut index, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_session() {
        let input = "\
1\nGIN\n1\n\
2\nJOE\n26\n\
3\nale\n100\n50\n\
4\nALE\n200\n65\n\
5\nALE\n\
6\n\
8\n";
        let out = session(input);
        assert!(out.starts_with(DEFAULT_EXCHANGE_NAME));
        assert!(out.contains("Dividend yield: 2\n"), "{out}");
        assert!(out.contains("P/E ratio: 2\n"), "{out}");
        assert!(out.contains("Recorded ALE BUY 100 @ 50p"), "{out}");
        assert!(out.contains("Recorded ALE SELL 200 @ 65p"), "{out}");
        assert!(out.contains("VWSP: 60\n"), "{out}");
        assert!(out.contains("Global Beverage Corporation Exchange all share index: 0\n"));
    }

    #[test]
    fn every_stock_traded_gives_positive_index() {
        let mut index = gbce_index();
        let mut input = String::new();
        for symbol in ["TEA", "POP", "ALE", "GIN", "JOE"] {
            input.push_str(&format!("3\n{symbol}\n10\n100\n"));
        }
        input.push_str("6\nexit\n");

        let mut out = Vec::new();
        run_shell(&mut index, input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("all share index: "), "{out}");
        assert!(!out.contains("all share index: 0\n"), "{out}");
        assert_relative_eq!(
            index.calculate_all_share_index().unwrap(),
            100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let out = session("1\nXYZ\n10\n2\nPOP\n-3\n3\nPOP\nmany\n10\n7\n8\n");
        assert!(out.contains("error: unknown stock symbol: XYZ"));
        assert!(out.contains("error: invalid argument: price must be a positive integer"));
        assert!(out.contains("error: quantity must be an integer, got 'many'"));
        assert!(out.contains("SYMBOL"));
        assert!(!out.contains("Command not supported"), "{out}");
    }
}
