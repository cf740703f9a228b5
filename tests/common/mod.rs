#![allow(dead_code)]

use std::io::Write;
use stockex::adapters::csv_adapter::CsvStockAdapter;
use stockex::adapters::default_stocks::{DEFAULT_EXCHANGE_NAME, DEFAULT_STOCKS_CSV};
use stockex::domain::error::StockexError;
use stockex::domain::stock::Stock;
use stockex::domain::stock_index::StockIndex;
use stockex::ports::stock_data_port::StockDataPort;

pub const STOCKS_HEADER: &str = "symbol,type,last_dividend,fixed_dividend,par_value\n";

/// In-memory stock table, optionally failing on load.
pub struct MockStockDataPort {
    pub stocks: Vec<Stock>,
    pub error: Option<String>,
}

impl MockStockDataPort {
    pub fn new() -> Self {
        Self {
            stocks: Vec::new(),
            error: None,
        }
    }

    pub fn with_stock(mut self, stock: Stock) -> Self {
        self.stocks.push(stock);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl StockDataPort for MockStockDataPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, StockexError> {
        if let Some(reason) = &self.error {
            return Err(StockexError::StockData {
                source_name: "mock".to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.stocks.clone())
    }
}

/// The built-in Global Beverage Corporation Exchange.
pub fn gbce_index() -> StockIndex {
    let stocks = CsvStockAdapter::from_content("built-in", DEFAULT_STOCKS_CSV)
        .load_stocks()
        .unwrap();
    StockIndex::new(DEFAULT_EXCHANGE_NAME, stocks).unwrap()
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
