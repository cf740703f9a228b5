//! CSV stock table adapter.
//!
//! Columns: `symbol,type,last_dividend,fixed_dividend,par_value`. `type` is
//! `common` or `preferred`; `fixed_dividend` is a percentage and is only read
//! for preferred stock.

use crate::domain::error::StockexError;
use crate::domain::stock::{Stock, StockKind};
use crate::domain::symbols::normalize_symbol;
use crate::ports::stock_data_port::StockDataPort;
use std::fs;
use std::path::PathBuf;

enum Source {
    File(PathBuf),
    Inline { name: String, content: String },
}

pub struct CsvStockAdapter {
    source: Source,
}

impl CsvStockAdapter {
    pub fn from_file(path: PathBuf) -> Self {
        Self {
            source: Source::File(path),
        }
    }

    /// Table held in memory; `name` is used in error messages.
    pub fn from_content(name: &str, content: &str) -> Self {
        Self {
            source: Source::Inline {
                name: name.to_string(),
                content: content.to_string(),
            },
        }
    }

    fn source_name(&self) -> String {
        match &self.source {
            Source::File(path) => path.display().to_string(),
            Source::Inline { name, .. } => name.clone(),
        }
    }

    fn error(&self, reason: String) -> StockexError {
        StockexError::StockData {
            source_name: self.source_name(),
            reason,
        }
    }

    fn field<'r>(
        &self,
        record: &'r csv::StringRecord,
        idx: usize,
        name: &str,
        line: u64,
    ) -> Result<&'r str, StockexError> {
        record
            .get(idx)
            .ok_or_else(|| self.error(format!("line {}: missing {} column", line, name)))
    }

    fn parse(&self, content: &str) -> Result<Vec<Stock>, StockexError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut stocks = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| self.error(format!("CSV parse error: {}", e)))?;
            let line = record.position().map_or(0, |p| p.line());

            let symbol = normalize_symbol(self.field(&record, 0, "symbol", line)?);
            let kind_str = self.field(&record, 1, "type", line)?;
            let last_dividend: i64 = self
                .field(&record, 2, "last_dividend", line)?
                .parse()
                .map_err(|e| {
                    self.error(format!("line {}: invalid last_dividend value: {}", line, e))
                })?;
            let par_value: i64 = self
                .field(&record, 4, "par_value", line)?
                .parse()
                .map_err(|e| self.error(format!("line {}: invalid par_value value: {}", line, e)))?;

            let kind = match kind_str.to_lowercase().as_str() {
                "common" => StockKind::Common,
                "preferred" => {
                    let fixed_dividend_percent: f64 = self
                        .field(&record, 3, "fixed_dividend", line)?
                        .parse()
                        .map_err(|e| {
                            self.error(format!(
                                "line {}: invalid fixed_dividend value: {}",
                                line, e
                            ))
                        })?;
                    StockKind::Preferred {
                        fixed_dividend_percent,
                    }
                }
                other => {
                    return Err(self.error(format!(
                        "line {}: unknown stock type '{}'",
                        line, other
                    )));
                }
            };

            let stock = Stock::new(&symbol, last_dividend, par_value, kind)
                .map_err(|e| self.error(format!("line {}: {}", line, e)))?;
            stocks.push(stock);
        }

        Ok(stocks)
    }
}

impl StockDataPort for CsvStockAdapter {
    fn load_stocks(&self) -> Result<Vec<Stock>, StockexError> {
        match &self.source {
            Source::File(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    self.error(format!("failed to read {}: {}", path.display(), e))
                })?;
                self.parse(&content)
            }
            Source::Inline { content, .. } => self.parse(content),
        }
    }
}
