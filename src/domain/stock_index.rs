//! Stock index: the set of stocks listed on one exchange.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::error::StockError;
use super::stock::Stock;

#[derive(Debug, Clone, PartialEq)]
pub struct StockIndex {
    name: String,
    stocks: BTreeMap<String, Stock>,
}

impl StockIndex {
    /// Build an index keyed by symbol. A repeated symbol is rejected.
    pub fn new(
        name: impl Into<String>,
        stocks: impl IntoIterator<Item = Stock>,
    ) -> Result<Self, StockError> {
        let name = name.into();
        let mut map = BTreeMap::new();
        for stock in stocks {
            let symbol = stock.symbol().to_string();
            if map.contains_key(&symbol) {
                return Err(StockError::invalid(format!(
                    "duplicate stock symbol '{symbol}'"
                )));
            }
            map.insert(symbol, stock);
        }
        tracing::debug!(index = %name, stocks = map.len(), "stock index built");
        Ok(StockIndex { name, stocks: map })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.stocks.contains_key(symbol)
    }

    /// Stocks in symbol order.
    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.values()
    }

    pub fn get_stock(&self, symbol: &str) -> Result<&Stock, StockError> {
        self.stocks.get(symbol).ok_or_else(|| StockError::NotFound {
            symbol: symbol.to_string(),
        })
    }

    pub fn get_stock_mut(&mut self, symbol: &str) -> Result<&mut Stock, StockError> {
        self.stocks
            .get_mut(symbol)
            .ok_or_else(|| StockError::NotFound {
                symbol: symbol.to_string(),
            })
    }

    /// Geometric mean of every stock's VWSP. A single stock without recent
    /// trades brings the whole index to zero.
    pub fn calculate_all_share_index(&self) -> Result<f64, StockError> {
        self.calculate_all_share_index_at(Utc::now())
    }

    pub fn calculate_all_share_index_at(&self, now: DateTime<Utc>) -> Result<f64, StockError> {
        if self.stocks.is_empty() {
            return Err(StockError::invalid(format!(
                "index '{}' has no stocks",
                self.name
            )));
        }
        // Averaged in log space; the raw product overflows f64 on large
        // exchanges. ln(0) is -inf, so one untraded stock still gives 0.0.
        let log_sum: f64 = self
            .stocks
            .values()
            .map(|s| s.calculate_vwsp_at(now).ln())
            .sum();
        Ok((log_sum / self.stocks.len() as f64).exp())
    }
}
