//! Stocks, their reference data and trade history.
//!
//! Common and preferred stocks share one record; only the dividend yield
//! formula differs, selected by [`StockKind`].

use chrono::{DateTime, Utc};
use std::fmt;

use super::error::StockError;
use super::trade::{Trade, TradeDirection};

pub const SYMBOL_LEN: usize = 3;
pub const DEFAULT_VWSP_MAX_AGE_SECONDS: u64 = 900;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StockKind {
    Common,
    Preferred { fixed_dividend_percent: f64 },
}

impl StockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockKind::Common => "common",
            StockKind::Preferred { .. } => "preferred",
        }
    }
}

impl fmt::Display for StockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    symbol: String,
    last_dividend: i64,
    par_value: i64,
    vwsp_max_age_seconds: u64,
    kind: StockKind,
    trades: Vec<Trade>,
}

impl Stock {
    pub fn common(symbol: &str, last_dividend: i64, par_value: i64) -> Result<Self, StockError> {
        Self::new(symbol, last_dividend, par_value, StockKind::Common)
    }

    pub fn preferred(
        symbol: &str,
        last_dividend: i64,
        par_value: i64,
        fixed_dividend_percent: f64,
    ) -> Result<Self, StockError> {
        Self::new(
            symbol,
            last_dividend,
            par_value,
            StockKind::Preferred {
                fixed_dividend_percent,
            },
        )
    }

    pub fn new(
        symbol: &str,
        last_dividend: i64,
        par_value: i64,
        kind: StockKind,
    ) -> Result<Self, StockError> {
        if symbol.chars().count() != SYMBOL_LEN {
            return Err(StockError::invalid(format!(
                "stock symbol '{symbol}' must be {SYMBOL_LEN} characters"
            )));
        }
        if last_dividend < 0 {
            return Err(StockError::invalid("last dividend must be non-negative"));
        }
        if par_value <= 0 {
            return Err(StockError::invalid("par value must be positive"));
        }
        if let StockKind::Preferred {
            fixed_dividend_percent,
        } = kind
        {
            // NaN fails the range check.
            if !(0.0..=100.0).contains(&fixed_dividend_percent) {
                return Err(StockError::invalid(
                    "fixed dividend must be in the range [0, 100]",
                ));
            }
        }

        Ok(Stock {
            symbol: symbol.to_string(),
            last_dividend,
            par_value,
            vwsp_max_age_seconds: DEFAULT_VWSP_MAX_AGE_SECONDS,
            kind,
            trades: Vec::new(),
        })
    }

    /// Replace the VWSP freshness window.
    pub fn with_vwsp_max_age(mut self, seconds: u64) -> Result<Self, StockError> {
        if seconds == 0 {
            return Err(StockError::invalid("VWSP max age must be positive"));
        }
        self.vwsp_max_age_seconds = seconds;
        Ok(self)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn last_dividend(&self) -> i64 {
        self.last_dividend
    }

    pub fn par_value(&self) -> i64 {
        self.par_value
    }

    pub fn vwsp_max_age_seconds(&self) -> u64 {
        self.vwsp_max_age_seconds
    }

    pub fn kind(&self) -> StockKind {
        self.kind
    }

    pub fn fixed_dividend_percent(&self) -> Option<f64> {
        match self.kind {
            StockKind::Common => None,
            StockKind::Preferred {
                fixed_dividend_percent,
            } => Some(fixed_dividend_percent),
        }
    }

    /// Trade history in the order the trades were made.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Common: last_dividend / price.
    /// Preferred: (fixed_dividend_percent / 100) * par_value / price.
    pub fn calculate_dividend_yield(&self, price: i64) -> Result<f64, StockError> {
        check_price(price)?;
        let price = price as f64;
        Ok(match self.kind {
            StockKind::Common => self.last_dividend as f64 / price,
            StockKind::Preferred {
                fixed_dividend_percent,
            } => (fixed_dividend_percent / 100.0) * self.par_value as f64 / price,
        })
    }

    /// price / last_dividend, or 0.0 when no dividend was paid.
    pub fn calculate_pe_ratio(&self, price: i64) -> Result<f64, StockError> {
        check_price(price)?;
        if self.last_dividend == 0 {
            return Ok(0.0);
        }
        Ok(price as f64 / self.last_dividend as f64)
    }

    /// Volume weighted stock price over trades inside the freshness window.
    pub fn calculate_vwsp(&self) -> f64 {
        self.calculate_vwsp_at(Utc::now())
    }

    pub fn calculate_vwsp_at(&self, now: DateTime<Utc>) -> f64 {
        let (total_value, total_quantity) = self
            .trades
            .iter()
            .filter(|t| t.is_younger_than_at(self.vwsp_max_age_seconds, now))
            .fold((0i128, 0i128), |(value, quantity), t| {
                (value + t.value(), quantity + i128::from(t.quantity()))
            });

        if total_quantity == 0 {
            return 0.0;
        }
        total_value as f64 / total_quantity as f64
    }

    pub fn buy(&mut self, quantity: i64, price: i64) -> Result<&Trade, StockError> {
        self.record(TradeDirection::Buy, quantity, price)
    }

    /// No check against shares held; the model has no notion of ownership.
    pub fn sell(&mut self, quantity: i64, price: i64) -> Result<&Trade, StockError> {
        self.record(TradeDirection::Sell, quantity, price)
    }

    fn record(
        &mut self,
        direction: TradeDirection,
        quantity: i64,
        price: i64,
    ) -> Result<&Trade, StockError> {
        let trade = Trade::new(quantity, price, direction)?;
        tracing::debug!(
            symbol = %self.symbol,
            %direction,
            quantity,
            price,
            "trade recorded"
        );
        self.trades.push(trade);
        Ok(&self.trades[self.trades.len() - 1])
    }
}

fn check_price(price: i64) -> Result<(), StockError> {
    if price <= 0 {
        return Err(StockError::invalid("price must be a positive integer"));
    }
    Ok(())
}
