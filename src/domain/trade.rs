//! Trade records.
//!
//! A trade is created by a stock's buy/sell operation and never changes after
//! that. Prices and quantities are whole pennies and whole shares.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;

use super::error::StockError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "BUY",
            TradeDirection::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TradeDirection {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(TradeDirection::Buy),
            "sell" => Ok(TradeDirection::Sell),
            other => Err(StockError::invalid(format!(
                "unrecognized trade direction '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    quantity: i64,
    price: i64,
    direction: TradeDirection,
    timestamp: DateTime<Utc>,
}

impl Trade {
    /// Create a trade stamped with the current UTC instant.
    pub fn new(quantity: i64, price: i64, direction: TradeDirection) -> Result<Self, StockError> {
        Self::new_at(quantity, price, direction, Utc::now())
    }

    /// Create a trade stamped with `timestamp`.
    pub fn new_at(
        quantity: i64,
        price: i64,
        direction: TradeDirection,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, StockError> {
        if quantity <= 0 {
            return Err(StockError::invalid("quantity must be a positive integer"));
        }
        if price <= 0 {
            return Err(StockError::invalid("price must be a positive integer"));
        }
        Ok(Trade {
            quantity,
            price,
            direction,
            timestamp,
        })
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn direction(&self) -> TradeDirection {
        self.direction
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// price * quantity, in pennies.
    pub fn value(&self) -> i128 {
        i128::from(self.price) * i128::from(self.quantity)
    }

    /// True while the trade is at most `max_age_seconds` old. Reads the clock
    /// on every call.
    pub fn is_younger_than(&self, max_age_seconds: u64) -> bool {
        self.is_younger_than_at(max_age_seconds, Utc::now())
    }

    pub fn is_younger_than_at(&self, max_age_seconds: u64, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.timestamp);
        match i64::try_from(max_age_seconds)
            .ok()
            .and_then(Duration::try_seconds)
        {
            Some(max_age) => age <= max_age,
            // Window wider than chrono can represent: everything qualifies.
            None => true,
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}p ({})",
            self.direction,
            self.quantity,
            self.price,
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}
