//! Stock reference data port trait.

use crate::domain::error::StockexError;
use crate::domain::stock::Stock;

/// Source of the stocks listed on an exchange, with no trade history.
pub trait StockDataPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, StockexError>;
}
