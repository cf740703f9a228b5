//! Configuration validation.
//!
//! Every key in `[exchange]` is optional; present keys are checked before the
//! index is built.

use crate::domain::error::StockexError;
use crate::domain::symbols::parse_symbols;
use crate::ports::config_port::ConfigPort;

pub const EXCHANGE_SECTION: &str = "exchange";

pub fn validate_exchange_config(config: &dyn ConfigPort) -> Result<(), StockexError> {
    validate_name(config)?;
    validate_vwsp_max_age(config)?;
    validate_stocks_file(config)?;
    validate_symbols(config)?;
    Ok(())
}

fn invalid(key: &str, reason: impl Into<String>) -> StockexError {
    StockexError::ConfigInvalid {
        section: EXCHANGE_SECTION.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_name(config: &dyn ConfigPort) -> Result<(), StockexError> {
    match config.get_string(EXCHANGE_SECTION, "name") {
        Some(s) if s.trim().is_empty() => Err(invalid("name", "name must not be blank")),
        _ => Ok(()),
    }
}

fn validate_vwsp_max_age(config: &dyn ConfigPort) -> Result<(), StockexError> {
    let Some(raw) = config.get_string(EXCHANGE_SECTION, "vwsp_max_age") else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(seconds) if seconds > 0 => Ok(()),
        _ => Err(invalid(
            "vwsp_max_age",
            "vwsp_max_age must be a positive number of seconds",
        )),
    }
}

fn validate_stocks_file(config: &dyn ConfigPort) -> Result<(), StockexError> {
    match config.get_string(EXCHANGE_SECTION, "stocks_file") {
        Some(s) if s.trim().is_empty() => {
            Err(invalid("stocks_file", "stocks_file must not be blank"))
        }
        _ => Ok(()),
    }
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), StockexError> {
    match config.get_string(EXCHANGE_SECTION, "symbols") {
        Some(s) => parse_symbols(&s)
            .map(|_| ())
            .map_err(|e| invalid("symbols", e.to_string())),
        None => Ok(()),
    }
}
