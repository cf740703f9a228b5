//! Core domain types and logic.

pub mod config_validation;
pub mod error;
pub mod stock;
pub mod stock_index;
pub mod symbols;
pub mod trade;
