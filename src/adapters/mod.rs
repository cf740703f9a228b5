//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod default_stocks;
pub mod file_config_adapter;
