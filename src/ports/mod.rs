//! Port traits decoupling the domain from configuration and data sources.

pub mod config_port;
pub mod stock_data_port;
