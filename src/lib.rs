//! stockex: super simple stock market calculator.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. [`shell`] is the interactive menu
//! and [`cli`] wires everything to the command line.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
pub mod shell;
