//! Command-line interface for the custody wallet

pub mod commands;

pub use commands::{AppState, CliResult};
