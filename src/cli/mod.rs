//! Command-line interface for filebench
//!
//! Clap-based entry point that loads configuration, sets up logging and hands
//! each subcommand its own module under [`commands`].

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
