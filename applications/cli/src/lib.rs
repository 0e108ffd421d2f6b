//! Kyofu command-line front end
//!
//! This library exposes the argument parser, configuration and command
//! runners so they can be tested without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;

pub use cli::{Cli, Commands};
pub use config::CliConfig;
pub use confirm::StdinConfirm;
pub use error::{CliError, Result};
