//! Application Layer
//!
//! User-facing CLI and the TOML configuration the engine is built from.

pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::Config;
