//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// handctl - Hands-free computer control through hand gestures
#[derive(Parser, Debug)]
#[command(name = "handctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gesture control session
    Run {
        /// Session duration in seconds (0 = until stopped)
        #[arg(short, long, default_value = "0")]
        duration: u64,

        /// Override the detector command from the config
        #[arg(long)]
        detector: Option<String>,
    },

    /// Print the gesture-to-mode table and per-mode commands
    Modes,

    /// View or edit the custom app-launch gestures
    Controls {
        #[command(subcommand)]
        action: ControlsAction,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Initialize configuration and the control store
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Launch-control subcommands
#[derive(Subcommand, Debug)]
pub enum ControlsAction {
    /// Show the configured launch targets per gesture
    Show,

    /// Set the launch targets for a gesture slot
    Set {
        /// Gesture slot name (e.g. "index", "thumb")
        slot: String,

        /// Launch targets, tried in order (URIs before executables)
        #[arg(required = true)]
        targets: Vec<String>,
    },

    /// Clear a gesture slot
    Clear {
        /// Gesture slot name
        slot: String,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. "engine.cooldown_frames")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the application data directory
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".handctl"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
