//! Command-line interface definition for Chartroom
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive session and offline rendering.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chartroom - terminal client for board and interview rehearsal sessions
///
/// Start a session against a Chartroom backend, chat with the investor
/// panel or the interview coach, and finalize into a mock interview.
#[derive(Parser, Debug, Clone)]
#[command(name = "chartroom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend base URL from config
    #[arg(short, long)]
    pub server: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Chartroom
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive session
    Chat {
        /// Session mode: board_investors or interview_1on1
        #[arg(short, long)]
        mode: Option<String>,

        /// Interview submode (interview mode only)
        #[arg(long)]
        submode: Option<String>,

        /// Panelist persona / board path (boss_1, boss_2, boss_3)
        #[arg(short, long)]
        persona: Option<String>,

        /// Resume file to load into the setup (.txt or .md)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Company context for the setup
        #[arg(long)]
        company: Option<String>,

        /// Projects description for the setup
        #[arg(long)]
        projects: Option<String>,

        /// Coding experience level (interview mode only)
        #[arg(long)]
        experience: Option<String>,

        /// Years of software experience, used with `--experience software_engineer`
        #[arg(long)]
        years: Option<String>,
    },

    /// Render a saved mock interview JSON file as plain text
    Render {
        /// Path to a finalize response or mock interview JSON file
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            server: None,
            command: Commands::Chat {
                mode: None,
                submode: None,
                persona: None,
                resume: None,
                company: None,
                projects: None,
                experience: None,
                years: None,
            },
        }
    }
}
